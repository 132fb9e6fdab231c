//! Legacy entry example
//!
//! Demonstrates the deprecated `add_entry` adapter for loosely typed input.
//!
//! Run with: cargo run --example legacy_entries

#![allow(deprecated)]

use log_dispatch::prelude::*;
use serde_json::json;

fn main() -> Result<()> {
    println!("=== Log Dispatch - Legacy Entries Example ===\n");

    let dispatcher = Dispatcher::new();
    dispatcher.add_logger(
        LoggerOptions::new().with("logger", "echo"),
        PriorityMask::ALL,
        CategorySet::new(),
    );

    println!("1. A legacy mapping:");
    let accepted = dispatcher.add_entry(json!({
        "c-ip": "127.0.0.1",
        "status": "deprecated",
        "level": "warning",
        "comment": "Old style entry",
        "foo": "bar"
    }))?;
    println!("   accepted: {}", accepted);

    println!("\n2. A mapping without a level defaults to DEBUG:");
    dispatcher.add_entry(json!({"status": "deprecated", "comment": "No level given"}))?;

    println!("\n3. Rejected input:");
    println!("   123        -> {}", dispatcher.add_entry(123)?);
    println!("   \"foobar\"   -> {}", dispatcher.add_entry("foobar")?);
    println!("   no comment -> {}", dispatcher.add_entry(json!({"status": "x"}))?);

    println!("\n4. Queued legacy entries:");
    for entry in dispatcher.queue() {
        println!(
            "   {} [{}] {} client_ip={}",
            entry.priority(),
            entry.category(),
            entry.message(),
            entry.client_ip().unwrap_or("-")
        );
        for (key, value) in entry.fields().iter() {
            println!("      {}={}", key, value);
        }
    }

    println!("\n=== Example completed successfully! ===");
    Ok(())
}
