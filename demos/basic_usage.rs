//! Basic dispatcher usage example
//!
//! Demonstrates routing entries to echo loggers by priority and category.
//!
//! Run with: cargo run --example basic_usage

use log_dispatch::prelude::*;
use log_dispatch::{error, info, warning};

fn main() -> Result<()> {
    println!("=== Log Dispatch - Basic Usage Example ===\n");

    let dispatcher = Dispatcher::new();

    // Everything except debug noise, any category
    dispatcher.add_logger(
        LoggerOptions::new().with("logger", "echo").with("echo_colors", true),
        PriorityMask::ALL & !Priority::Debug,
        CategorySet::new(),
    );

    // Debug output only for the database
    dispatcher.add_logger(
        LoggerOptions::new().with("logger", "echo"),
        Priority::Debug,
        "db",
    );

    println!("1. Entries at different priorities:");
    for priority in Priority::ALL {
        dispatcher.add_message(format!("This is a {} message", priority), priority, "")?;
    }

    println!("\n2. Category routing:");
    dispatcher.add_message("Query plan cached", Priority::Debug, "db")?;
    dispatcher.add_message("Template compiled (hidden)", Priority::Debug, "http")?;

    println!("\n3. Macros:");
    info!(dispatcher, "Server listening on port {}", 8080)?;
    warning!(dispatcher, category = "auth", "{} failed logins", 3)?;
    error!(dispatcher, category = "db", "Connection lost")?;

    println!("\n4. Who would receive an ERROR in 'db'?");
    for fingerprint in dispatcher.find_loggers(Priority::Error, Some("db")) {
        println!("   {}", fingerprint);
    }

    let metrics = dispatcher.metrics();
    println!(
        "\nDispatched {} entries, {} unmatched, {} deliveries",
        metrics.entries_dispatched(),
        metrics.entries_unmatched(),
        metrics.deliveries()
    );

    println!("\n=== Example completed successfully! ===");
    Ok(())
}
