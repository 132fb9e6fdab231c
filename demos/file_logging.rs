//! File logging example
//!
//! Demonstrates the formatted text, W3C and JSON lines back-ends side by side.
//!
//! Run with: cargo run --example file_logging

use log_dispatch::prelude::*;

fn main() -> Result<()> {
    println!("=== Log Dispatch - File Logging Example ===\n");

    let dispatcher = Dispatcher::builder()
        // Default layout, errors and worse
        .logger(
            LoggerOptions::new()
                .with("text_file", "errors.log")
                .with("text_file_path", "logs"),
            Priority::Emergency | Priority::Alert | Priority::Critical | Priority::Error,
            CategorySet::new(),
        )
        // Custom layout for the audit trail
        .logger(
            LoggerOptions::new()
                .with("text_file", "audit.log")
                .with("text_file_path", "logs")
                .with("text_entry_format", "{DATETIME} {CLIENTIP} {MESSAGE} user={USER}"),
            PriorityMask::ALL,
            "audit",
        )
        .logger(
            LoggerOptions::new()
                .with("logger", "w3c")
                .with("text_file_path", "logs"),
            PriorityMask::ALL & !Priority::Debug,
            CategorySet::new(),
        )
        .logger(
            LoggerOptions::new()
                .with("logger", "json")
                .with("json_file_path", "logs"),
            PriorityMask::ALL,
            CategorySet::new(),
        )
        .build();

    println!("1. Writing entries:");
    dispatcher.add_message("Application started", Priority::Info, "")?;
    dispatcher.add(
        &LogEntry::new("Login succeeded", Priority::Notice)?
            .with_category("audit")
            .with_client_ip("192.0.2.10")
            .with_field("user", "alice"),
    )?;
    dispatcher.add_message("Failed to load optional plugin", Priority::Error, "plugins")?;

    for i in 1..=5 {
        dispatcher.add_message(format!("Processing item {}/5", i), Priority::Debug, "worker")?;
    }

    dispatcher.flush()?;

    println!("\n2. Loggers built on demand:");
    for (fingerprint, options) in dispatcher.configurations() {
        let built = dispatcher.instantiated().contains(&fingerprint);
        println!("   {} {} built={}", options.logger_type(), fingerprint, built);
    }

    println!("\n=== Example completed successfully! ===");
    println!("Check the 'logs' directory for the output");

    Ok(())
}
