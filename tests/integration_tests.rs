//! Integration tests for the log dispatcher
//!
//! These tests verify:
//! - Logger lookup by category, priority, and both
//! - The legacy entry adapter
//! - The process-wide dispatcher
//! - Built-in file back-ends end to end

#![allow(deprecated)]

use log_dispatch::global;
use log_dispatch::loggers::EchoLogger;
use log_dispatch::prelude::*;
use log_dispatch::{FieldValue, Fingerprint};
use parking_lot::Mutex;
use std::fs;
use std::io::{self, Write};
use std::sync::Arc;
use tempfile::TempDir;

/// Serializes tests that touch the process-wide dispatcher
static GLOBAL_LOCK: Mutex<()> = parking_lot::const_mutex(());

/// Writer that appends into a buffer shared with the test
#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().clone()).expect("utf-8 output")
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Replace the `echo` type on `dispatcher` with one writing into a buffer
fn capture_echo(dispatcher: &Dispatcher) -> SharedBuffer {
    let buffer = SharedBuffer::default();
    let sink = buffer.clone();
    dispatcher.register_logger_type("echo", move |_options: &LoggerOptions| {
        Ok(Box::new(EchoLogger::with_writer(sink.clone())) as Box<dyn Logger>)
    });
    buffer
}

fn text_file(name: &str) -> LoggerOptions {
    LoggerOptions::new().with("text_file", name)
}

fn fp(name: &str) -> Fingerprint {
    text_file(name).fingerprint()
}

#[test]
fn test_find_loggers_by_category() {
    let log = Dispatcher::new();

    log.add_logger(text_file("deprecated.log"), PriorityMask::ALL, "deprecated");
    log.add_logger(text_file("com_foo.log"), PriorityMask::ALL, "com_foo");
    log.add_logger(text_file("none.log"), PriorityMask::ALL, CategorySet::new());
    log.add_logger(
        text_file("deprecated-com_foo.log"),
        PriorityMask::ALL,
        ["deprecated", "com_foo"],
    );
    log.add_logger(
        text_file("foobar-deprecated.log"),
        PriorityMask::ALL,
        ["foobar", "deprecated"],
    );
    log.add_logger(
        text_file("transactions-paypal.log"),
        PriorityMask::ALL,
        ["transactions", "paypal"],
    );
    log.add_logger(text_file("transactions.log"), PriorityMask::ALL, ["transactions"]);

    assert_eq!(
        log.find_loggers(Priority::Emergency, Some("deprecated")),
        vec![
            fp("deprecated.log"),
            fp("none.log"),
            fp("deprecated-com_foo.log"),
            fp("foobar-deprecated.log"),
        ]
    );
    assert_eq!(
        log.find_loggers(Priority::Notice, Some("paypal")),
        vec![fp("none.log"), fp("transactions-paypal.log")]
    );
    assert_eq!(
        log.find_loggers(Priority::Debug, Some("com_foo")),
        vec![fp("com_foo.log"), fp("none.log"), fp("deprecated-com_foo.log")]
    );
    assert_eq!(
        log.find_loggers(Priority::Warning, Some("transactions")),
        vec![
            fp("none.log"),
            fp("transactions-paypal.log"),
            fp("transactions.log"),
        ]
    );
}

#[test]
fn test_find_loggers_by_priority() {
    let log = Dispatcher::new();

    log.add_logger(text_file("error.log"), Priority::Error, CategorySet::new());
    log.add_logger(text_file("notice.log"), Priority::Notice, CategorySet::new());
    log.add_logger(text_file("warning.log"), Priority::Warning, CategorySet::new());
    log.add_logger(
        text_file("error_warning.log"),
        Priority::Error | Priority::Warning,
        CategorySet::new(),
    );
    log.add_logger(text_file("all.log"), PriorityMask::ALL, CategorySet::new());
    log.add_logger(
        text_file("all_except_debug.log"),
        PriorityMask::ALL & !Priority::Debug,
        CategorySet::new(),
    );

    assert_eq!(
        log.find_loggers(Priority::Emergency, None),
        vec![fp("all.log"), fp("all_except_debug.log")]
    );
    assert_eq!(
        log.find_loggers(Priority::Notice, None),
        vec![fp("notice.log"), fp("all.log"), fp("all_except_debug.log")]
    );
    assert_eq!(log.find_loggers(Priority::Debug, None), vec![fp("all.log")]);
    assert_eq!(
        log.find_loggers(Priority::Warning, None),
        vec![
            fp("warning.log"),
            fp("error_warning.log"),
            fp("all.log"),
            fp("all_except_debug.log"),
        ]
    );
}

#[test]
fn test_find_loggers_by_priority_and_category() {
    let log = Dispatcher::new();

    log.add_logger(text_file("deprecated.log"), PriorityMask::ALL, "deprecated");
    log.add_logger(text_file("com_foo.log"), Priority::Debug, "com_foo");
    log.add_logger(
        text_file("none.log"),
        Priority::Error | Priority::Critical | Priority::Emergency,
        CategorySet::new(),
    );
    log.add_logger(
        text_file("deprecated-com_foo.log"),
        Priority::Notice | Priority::Warning,
        ["deprecated", "com_foo"],
    );
    log.add_logger(
        text_file("transactions-paypal.log"),
        Priority::Info,
        ["transactions", "paypal"],
    );
    log.add_logger(text_file("transactions.log"), Priority::Error, ["transactions"]);

    assert_eq!(
        log.find_loggers(Priority::Emergency, Some("deprecated")),
        vec![fp("deprecated.log"), fp("none.log")]
    );
    assert!(log.find_loggers(Priority::Notice, Some("paypal")).is_empty());
    assert_eq!(
        log.find_loggers(Priority::Debug, Some("com_foo")),
        vec![fp("com_foo.log")]
    );
    assert_eq!(
        log.find_loggers(Priority::Error, Some("transactions")),
        vec![fp("none.log"), fp("transactions.log")]
    );
    assert_eq!(
        log.find_loggers(Priority::Info, Some("transactions")),
        vec![fp("transactions-paypal.log")]
    );
}

#[test]
fn test_find_loggers_is_case_insensitive() {
    let log = Dispatcher::new();
    log.add_logger(text_file("mixed.log"), PriorityMask::ALL, ["DePrEcAtEd"]);

    assert_eq!(
        log.find_loggers(Priority::Info, Some("DEPRECATED")),
        vec![fp("mixed.log")]
    );
}

#[test]
fn test_add_entry_with_invalid_scalar_input() {
    let log = Dispatcher::new();

    assert!(!log.add_entry(123).unwrap());
    assert!(!log.add_entry("foobar").unwrap());
    assert!(!log.add_entry(2.5).unwrap());
    assert!(log.queue().is_empty());
    assert_eq!(log.metrics().entries_dispatched(), 0);
}

#[test]
fn test_add_entry_with_valid_mapping() {
    let log = Dispatcher::new();

    let accepted = log
        .add_entry(serde_json::json!({
            "c-ip": "127.0.0.1",
            "status": "deprecated",
            "level": Priority::Debug.bits(),
            "comment": "Test Entry",
            "foo": "bar"
        }))
        .unwrap();
    assert!(accepted);

    let queue = log.queue();
    assert_eq!(queue.len(), 1);
    assert_eq!(queue[0].category(), "deprecated");
    assert_eq!(queue[0].priority(), Priority::Debug);
    assert_eq!(queue[0].message(), "Test Entry");
    assert_eq!(queue[0].field("foo"), Some(&FieldValue::String("bar".into())));
    assert_eq!(queue[0].client_ip(), Some("127.0.0.1"));
}

#[test]
fn test_add_entry_with_valid_entry() {
    let log = Dispatcher::new();
    let entry = LogEntry::new("TESTING", Priority::Debug).unwrap();

    assert!(log.add_entry(entry.clone()).unwrap());
    assert_eq!(log.queue(), vec![entry]);
}

#[test]
fn test_add_entry_dispatches() {
    let log = Dispatcher::new();
    let out = capture_echo(&log);
    log.add_logger(
        LoggerOptions::new().with("logger", "echo"),
        PriorityMask::ALL,
        CategorySet::new(),
    );

    log.add_entry(serde_json::json!({"status": "deprecated", "comment": "old call"}))
        .unwrap();
    assert_eq!(out.contents(), "DEBUG: old call [deprecated]\n");
}

#[test]
fn test_add_log_entry_echo() {
    let log = Dispatcher::new();
    let out = capture_echo(&log);
    log.add_logger(
        LoggerOptions::new().with("logger", "echo"),
        PriorityMask::ALL,
        CategorySet::new(),
    );

    let entry = LogEntry::new("TESTING", Priority::Debug)
        .unwrap()
        .with_category("DePrEcAtEd");
    log.add_log_entry(&entry).unwrap();

    assert_eq!(out.contents(), "DEBUG: TESTING [deprecated]\n");
    assert_eq!(log.instantiated().len(), 1);
}

#[test]
fn test_logger_instantiated_once() {
    let log = Dispatcher::new();
    let out = capture_echo(&log);
    let fingerprint = log.add_logger(
        LoggerOptions::new().with("logger", "echo"),
        PriorityMask::ALL,
        CategorySet::new(),
    );

    for i in 0..3 {
        log.add_message(format!("entry {}", i), Priority::Info, "").unwrap();
    }

    assert_eq!(log.instantiated(), vec![fingerprint]);
    assert_eq!(log.metrics().loggers_instantiated(), 1);
    assert_eq!(out.contents().lines().count(), 3);
}

#[test]
fn test_unknown_logger_type_fails_on_dispatch() {
    let log = Dispatcher::new();
    log.add_logger(
        LoggerOptions::new().with("logger", "foobar"),
        PriorityMask::ALL,
        CategorySet::new(),
    );

    // Nothing matches, so nothing is built
    log.add_logger(
        LoggerOptions::new().with("logger", "foobar").with("x", 1),
        Priority::Emergency,
        "never",
    );
    let err = log
        .add(&LogEntry::new("TESTING", Priority::Warning).unwrap().with_category("deprecated"))
        .unwrap_err();

    assert!(matches!(err, LoggerError::UnknownLoggerType { ref logger_type } if logger_type == "foobar"));
    assert!(err.is_configuration_error());
    assert_eq!(log.metrics().delivery_failures(), 1);
}

#[test]
fn test_fail_fast_skips_later_loggers() {
    let log = Dispatcher::new();
    let out = capture_echo(&log);
    log.add_logger(
        LoggerOptions::new().with("logger", "foobar"),
        PriorityMask::ALL,
        CategorySet::new(),
    );
    log.add_logger(
        LoggerOptions::new().with("logger", "echo"),
        PriorityMask::ALL,
        CategorySet::new(),
    );

    assert!(log.add_message("lost", Priority::Error, "").is_err());
    assert!(out.contents().is_empty());
}

#[test]
fn test_global_auto_instantiation() {
    let _guard = GLOBAL_LOCK.lock();
    global::set_instance(None);

    let out = capture_echo(&global::instance());
    global::add_logger(
        LoggerOptions::new().with("logger", "echo"),
        PriorityMask::ALL,
        CategorySet::new(),
    );
    global::add(
        &LogEntry::new("TESTING", Priority::Warning)
            .unwrap()
            .with_category("DePrEcAtEd"),
    )
    .unwrap();

    assert_eq!(out.contents(), "WARNING: TESTING [deprecated]\n");
    global::set_instance(None);
}

#[test]
fn test_global_invalid_logger() {
    let _guard = GLOBAL_LOCK.lock();
    global::set_instance(None);

    global::add_logger(
        LoggerOptions::new().with("logger", "foobar"),
        PriorityMask::ALL,
        CategorySet::new(),
    );
    let result = global::add_message("TESTING", Priority::Warning, "deprecated");

    assert!(matches!(result, Err(LoggerError::UnknownLoggerType { .. })));
    global::set_instance(None);
}

#[test]
fn test_global_set_instance() {
    let _guard = GLOBAL_LOCK.lock();
    global::set_instance(None);

    let first = global::instance();
    assert!(Arc::ptr_eq(&first, &global::instance()));

    let custom = Arc::new(
        Dispatcher::builder()
            .logger(text_file("custom.log"), Priority::Error, "db")
            .build(),
    );
    global::set_instance(Some(Arc::clone(&custom)));

    let current = global::instance();
    assert!(Arc::ptr_eq(&current, &custom));
    assert_eq!(current.configurations().len(), 1);
    assert_eq!(current.lookup()[0].0, fp("custom.log"));

    global::set_instance(None);
    assert!(global::instance().configurations().is_empty());
    global::set_instance(None);
}

#[test]
fn test_formatted_text_backend() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let dir = temp_dir.path().to_string_lossy().to_string();

    let log = Dispatcher::new();
    log.add_logger(
        LoggerOptions::new()
            .with("text_file", "deprecated.log")
            .with("text_file_path", dir.as_str())
            .with("text_entry_format", "{PRIORITY} {CATEGORY} {MESSAGE}"),
        PriorityMask::ALL & !Priority::Debug,
        "deprecated",
    );

    log.add_message("kept", Priority::Warning, "deprecated").unwrap();
    log.add_message("wrong category", Priority::Warning, "other").unwrap();
    log.add_message("too verbose", Priority::Debug, "deprecated").unwrap();
    log.add_message("log\ninjection", Priority::Error, "deprecated").unwrap();
    log.flush().expect("Failed to flush");

    let content =
        fs::read_to_string(temp_dir.path().join("deprecated.log")).expect("Failed to read log file");
    let entries: Vec<&str> = content.lines().filter(|l| !l.starts_with('#')).collect();
    assert_eq!(
        entries,
        vec!["WARNING deprecated kept", "ERROR deprecated log\\ninjection"]
    );
}

#[test]
fn test_file_written_when_add_returns() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let dir = temp_dir.path().to_string_lossy().to_string();

    let log = Dispatcher::new();
    log.add_logger(
        LoggerOptions::new()
            .with("text_file", "unflushed.log")
            .with("text_file_path", dir.as_str())
            .with("text_entry_format", "{PRIORITY} {MESSAGE}"),
        PriorityMask::ALL,
        CategorySet::new(),
    );
    log.add_logger(
        LoggerOptions::new()
            .with("logger", "json")
            .with("json_file", "unflushed.jsonl")
            .with("json_file_path", dir.as_str()),
        PriorityMask::ALL,
        CategorySet::new(),
    );

    log.add(&LogEntry::new("on disk", Priority::Error).unwrap())
        .expect("dispatch failed");

    // No flush: the dispatcher is still alive and holds both writers
    let text = fs::read_to_string(temp_dir.path().join("unflushed.log")).unwrap();
    assert!(text.ends_with("ERROR on disk\n"));
    let json = fs::read_to_string(temp_dir.path().join("unflushed.jsonl")).unwrap();
    assert_eq!(json.lines().count(), 1);
    assert!(json.contains("\"on disk\""));
}

#[test]
fn test_global_file_written_without_flush() {
    let _guard = GLOBAL_LOCK.lock();
    global::set_instance(None);
    let temp_dir = TempDir::new().expect("Failed to create temp dir");

    global::add_logger(
        LoggerOptions::new()
            .with("text_file", "global.log")
            .with("text_file_path", temp_dir.path().to_string_lossy().to_string())
            .with("text_entry_format", "{CATEGORY} {MESSAGE}"),
        PriorityMask::ALL,
        CategorySet::new(),
    );
    global::add_message("shared", Priority::Notice, "app").expect("dispatch failed");

    let content = fs::read_to_string(temp_dir.path().join("global.log")).unwrap();
    assert!(content.ends_with("app shared\n"));

    global::set_instance(None);
}

#[test]
fn test_json_and_w3c_backends() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let dir = temp_dir.path().to_string_lossy().to_string();

    let log = Dispatcher::builder()
        .logger(
            LoggerOptions::new()
                .with("logger", "json")
                .with("json_file_path", dir.as_str()),
            PriorityMask::ALL,
            CategorySet::new(),
        )
        .logger(
            LoggerOptions::new()
                .with("logger", "W3C")
                .with("text_file_path", dir.as_str()),
            Priority::Error,
            CategorySet::new(),
        )
        .build();

    log.add(
        &LogEntry::new("Test Entry", Priority::Error)
            .unwrap()
            .with_client_ip("127.0.0.1")
            .with_field("foo", "bar"),
    )
    .unwrap();
    log.add_message("info only", Priority::Info, "").unwrap();
    log.flush().unwrap();

    let json = fs::read_to_string(temp_dir.path().join("log.jsonl")).unwrap();
    let records: Vec<serde_json::Value> = json
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["client_ip"], "127.0.0.1");
    assert_eq!(records[0]["fields"]["foo"], "bar");

    let w3c = fs::read_to_string(temp_dir.path().join("error.w3c.log")).unwrap();
    let rows: Vec<&str> = w3c.lines().filter(|l| !l.starts_with('#')).collect();
    assert_eq!(rows.len(), 1);
    assert!(rows[0].ends_with("\tERROR\t127.0.0.1\t-\tTest Entry"));
}

#[test]
fn test_registrations_from_config() {
    let registrations: Vec<LoggerRegistration> = serde_json::from_str(
        r#"[
            { "options": { "text_file": "error.log" }, "priorities": 8 },
            { "options": { "text_file": "audit.log" }, "categories": ["Audit", "auth"] }
        ]"#,
    )
    .unwrap();

    let log = Dispatcher::builder().registrations(registrations).build();

    assert_eq!(log.find_loggers(Priority::Error, None), vec![fp("error.log"), fp("audit.log")]);
    assert_eq!(log.find_loggers(Priority::Info, Some("audit")), vec![fp("audit.log")]);
    assert!(log.find_loggers(Priority::Info, Some("billing")).is_empty());
}

#[test]
fn test_reset_clears_everything() {
    let log = Dispatcher::new();
    let _out = capture_echo(&log);
    log.add_logger(
        LoggerOptions::new().with("logger", "echo"),
        PriorityMask::ALL,
        CategorySet::new(),
    );
    log.add_entry(LogEntry::new("queued", Priority::Info).unwrap()).unwrap();

    log.reset();

    assert!(log.configurations().is_empty());
    assert!(log.lookup().is_empty());
    assert!(log.instantiated().is_empty());
    assert!(log.queue().is_empty());
    assert_eq!(log.metrics().entries_dispatched(), 0);
}
