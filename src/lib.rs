//! # Log Dispatch
//!
//! A log dispatching engine: entries are routed to any number of logger
//! back-ends, each registered with a priority mask and a set of categories.
//!
//! ## Features
//!
//! - **Priority masks**: eight syslog-style severities combined as bits
//! - **Category routing**: loggers listen to some categories, or to all
//! - **Lazy back-ends**: loggers are built on the first entry they receive
//!   and shared between identical registrations
//! - **Pluggable types**: echo, formatted text, W3C and JSON lines built in;
//!   more can be registered by name
//!
//! ## Example
//!
//! ```
//! use log_dispatch::prelude::*;
//!
//! let dispatcher = Dispatcher::new();
//! dispatcher.add_logger(
//!     LoggerOptions::new().with("logger", "echo"),
//!     PriorityMask::ALL & !Priority::Debug,
//!     CategorySet::new(),
//! );
//!
//! let entry = LogEntry::new("cache warmed", Priority::Notice)?.with_category("startup");
//! dispatcher.add(&entry)?;
//! # Ok::<(), log_dispatch::LoggerError>(())
//! ```

pub mod core;
pub mod global;
pub mod loggers;
pub mod macros;

pub mod prelude {
    pub use crate::core::{
        CategorySet, Dispatcher, DispatcherBuilder, LogEntry, Logger, LoggerError, LoggerOptions,
        LoggerRegistration, Priority, PriorityMask, Result,
    };
    pub use crate::global;
}

pub use crate::core::{
    CategorySet, ConfigurationRegistry, DispatchMetrics, Dispatcher, DispatcherBuilder,
    EntryFields, FieldValue, Fingerprint, LegacyInput, LogEntry, Logger, LoggerError,
    LoggerFactory, LoggerOptions, LoggerRegistration, LookupRecord, Priority, PriorityMask, Result,
};
