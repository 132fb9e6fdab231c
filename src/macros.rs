//! Logging macros for ergonomic message formatting.
//!
//! These macros build the message with `format!` and hand it to
//! [`Dispatcher::add_message`](crate::Dispatcher::add_message), returning its
//! `Result`. Any expression that dereferences to a `Dispatcher` works,
//! including the `Arc` returned by [`global::instance`](crate::global::instance).
//!
//! # Examples
//!
//! ```
//! use log_dispatch::prelude::*;
//! use log_dispatch::{info, error};
//!
//! let dispatcher = Dispatcher::new();
//!
//! // Basic logging
//! info!(dispatcher, "Server started")?;
//!
//! // With format arguments and a category
//! let port = 8080;
//! error!(dispatcher, category = "net", "Cannot bind port {}", port)?;
//! # Ok::<(), LoggerError>(())
//! ```

/// Log a message with an explicit priority.
///
/// # Examples
///
/// ```
/// # use log_dispatch::prelude::*;
/// # let dispatcher = Dispatcher::new();
/// use log_dispatch::log;
/// log!(dispatcher, Priority::Info, "Simple message").unwrap();
/// log!(dispatcher, Priority::Error, category = "http", "Error code: {}", 500).unwrap();
/// ```
#[macro_export]
macro_rules! log {
    ($dispatcher:expr, $priority:expr, category = $category:expr, $($arg:tt)+) => {
        $dispatcher.add_message(format!($($arg)+), $priority, $category)
    };
    ($dispatcher:expr, $priority:expr, $($arg:tt)+) => {
        $dispatcher.add_message(format!($($arg)+), $priority, "")
    };
}

/// Log an emergency-level message.
#[macro_export]
macro_rules! emergency {
    ($dispatcher:expr, category = $category:expr, $($arg:tt)+) => {
        $crate::log!($dispatcher, $crate::Priority::Emergency, category = $category, $($arg)+)
    };
    ($dispatcher:expr, $($arg:tt)+) => {
        $crate::log!($dispatcher, $crate::Priority::Emergency, $($arg)+)
    };
}

/// Log an alert-level message.
#[macro_export]
macro_rules! alert {
    ($dispatcher:expr, category = $category:expr, $($arg:tt)+) => {
        $crate::log!($dispatcher, $crate::Priority::Alert, category = $category, $($arg)+)
    };
    ($dispatcher:expr, $($arg:tt)+) => {
        $crate::log!($dispatcher, $crate::Priority::Alert, $($arg)+)
    };
}

/// Log a critical-level message.
#[macro_export]
macro_rules! critical {
    ($dispatcher:expr, category = $category:expr, $($arg:tt)+) => {
        $crate::log!($dispatcher, $crate::Priority::Critical, category = $category, $($arg)+)
    };
    ($dispatcher:expr, $($arg:tt)+) => {
        $crate::log!($dispatcher, $crate::Priority::Critical, $($arg)+)
    };
}

/// Log an error-level message.
///
/// # Examples
///
/// ```
/// # use log_dispatch::prelude::*;
/// # let dispatcher = Dispatcher::new();
/// use log_dispatch::error;
/// error!(dispatcher, "Failed to connect to database").unwrap();
/// error!(dispatcher, category = "db", "Error code: {}, message: {}", 500, "Internal error").unwrap();
/// ```
#[macro_export]
macro_rules! error {
    ($dispatcher:expr, category = $category:expr, $($arg:tt)+) => {
        $crate::log!($dispatcher, $crate::Priority::Error, category = $category, $($arg)+)
    };
    ($dispatcher:expr, $($arg:tt)+) => {
        $crate::log!($dispatcher, $crate::Priority::Error, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warning {
    ($dispatcher:expr, category = $category:expr, $($arg:tt)+) => {
        $crate::log!($dispatcher, $crate::Priority::Warning, category = $category, $($arg)+)
    };
    ($dispatcher:expr, $($arg:tt)+) => {
        $crate::log!($dispatcher, $crate::Priority::Warning, $($arg)+)
    };
}

/// Log a notice-level message.
#[macro_export]
macro_rules! notice {
    ($dispatcher:expr, category = $category:expr, $($arg:tt)+) => {
        $crate::log!($dispatcher, $crate::Priority::Notice, category = $category, $($arg)+)
    };
    ($dispatcher:expr, $($arg:tt)+) => {
        $crate::log!($dispatcher, $crate::Priority::Notice, $($arg)+)
    };
}

/// Log an info-level message.
///
/// # Examples
///
/// ```
/// # use log_dispatch::prelude::*;
/// # let dispatcher = Dispatcher::new();
/// use log_dispatch::info;
/// info!(dispatcher, "Application started").unwrap();
/// info!(dispatcher, "Processing {} items", 100).unwrap();
/// ```
#[macro_export]
macro_rules! info {
    ($dispatcher:expr, category = $category:expr, $($arg:tt)+) => {
        $crate::log!($dispatcher, $crate::Priority::Info, category = $category, $($arg)+)
    };
    ($dispatcher:expr, $($arg:tt)+) => {
        $crate::log!($dispatcher, $crate::Priority::Info, $($arg)+)
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($dispatcher:expr, category = $category:expr, $($arg:tt)+) => {
        $crate::log!($dispatcher, $crate::Priority::Debug, category = $category, $($arg)+)
    };
    ($dispatcher:expr, $($arg:tt)+) => {
        $crate::log!($dispatcher, $crate::Priority::Debug, $($arg)+)
    };
}
