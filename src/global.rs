//! Process-wide dispatcher
//!
//! Applications that do not want to pass a [`Dispatcher`] around can use the
//! shared one here. It is created empty on first use and can be replaced,
//! or cleared, with [`set_instance`].
//!
//! ```
//! use log_dispatch::{global, LoggerOptions, Priority, PriorityMask};
//!
//! global::add_logger(
//!     LoggerOptions::new().with("logger", "echo"),
//!     PriorityMask::from(Priority::Emergency),
//!     "boot",
//! );
//! assert_eq!(global::instance().find_loggers(Priority::Emergency, Some("boot")).len(), 1);
//!
//! global::set_instance(None);
//! ```

use crate::core::{
    CategorySet, Dispatcher, Fingerprint, LogEntry, LoggerOptions, Priority, PriorityMask, Result,
};
use parking_lot::RwLock;
use std::sync::Arc;

static INSTANCE: RwLock<Option<Arc<Dispatcher>>> = parking_lot::const_rwlock(None);

/// Replace the shared dispatcher
///
/// `None` clears the slot; the next call that needs a dispatcher creates a
/// fresh, empty one. Handles obtained earlier from [`instance`] keep the
/// dispatcher they point at.
pub fn set_instance(dispatcher: Option<Arc<Dispatcher>>) {
    *INSTANCE.write() = dispatcher;
}

/// The shared dispatcher, created on first use
pub fn instance() -> Arc<Dispatcher> {
    if let Some(dispatcher) = INSTANCE.read().as_ref() {
        return Arc::clone(dispatcher);
    }

    let mut slot = INSTANCE.write();
    let dispatcher = slot.get_or_insert_with(|| {
        tracing::debug!("creating process-wide dispatcher");
        Arc::new(Dispatcher::new())
    });
    Arc::clone(dispatcher)
}

/// [`Dispatcher::add_logger`] on the shared dispatcher
pub fn add_logger(
    options: LoggerOptions,
    priorities: impl Into<PriorityMask>,
    categories: impl Into<CategorySet>,
) -> Fingerprint {
    instance().add_logger(options, priorities, categories)
}

/// [`Dispatcher::add`] on the shared dispatcher
pub fn add(entry: &LogEntry) -> Result<()> {
    instance().add(entry)
}

/// [`Dispatcher::add_message`] on the shared dispatcher
pub fn add_message(
    message: impl Into<String>,
    priority: Priority,
    category: impl AsRef<str>,
) -> Result<()> {
    instance().add_message(message, priority, category)
}
