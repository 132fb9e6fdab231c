//! Core dispatch types and traits

pub mod dispatcher;
pub mod error;
pub mod fields;
pub mod legacy;
pub mod log_entry;
pub mod logger;
pub mod lookup;
pub mod metrics;
pub mod options;
pub mod priority;
pub mod registry;

pub use dispatcher::{Dispatcher, DispatcherBuilder, LoggerRegistration};
pub use error::{LoggerError, Result};
pub use fields::{EntryFields, FieldValue};
pub use legacy::{LegacyInput, LEGACY_DEFAULT_PRIORITY};
pub use log_entry::LogEntry;
pub use logger::{Logger, LoggerFactory};
pub use lookup::{CategorySet, LookupRecord, LookupTable};
pub use metrics::DispatchMetrics;
pub use options::{Fingerprint, LoggerOptions, DEFAULT_LOGGER_TYPE, LOGGER_TYPE_KEY};
pub use priority::{Priority, PriorityMask};
pub use registry::ConfigurationRegistry;
