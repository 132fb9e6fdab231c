//! Logger trait for log output back-ends

use super::{error::Result, log_entry::LogEntry, options::LoggerOptions};
use std::sync::Arc;

/// A back-end that records or displays entries
///
/// Implementations are built from [`LoggerOptions`] by a [`LoggerFactory`]
/// registered under a type name, and are only ever driven through
/// [`process`](Logger::process).
pub trait Logger: Send {
    fn process(&mut self, entry: &LogEntry) -> Result<()>;

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str;
}

/// Constructor stored in the registry's type table
pub type LoggerFactory = Arc<dyn Fn(&LoggerOptions) -> Result<Box<dyn Logger>> + Send + Sync>;
