//! Echo logger: one line per entry on stdout

use crate::core::{LogEntry, Logger, LoggerOptions, Result};
#[cfg(feature = "console")]
use colored::Colorize;
use std::io::Write;

pub const TYPE_NAME: &str = "echo";

/// Writes `PRIORITY: message [category]` lines
///
/// Output goes to stdout unless another writer is supplied, which is how
/// tests and embedding applications capture it.
///
/// # Example
///
/// ```
/// use log_dispatch::loggers::EchoLogger;
/// use log_dispatch::{LogEntry, Logger, Priority};
///
/// let mut out = Vec::new();
/// {
///     let mut echo = EchoLogger::with_writer(&mut out);
///     let entry = LogEntry::new("TESTING", Priority::Debug).unwrap().with_category("deprecated");
///     echo.process(&entry).unwrap();
/// }
/// assert_eq!(String::from_utf8(out).unwrap(), "DEBUG: TESTING [deprecated]\n");
/// ```
pub struct EchoLogger<W: Write + Send = Box<dyn Write + Send>> {
    writer: W,
    use_colors: bool,
}

impl EchoLogger {
    pub fn new() -> Self {
        Self {
            writer: Box::new(std::io::stdout()),
            use_colors: false,
        }
    }

    /// Build from registry options; `echo_colors` enables colored labels
    pub fn from_options(options: &LoggerOptions) -> Result<Self> {
        let use_colors = options.get_bool(TYPE_NAME, "echo_colors", false)?;
        Ok(Self::new().with_colors(use_colors))
    }
}

impl<W: Write + Send> EchoLogger<W> {
    pub fn with_writer(writer: W) -> Self {
        Self {
            writer,
            use_colors: false,
        }
    }

    #[must_use]
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    fn format_line(&self, entry: &LogEntry) -> String {
        let label = self.priority_label(entry);
        if entry.category().is_empty() {
            format!("{}: {}", label, entry.message())
        } else {
            format!("{}: {} [{}]", label, entry.message(), entry.category())
        }
    }

    #[cfg(feature = "console")]
    fn priority_label(&self, entry: &LogEntry) -> String {
        let priority = entry.priority();
        if self.use_colors {
            priority.as_str().color(priority.color_code()).to_string()
        } else {
            priority.as_str().to_string()
        }
    }

    #[cfg(not(feature = "console"))]
    fn priority_label(&self, entry: &LogEntry) -> String {
        entry.priority().as_str().to_string()
    }
}

impl Default for EchoLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write + Send> Logger for EchoLogger<W> {
    fn process(&mut self, entry: &LogEntry) -> Result<()> {
        let line = self.format_line(entry);
        writeln!(self.writer, "{}", line)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        TYPE_NAME
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Priority;

    fn render(entry: &LogEntry) -> String {
        let mut out = Vec::new();
        EchoLogger::with_writer(&mut out).process(entry).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_line_with_category() {
        let entry = LogEntry::new("TESTING", Priority::Debug)
            .unwrap()
            .with_category("DePrEcAtEd");
        assert_eq!(render(&entry), "DEBUG: TESTING [deprecated]\n");
    }

    #[test]
    fn test_line_without_category() {
        let entry = LogEntry::new("disk almost full", Priority::Warning).unwrap();
        assert_eq!(render(&entry), "WARNING: disk almost full\n");
    }

    #[test]
    fn test_from_options() {
        let echo = EchoLogger::from_options(&LoggerOptions::new().with("logger", "echo")).unwrap();
        assert_eq!(echo.name(), "echo");

        let bad = LoggerOptions::new().with("echo_colors", "always");
        assert!(EchoLogger::from_options(&bad).is_err());
    }
}
