//! W3C extended log format logger
//!
//! A [`FormattedTextLogger`] preset with a W3C-style column layout and a
//! `#Version` directive at the top of new files.

use super::formatted_text::FormattedTextLogger;
use crate::core::{LogEntry, Logger, LoggerOptions, Result};
use std::path::Path;

pub const TYPE_NAME: &str = "w3c";

pub const DEFAULT_W3C_FILE: &str = "error.w3c.log";
pub const W3C_ENTRY_FORMAT: &str = "{DATE}\t{TIME}\t{PRIORITY}\t{CLIENTIP}\t{CATEGORY}\t{MESSAGE}";

const W3C_DIRECTIVES: &[(&str, &str)] = &[("Version", "1.0")];

pub struct W3cLogger {
    inner: FormattedTextLogger,
}

impl W3cLogger {
    /// Build from registry options
    ///
    /// Accepts the same `text_file`, `text_file_path` and
    /// `text_entry_format` keys as the formatted text logger.
    pub fn from_options(options: &LoggerOptions) -> Result<Self> {
        let inner = FormattedTextLogger::from_options_with(
            options,
            TYPE_NAME,
            DEFAULT_W3C_FILE,
            W3C_ENTRY_FORMAT,
            W3C_DIRECTIVES,
        )?;
        Ok(Self { inner })
    }

    pub fn path(&self) -> &Path {
        self.inner.path()
    }
}

impl Logger for W3cLogger {
    fn process(&mut self, entry: &LogEntry) -> Result<()> {
        self.inner.process(entry)
    }

    fn flush(&mut self) -> Result<()> {
        self.inner.flush()
    }

    fn name(&self) -> &str {
        TYPE_NAME
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Priority;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_w3c_layout() -> Result<()> {
        let dir = tempdir()?;
        let options = LoggerOptions::new()
            .with("logger", "w3c")
            .with("text_file_path", dir.path().to_string_lossy().to_string());

        let mut logger = W3cLogger::from_options(&options)?;
        assert!(logger.path().ends_with(DEFAULT_W3C_FILE));

        let entry = LogEntry::new("Test Entry", Priority::Error)?
            .with_category("deprecated")
            .with_client_ip("127.0.0.1");
        logger.process(&entry)?;
        logger.flush()?;

        let content = fs::read_to_string(logger.path())?;
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "#Version: 1.0");
        assert_eq!(
            lines[3],
            "#Fields: date\ttime\tpriority\tclientip\tcategory\tmessage"
        );
        assert!(lines[4].ends_with("\tERROR\t127.0.0.1\tdeprecated\tTest Entry"));
        Ok(())
    }
}
