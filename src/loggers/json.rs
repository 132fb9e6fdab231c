//! JSON lines logger
//!
//! Each entry is serialized as a single JSON object, one per line, so the
//! file can be consumed by log aggregation tools.

use crate::core::{LogEntry, Logger, LoggerError, LoggerOptions, Result};
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

pub const TYPE_NAME: &str = "json";

pub const DEFAULT_JSON_FILE: &str = "log.jsonl";

pub struct JsonLogger {
    path: PathBuf,
    writer: BufWriter<File>,
    pretty: bool,
}

impl JsonLogger {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                LoggerError::io_operation(
                    "creating log directory",
                    format!("cannot create '{}'", parent.display()),
                    e,
                )
            })?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| {
                LoggerError::io_operation(
                    "opening log file",
                    format!("cannot open '{}'", path.display()),
                    e,
                )
            })?;

        Ok(Self {
            path,
            writer: BufWriter::new(file),
            pretty: false,
        })
    }

    /// Build from registry options
    ///
    /// Reads `json_file`, `json_file_path` and `json_pretty`.
    pub fn from_options(options: &LoggerOptions) -> Result<Self> {
        let file = options
            .get_str(TYPE_NAME, "json_file")?
            .unwrap_or(DEFAULT_JSON_FILE);
        let dir = options.get_str(TYPE_NAME, "json_file_path")?.unwrap_or(".");
        let pretty = options.get_bool(TYPE_NAME, "json_pretty", false)?;

        Ok(Self::new(Path::new(dir).join(file))?.with_pretty(pretty))
    }

    /// Pretty-printed output spans several lines per entry
    #[must_use]
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Logger for JsonLogger {
    fn process(&mut self, entry: &LogEntry) -> Result<()> {
        let json = if self.pretty {
            serde_json::to_string_pretty(entry)?
        } else {
            serde_json::to_string(entry)?
        };

        writeln!(self.writer, "{}", json)?;
        self.writer.flush()?;
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
