//! Formatted text file logger
//!
//! Appends one line per entry to a text file, laid out by a template of
//! `{FIELD}` placeholders. New files start with a short header naming the
//! fields, in the style of the W3C extended log format.

use crate::core::{LogEntry, Logger, LoggerError, LoggerOptions, Result};
use regex::Regex;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

pub const TYPE_NAME: &str = "formattedtext";

pub const DEFAULT_TEXT_FILE: &str = "error.log";
pub const DEFAULT_ENTRY_FORMAT: &str = "{DATETIME}\t{PRIORITY}\t{CATEGORY}\t{MESSAGE}";

/// Rendered in place of empty or unknown fields
const EMPTY_FIELD: &str = "-";

/// Parsed `{FIELD}` line template
///
/// Known fields are `DATETIME`, `DATE`, `TIME`, `PRIORITY`, `CATEGORY`,
/// `MESSAGE` and `CLIENTIP`; any other name is looked up among the entry's
/// extra fields, case-insensitively.
#[derive(Debug, Clone)]
pub struct EntryFormat {
    template: String,
    fields: Vec<String>,
    placeholder: Regex,
}

impl EntryFormat {
    pub fn parse(template: &str) -> Result<Self> {
        let placeholder = Regex::new(r"\{([A-Za-z0-9_\-]+)\}")
            .map_err(|e| LoggerError::config(TYPE_NAME, e.to_string()))?;

        let fields = placeholder
            .captures_iter(template)
            .map(|caps| caps[1].to_uppercase())
            .collect();

        Ok(Self {
            template: template.to_string(),
            fields,
            placeholder,
        })
    }

    /// Placeholder names in template order, upper-cased
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn render(&self, entry: &LogEntry) -> String {
        self.placeholder
            .replace_all(&self.template, |caps: &regex::Captures<'_>| {
                let value = field_value(&caps[1].to_uppercase(), entry);
                if value.is_empty() {
                    EMPTY_FIELD.to_string()
                } else {
                    value
                }
            })
            .into_owned()
    }
}

fn field_value(name: &str, entry: &LogEntry) -> String {
    match name {
        "DATETIME" => entry.date().to_rfc3339(),
        "DATE" => entry.date().format("%Y-%m-%d").to_string(),
        "TIME" => entry.date().format("%H:%M:%S").to_string(),
        "PRIORITY" => entry.priority().as_str().to_string(),
        "CATEGORY" => entry.category().to_string(),
        "MESSAGE" => entry.message().to_string(),
        "CLIENTIP" => entry.client_ip().unwrap_or_default().to_string(),
        other => entry
            .fields()
            .iter()
            .find(|(key, _)| key.to_uppercase() == other)
            .map(|(_, value)| value.to_string())
            .unwrap_or_default(),
    }
}

pub struct FormattedTextLogger {
    name: String,
    path: PathBuf,
    writer: BufWriter<File>,
    format: EntryFormat,
}

impl FormattedTextLogger {
    /// Open (creating if needed) `path` for appending
    pub fn new(path: impl Into<PathBuf>, format: EntryFormat) -> Result<Self> {
        Self::open(TYPE_NAME, path.into(), format, &[])
    }

    /// Build from registry options
    ///
    /// Reads `text_file`, `text_file_path` and `text_entry_format`.
    pub fn from_options(options: &LoggerOptions) -> Result<Self> {
        Self::from_options_with(options, TYPE_NAME, DEFAULT_TEXT_FILE, DEFAULT_ENTRY_FORMAT, &[])
    }

    pub(crate) fn from_options_with(
        options: &LoggerOptions,
        name: &str,
        default_file: &str,
        default_format: &str,
        directives: &[(&str, &str)],
    ) -> Result<Self> {
        let file = options.get_str(name, "text_file")?.unwrap_or(default_file);
        let dir = options.get_str(name, "text_file_path")?.unwrap_or(".");
        let template = options
            .get_str(name, "text_entry_format")?
            .unwrap_or(default_format);

        Self::open(
            name,
            Path::new(dir).join(file),
            EntryFormat::parse(template)?,
            directives,
        )
    }

    fn open(
        name: &str,
        path: PathBuf,
        format: EntryFormat,
        directives: &[(&str, &str)],
    ) -> Result<Self> {
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
        let is_new = file.metadata()?.len() == 0;

        let mut logger = Self {
            name: name.to_string(),
            path,
            writer: BufWriter::new(file),
            format,
        };
        if is_new {
            logger.write_header(directives)?;
        }
        Ok(logger)
    }

    fn write_header(&mut self, directives: &[(&str, &str)]) -> Result<()> {
        let fields = self
            .format
            .fields()
            .iter()
            .map(|f| f.to_lowercase())
            .collect::<Vec<_>>()
            .join("\t");

        let mut header = String::new();
        for (key, value) in directives {
            header.push_str(&format!("#{}: {}\n", key, value));
        }
        header.push_str(&format!("#Date: {}\n", chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")));
        header.push_str(&format!(
            "#Software: {} {}\n",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION")
        ));
        header.push_str(&format!("#Fields: {}\n", fields));

        self.writer.write_all(header.as_bytes())?;
        self.writer.flush()?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> &EntryFormat {
        &self.format
    }
}

impl Logger for FormattedTextLogger {
    /// Write one line and flush it, so the line is on disk once this returns
    fn process(&mut self, entry: &LogEntry) -> Result<()> {
        let mut line = self.format.render(entry);
        line.push('\n');

        self.writer.write_all(line.as_bytes())?;
        self.writer.flush()?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}
