//! Log entry structure

use super::error::{LoggerError, Result};
use super::fields::{EntryFields, FieldValue};
use super::priority::Priority;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// One immutable log record
///
/// Entries always carry exactly one [`Priority`]; masks are only used on the
/// filter side. Construction rejects blank messages.
///
/// # Example
///
/// ```
/// use log_dispatch::{LogEntry, Priority};
///
/// let entry = LogEntry::new("TESTING", Priority::Debug)
///     .unwrap()
///     .with_category("DePrEcAtEd");
/// assert_eq!(entry.category(), "deprecated");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogEntry {
    message: String,
    priority: Priority,
    category: String,
    date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    client_ip: Option<String>,
    #[serde(skip_serializing_if = "EntryFields::is_empty")]
    fields: EntryFields,
}

impl LogEntry {
    /// Sanitize log message to prevent log injection attacks
    ///
    /// Replaces newlines, carriage returns, and tabs with escape sequences
    /// so a single entry can never forge additional lines in a log file.
    fn sanitize_message(message: &str) -> String {
        message
            .replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t")
    }

    pub(crate) fn normalize_category(category: &str) -> String {
        category.trim().to_lowercase()
    }

    pub fn new(message: impl Into<String>, priority: Priority) -> Result<Self> {
        let message = message.into();
        if message.trim().is_empty() {
            return Err(LoggerError::EmptyMessage);
        }

        Ok(Self {
            message: Self::sanitize_message(&message),
            priority,
            category: String::new(),
            date: Utc::now(),
            client_ip: None,
            fields: EntryFields::new(),
        })
    }

    #[must_use]
    pub fn with_category(mut self, category: impl AsRef<str>) -> Self {
        self.category = Self::normalize_category(category.as_ref());
        self
    }

    #[must_use]
    pub fn with_date(mut self, date: DateTime<Utc>) -> Self {
        self.date = date;
        self
    }

    #[must_use]
    pub fn with_client_ip(mut self, client_ip: impl Into<String>) -> Self {
        self.client_ip = Some(client_ip.into());
        self
    }

    #[must_use]
    pub fn with_field<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.fields.insert(key, value);
        self
    }

    #[must_use]
    pub fn with_fields(mut self, fields: EntryFields) -> Self {
        for (key, value) in fields.iter() {
            self.fields.insert(key.clone(), value.clone());
        }
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    /// Normalized category; empty when the entry has none
    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn date(&self) -> &DateTime<Utc> {
        &self.date
    }

    pub fn client_ip(&self) -> Option<&str> {
        self.client_ip.as_deref()
    }

    pub fn field(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    pub fn fields(&self) -> &EntryFields {
        &self.fields
    }
}
