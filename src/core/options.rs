//! Logger options and their fingerprints

use super::error::{LoggerError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fmt;

/// Option key selecting the back-end type
pub const LOGGER_TYPE_KEY: &str = "logger";

/// Back-end type used when the options carry no type key
pub const DEFAULT_LOGGER_TYPE: &str = "formattedtext";

/// Identity of one logger configuration
///
/// Hex-encoded SHA-256 of the canonical JSON encoding of the options.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Fingerprint {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Configuration of one logger instance
///
/// Keys are kept sorted so that two option sets with the same content always
/// encode, and therefore fingerprint, identically.
///
/// # Example
///
/// ```
/// use log_dispatch::LoggerOptions;
///
/// let a = LoggerOptions::new().with("logger", "echo");
/// let b: LoggerOptions = [("logger", "echo")].into_iter().collect();
/// assert_eq!(a.fingerprint(), b.fingerprint());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LoggerOptions {
    values: BTreeMap<String, Value>,
}

impl LoggerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an option (builder form)
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.values.iter()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Lower-cased back-end type name, defaulting to `formattedtext`
    pub fn logger_type(&self) -> String {
        match self.values.get(LOGGER_TYPE_KEY) {
            Some(Value::String(name)) if !name.trim().is_empty() => name.trim().to_lowercase(),
            Some(Value::String(_)) | Some(Value::Null) | None => DEFAULT_LOGGER_TYPE.to_string(),
            Some(other) => other.to_string().to_lowercase(),
        }
    }

    /// Read a string option
    ///
    /// Absent and `null` values yield `Ok(None)`; any other non-string value
    /// is a configuration error attributed to `component`.
    pub fn get_str(&self, component: &str, key: &str) -> Result<Option<&str>> {
        match self.values.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(other) => Err(LoggerError::config(
                component,
                format!("option '{}' must be a string, got {}", key, other),
            )),
        }
    }

    /// Read a boolean option; absent means `default`
    pub fn get_bool(&self, component: &str, key: &str, default: bool) -> Result<bool> {
        match self.values.get(key) {
            None | Some(Value::Null) => Ok(default),
            Some(Value::Bool(b)) => Ok(*b),
            Some(other) => Err(LoggerError::config(
                component,
                format!("option '{}' must be a boolean, got {}", key, other),
            )),
        }
    }

    /// Canonical encoding used for fingerprinting
    pub fn canonical_encoding(&self) -> String {
        // BTreeMap keys and serde_json's default (sorted) object map keep
        // nested objects ordered as well.
        serde_json::to_string(&self.values).unwrap_or_default()
    }

    pub fn fingerprint(&self) -> Fingerprint {
        let mut hasher = Sha256::new();
        hasher.update(self.canonical_encoding().as_bytes());
        Fingerprint(hex::encode(hasher.finalize()))
    }
}

impl<K, V> FromIterator<(K, V)> for LoggerOptions
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
