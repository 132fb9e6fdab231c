//! Adapter for loosely typed legacy entries
//!
//! Older call sites hand over either a prepared [`LogEntry`] or a flat
//! key/value mapping such as
//!
//! ```text
//! { "c-ip": "127.0.0.1", "status": "deprecated", "level": 128,
//!   "comment": "Test Entry", "foo": "bar" }
//! ```
//!
//! The input shape is resolved once, here, into a [`LegacyInput`]; nothing
//! past this module deals with untyped values.

use super::log_entry::LogEntry;
use super::priority::Priority;
use serde_json::{Map, Value};

const KEY_CLIENT_IP: &str = "c-ip";
const KEY_CATEGORY: &str = "status";
const KEY_PRIORITY: &str = "level";
const KEY_MESSAGE: &str = "comment";

/// Priority used when a legacy mapping has no `level`
pub const LEGACY_DEFAULT_PRIORITY: Priority = Priority::Debug;

/// Legacy entry input, classified at the adapter boundary
#[derive(Debug, Clone, PartialEq)]
pub enum LegacyInput {
    Mapping(Map<String, Value>),
    Entry(LogEntry),
    /// Scalars, arrays and anything else that is neither a mapping nor an entry
    Invalid(Value),
}

impl LegacyInput {
    /// Translate into a [`LogEntry`]
    ///
    /// Returns `None` for input that the legacy contract rejects: scalars,
    /// and mappings that would produce an entry without a message.
    pub fn into_entry(self) -> Option<LogEntry> {
        match self {
            LegacyInput::Entry(entry) => Some(entry),
            LegacyInput::Invalid(_) => None,
            LegacyInput::Mapping(map) => translate(map),
        }
    }
}

fn translate(map: Map<String, Value>) -> Option<LogEntry> {
    let message = map.get(KEY_MESSAGE).map(value_to_string).unwrap_or_default();
    let priority = map
        .get(KEY_PRIORITY)
        .map(parse_priority)
        .unwrap_or(LEGACY_DEFAULT_PRIORITY);

    let mut entry = LogEntry::new(message, priority).ok()?;

    for (key, value) in map {
        entry = match key.as_str() {
            KEY_MESSAGE | KEY_PRIORITY => entry,
            KEY_CATEGORY => entry.with_category(value_to_string(&value)),
            KEY_CLIENT_IP => entry.with_client_ip(value_to_string(&value)),
            _ => entry.with_field(key, value),
        };
    }

    Some(entry)
}

/// Legacy `level` values are either a severity bit or a severity name;
/// anything else falls back to the regular entry default.
fn parse_priority(value: &Value) -> Priority {
    match value {
        Value::Number(n) => n
            .as_u64()
            .and_then(|bits| u8::try_from(bits).ok())
            .and_then(Priority::from_bits)
            .unwrap_or_default(),
        Value::String(s) => s.parse().unwrap_or_default(),
        _ => Priority::default(),
    }
}

fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

impl From<LogEntry> for LegacyInput {
    fn from(entry: LogEntry) -> Self {
        LegacyInput::Entry(entry)
    }
}

impl From<&LogEntry> for LegacyInput {
    fn from(entry: &LogEntry) -> Self {
        LegacyInput::Entry(entry.clone())
    }
}

impl From<Map<String, Value>> for LegacyInput {
    fn from(map: Map<String, Value>) -> Self {
        LegacyInput::Mapping(map)
    }
}

impl From<Value> for LegacyInput {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => LegacyInput::Mapping(map),
            other => LegacyInput::Invalid(other),
        }
    }
}

impl From<i64> for LegacyInput {
    fn from(value: i64) -> Self {
        LegacyInput::Invalid(value.into())
    }
}

impl From<i32> for LegacyInput {
    fn from(value: i32) -> Self {
        LegacyInput::Invalid(value.into())
    }
}

impl From<f64> for LegacyInput {
    fn from(value: f64) -> Self {
        LegacyInput::Invalid(value.into())
    }
}

impl From<bool> for LegacyInput {
    fn from(value: bool) -> Self {
        LegacyInput::Invalid(value.into())
    }
}

impl From<&str> for LegacyInput {
    fn from(value: &str) -> Self {
        LegacyInput::Invalid(value.into())
    }
}

impl From<String> for LegacyInput {
    fn from(value: String) -> Self {
        LegacyInput::Invalid(value.into())
    }
}
