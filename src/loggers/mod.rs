//! Built-in logger back-ends
//!
//! | type name       | logger                  |
//! |-----------------|-------------------------|
//! | `echo`          | [`EchoLogger`]          |
//! | `formattedtext` | [`FormattedTextLogger`] |
//! | `w3c`           | [`W3cLogger`]           |
//! | `json`          | [`JsonLogger`]          |

pub mod echo;
pub mod formatted_text;
pub mod json;
pub mod w3c;

pub use echo::EchoLogger;
pub use formatted_text::{EntryFormat, FormattedTextLogger};
pub use json::JsonLogger;
pub use w3c::W3cLogger;

use crate::core::{ConfigurationRegistry, Logger, LoggerOptions, Result};

fn build_echo(options: &LoggerOptions) -> Result<Box<dyn Logger>> {
    Ok(Box::new(EchoLogger::from_options(options)?))
}

fn build_formatted_text(options: &LoggerOptions) -> Result<Box<dyn Logger>> {
    Ok(Box::new(FormattedTextLogger::from_options(options)?))
}

fn build_w3c(options: &LoggerOptions) -> Result<Box<dyn Logger>> {
    Ok(Box::new(W3cLogger::from_options(options)?))
}

fn build_json(options: &LoggerOptions) -> Result<Box<dyn Logger>> {
    Ok(Box::new(JsonLogger::from_options(options)?))
}

/// Register every built-in logger type with `registry`
pub fn register_builtin(registry: &mut ConfigurationRegistry) {
    registry.register_type(echo::TYPE_NAME, build_echo);
    registry.register_type(formatted_text::TYPE_NAME, build_formatted_text);
    registry.register_type(w3c::TYPE_NAME, build_w3c);
    registry.register_type(json::TYPE_NAME, build_json);
}
