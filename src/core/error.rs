//! Error types for the dispatch system

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// No constructor is registered for the requested logger type
    #[error("Unable to create a logger of type '{logger_type}': unknown logger type")]
    UnknownLoggerType { logger_type: String },

    /// Entry message was empty after trimming
    #[error("Log entry message must not be empty")]
    EmptyMessage,

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl LoggerError {
    /// Create an unknown logger type error
    pub fn unknown_logger_type(logger_type: impl Into<String>) -> Self {
        LoggerError::UnknownLoggerType {
            logger_type: logger_type.into(),
        }
    }

    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        LoggerError::Other(msg.into())
    }

    /// True for errors caused by logger configuration rather than by a
    /// single entry or a failing write.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            LoggerError::UnknownLoggerType { .. } | LoggerError::InvalidConfiguration { .. }
        )
    }
}
