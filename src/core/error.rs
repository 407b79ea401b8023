//! Error types for the logging pipeline

pub type Result<T> = std::result::Result<T, LoggerError>;

/// Only two error kinds originate in this crate: gating, formatting,
/// sanitizing and chunking are total functions and never fail.
#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// The level setter was given something that is not a severity name
    #[error("invalid logger level `{0}`")]
    InvalidLevel(String),

    /// The sink failed while opening a session or writing a record.
    /// Propagated to the logging caller unchanged; never retried.
    #[error("syslog sink failure while {operation}: {source}")]
    SinkFailure {
        operation: String,
        #[source]
        source: std::io::Error,
    },
}

impl LoggerError {
    /// Create a sink failure with the operation that was underway.
    pub fn sink(operation: impl Into<String>, source: std::io::Error) -> Self {
        LoggerError::SinkFailure {
            operation: operation.into(),
            source,
        }
    }
}
