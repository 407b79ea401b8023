//! Logging macros for ergonomic message formatting.
//!
//! # Examples
//!
//! ```
//! use syslogger::prelude::*;
//! use syslogger::info;
//! use std::sync::Arc;
//!
//! let logger = Logger::builder(Arc::new(MemorySink::new())).build();
//!
//! let port = 8080;
//! info!(logger, "listening on port {}", port)?;
//! # Ok::<(), syslogger::LoggerError>(())
//! ```

/// Log a message at an explicit severity with automatic formatting.
///
/// ```
/// # use syslogger::prelude::*;
/// # use std::sync::Arc;
/// # let logger = Logger::builder(Arc::new(MemorySink::new())).build();
/// use syslogger::log;
/// log!(logger, Severity::Error, "exit code: {}", 3)?;
/// # Ok::<(), syslogger::LoggerError>(())
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $severity:expr, $($arg:tt)+) => {
        $logger.log($severity, format!($($arg)+))
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::Debug, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::Info, $($arg)+)
    };
}

/// Log a warn-level message.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::Warn, $($arg)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::Error, $($arg)+)
    };
}

/// Log a fatal-level message.
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::Fatal, $($arg)+)
    };
}

/// Log an unknown-level message. Unknown ranks above Fatal and is never
/// gated out.
#[macro_export]
macro_rules! unknown {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::Unknown, $($arg)+)
    };
}
