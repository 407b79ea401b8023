//! Severity level definitions

use crate::core::error::{LoggerError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The six log severities, totally ordered by increasing importance.
///
/// `Unknown` ranks above `Fatal`: it is the severity of records whose
/// importance cannot be classified and must therefore never be filtered out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[derive(Default)]
pub enum Severity {
    Debug = 0,
    #[default]
    Info = 1,
    Warn = 2,
    Error = 3,
    Fatal = 4,
    Unknown = 5,
}

impl Severity {
    /// All severities in rank order, least severe first.
    pub const ALL: [Severity; 6] = [
        Severity::Debug,
        Severity::Info,
        Severity::Warn,
        Severity::Error,
        Severity::Fatal,
        Severity::Unknown,
    ];

    pub fn to_str(&self) -> &'static str {
        match self {
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
            Severity::Fatal => "FATAL",
            Severity::Unknown => "UNKNOWN",
        }
    }

    /// Resolve a symbolic level name against the fixed severity table.
    ///
    /// Accepts the six level names case-insensitively; anything else is
    /// [`LoggerError::InvalidLevel`]. Used by
    /// [`Logger::set_level_by_name`](crate::core::Logger::set_level_by_name).
    pub fn from_name(name: &str) -> Result<Self> {
        match name.to_ascii_uppercase().as_str() {
            "DEBUG" => Ok(Severity::Debug),
            "INFO" => Ok(Severity::Info),
            "WARN" => Ok(Severity::Warn),
            "ERROR" => Ok(Severity::Error),
            "FATAL" => Ok(Severity::Fatal),
            "UNKNOWN" => Ok(Severity::Unknown),
            _ => Err(LoggerError::InvalidLevel(name.to_string())),
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}
