//! Core pipeline types and traits

pub mod chunk;
pub(crate) mod dispatch;
pub mod error;
pub mod formatter;
pub mod priority;
pub mod sanitize;
pub mod severity;
pub mod sink;
pub mod tags;

pub mod logger;

pub use chunk::chunk;
pub use error::{LoggerError, Result};
pub use formatter::{Formatter, TagFormatter};
pub use logger::{Logger, LoggerBuilder, NO_PRODUCER};
pub use priority::{Facility, Options, Priority, PriorityMask};
pub use sanitize::clean;
pub use severity::Severity;
pub use sink::{Session, Sink};
pub use tags::TagStack;
