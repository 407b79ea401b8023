//! # Syslogger
//!
//! A severity-gated, tag-aware logging pipeline that delivers sanitized,
//! length-bounded records to a syslog sink under mutual exclusion.
//!
//! ## Features
//!
//! - **Severity Gating**: six ordered levels; rejected calls cost nothing
//!   and never evaluate a lazy message
//! - **Tagged Output**: per-thread, per-logger tag stacks with scoped push/pop
//! - **Sink Safety**: newline escaping, percent doubling, ANSI stripping and
//!   octet-bounded chunking that never splits an escape
//! - **One Session at a Time**: every dispatch in the process is serialized
//!   behind a single lock, matching a transport that cannot share sessions
//!
//! ```
//! use syslogger::prelude::*;
//! use std::sync::Arc;
//!
//! let sink = MemorySink::new();
//! let logger = Logger::builder(Arc::new(sink.clone()))
//!     .ident("my_app")
//!     .level(Severity::Info)
//!     .build();
//!
//! logger.tagged(["startup"], |logger| logger.info("ready"))?;
//! assert_eq!(sink.messages(), ["[startup] ready"]);
//! # Ok::<(), syslogger::LoggerError>(())
//! ```

pub mod core;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        Facility, Formatter, Logger, LoggerBuilder, LoggerError, Options, Priority, PriorityMask,
        Result, Session, Severity, Sink, TagFormatter, TagStack, NO_PRODUCER,
    };
    pub use crate::sinks::MemorySink;
    #[cfg(unix)]
    pub use crate::sinks::UnixSink;
}

pub use crate::core::{
    chunk, clean, Facility, Formatter, Logger, LoggerBuilder, LoggerError, Options, Priority,
    PriorityMask, Result, Session, Severity, Sink, TagFormatter, TagStack, NO_PRODUCER,
};
pub use crate::sinks::{MemorySink, SessionRecord};
#[cfg(unix)]
pub use crate::sinks::UnixSink;
