//! Sink implementations
//!
//! The pipeline itself only consumes the [`Sink`](crate::core::Sink)
//! contract; these are the transports the crate ships.

pub mod memory;
#[cfg(unix)]
pub mod unix;

pub use memory::{MemorySink, SessionRecord};
#[cfg(unix)]
pub use unix::UnixSink;
