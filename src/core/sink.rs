//! The sink contract consumed by the dispatcher.
//!
//! The pipeline never talks to a transport directly; it opens a [`Session`]
//! through a [`Sink`], writes prioritized text records, and drops the
//! session. Implementations live in [`crate::sinks`].

use crate::core::error::Result;
use crate::core::priority::{Facility, Options, Priority, PriorityMask};

/// A factory for transport sessions.
pub trait Sink: Send + Sync {
    /// Open a session under `ident`. `options` and `facility` are passed
    /// through verbatim; their meaning belongs to the transport.
    fn open(&self, ident: &str, options: Options, facility: Option<Facility>)
        -> Result<Box<dyn Session + '_>>;
}

/// One open transport session.
///
/// A session is owned exclusively for the duration of a single dispatch and
/// closed by drop, so release is guaranteed on every exit path.
pub trait Session {
    /// Set the admission mask. Records whose priority the mask does not
    /// admit are silently discarded by [`log`](Session::log).
    fn set_mask(&mut self, mask: PriorityMask);

    /// Deliver one prioritized text record.
    fn log(&mut self, priority: Priority, text: &str) -> Result<()>;
}
