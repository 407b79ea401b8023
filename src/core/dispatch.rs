//! Synchronized delivery of formatted records to the sink.
//!
//! The underlying transport admits one session at a time process-wide, so a
//! single lock, owned by this module, serializes every dispatch from every
//! [`Logger`](crate::core::Logger) instance. A thread blocks on the lock
//! until the dispatch in flight completes; chunks of one record are never
//! interleaved with chunks of another.

use crate::core::chunk::chunk;
use crate::core::error::Result;
use crate::core::priority::{Facility, Options, Priority, PriorityMask};
use crate::core::sanitize::clean;
use crate::core::severity::Severity;
use crate::core::sink::Sink;
use parking_lot::Mutex;
use std::sync::Arc;

/// The process-wide dispatch lock, shared by all dispatchers.
static DISPATCH_LOCK: Mutex<()> = Mutex::new(());

/// Everything the dispatcher needs from the logger for one record.
pub(crate) struct Record<'a> {
    pub severity: Severity,
    /// Resolved source name; the session opens under this, not the
    /// logger's configured ident.
    pub source: &'a str,
    pub options: Options,
    pub facility: Option<Facility>,
    /// The logger's configured minimum level, for the admission mask.
    pub level: Severity,
    pub max_octets: Option<usize>,
}

/// Orchestrates sanitizer, chunker and sink behind the dispatch lock.
pub(crate) struct Dispatcher {
    sink: Arc<dyn Sink>,
}

impl Dispatcher {
    pub(crate) fn new(sink: Arc<dyn Sink>) -> Self {
        Self { sink }
    }

    /// Deliver one formatted record: open a session, set the admission
    /// mask, write one sanitized chunk per `log` call, close the session.
    ///
    /// No retry and no buffering; a sink failure propagates to the logging
    /// caller unchanged. The lock guard and the session are both scoped to
    /// this call, so they are released on every exit path.
    pub(crate) fn dispatch(&self, record: Record<'_>, formatted: &str) -> Result<()> {
        let _guard = DISPATCH_LOCK.lock();

        let mut session = self
            .sink
            .open(record.source, record.options, record.facility)?;
        session.set_mask(PriorityMask::up_to(record.level));

        let priority = Priority::for_severity(record.severity);
        let text = clean(formatted);
        for piece in chunk(&text, record.max_octets) {
            session.log(priority, &piece)?;
        }
        Ok(())
    }
}
