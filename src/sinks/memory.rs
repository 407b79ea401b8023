//! A capturing sink for tests and embedding.

use crate::core::error::Result;
use crate::core::priority::{Facility, Options, Priority, PriorityMask};
use crate::core::sink::{Session, Sink};
use parking_lot::Mutex;
use std::sync::Arc;

/// Everything observed about one opened session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionRecord {
    pub ident: String,
    pub options: Options,
    pub facility: Option<Facility>,
    /// The last mask set on the session.
    pub mask: PriorityMask,
    /// Every admitted `log` call, in order.
    pub entries: Vec<(Priority, String)>,
}

/// A [`Sink`] that records every session and every admitted record in
/// memory. Cloning yields another handle onto the same capture, so a test
/// can keep one handle and give the logger the other.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    sessions: Arc<Mutex<Vec<SessionRecord>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every session opened so far.
    pub fn sessions(&self) -> Vec<SessionRecord> {
        self.sessions.lock().clone()
    }

    pub fn session_count(&self) -> usize {
        self.sessions.lock().len()
    }

    /// All admitted records across all sessions, in dispatch order.
    pub fn records(&self) -> Vec<(Priority, String)> {
        self.sessions
            .lock()
            .iter()
            .flat_map(|session| session.entries.iter().cloned())
            .collect()
    }

    /// The text of every admitted record, in dispatch order.
    pub fn messages(&self) -> Vec<String> {
        self.records().into_iter().map(|(_, text)| text).collect()
    }

    pub fn clear(&self) {
        self.sessions.lock().clear();
    }
}

impl Sink for MemorySink {
    fn open(
        &self,
        ident: &str,
        options: Options,
        facility: Option<Facility>,
    ) -> Result<Box<dyn Session + '_>> {
        let index = {
            let mut sessions = self.sessions.lock();
            sessions.push(SessionRecord {
                ident: ident.to_string(),
                options,
                facility,
                mask: PriorityMask::ALL,
                entries: Vec::new(),
            });
            sessions.len() - 1
        };
        Ok(Box::new(MemorySession {
            sessions: Arc::clone(&self.sessions),
            index,
        }))
    }
}

struct MemorySession {
    sessions: Arc<Mutex<Vec<SessionRecord>>>,
    index: usize,
}

impl Session for MemorySession {
    fn set_mask(&mut self, mask: PriorityMask) {
        self.sessions.lock()[self.index].mask = mask;
    }

    fn log(&mut self, priority: Priority, text: &str) -> Result<()> {
        let mut sessions = self.sessions.lock();
        let session = &mut sessions[self.index];
        if session.mask.admits(priority) {
            session.entries.push((priority, text.to_string()));
        }
        Ok(())
    }
}
