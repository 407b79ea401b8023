//! Per-thread, per-logger tag stacks.
//!
//! Each [`Logger`](crate::core::Logger) owns one `TagStack`; the stack keeps
//! an explicit map from thread id to that thread's active tags, so two
//! loggers on the same thread have independent stacks and two threads on the
//! same logger never see each other's tags. A thread's entry is created
//! lazily on first use and only ever mutated by its own thread, so the map
//! lock is uncontended in practice.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::thread::{self, ThreadId};

#[derive(Debug, Default)]
pub struct TagStack {
    stacks: Mutex<HashMap<ThreadId, Vec<String>>>,
}

impl TagStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append tags to the calling thread's stack.
    ///
    /// Empty tags are dropped and tags already on the stack are not
    /// duplicated. Returns the tags actually appended, which may be fewer
    /// than supplied (or none).
    pub fn push<I, S>(&self, tags: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut stacks = self.stacks.lock();
        let stack = stacks.entry(thread::current().id()).or_default();
        let mut appended = Vec::new();
        for tag in tags {
            let tag = tag.into();
            if tag.is_empty() || stack.contains(&tag) || appended.contains(&tag) {
                continue;
            }
            appended.push(tag);
        }
        stack.extend(appended.iter().cloned());
        appended
    }

    /// Remove the last `n` entries of the calling thread's stack.
    pub fn pop(&self, n: usize) {
        let mut stacks = self.stacks.lock();
        if let Some(stack) = stacks.get_mut(&thread::current().id()) {
            let keep = stack.len().saturating_sub(n);
            stack.truncate(keep);
        }
    }

    /// Empty the calling thread's stack.
    pub fn clear(&self) {
        let mut stacks = self.stacks.lock();
        if let Some(stack) = stacks.get_mut(&thread::current().id()) {
            stack.clear();
        }
    }

    /// Snapshot of the calling thread's tags, in insertion order.
    pub fn current(&self) -> Vec<String> {
        let stacks = self.stacks.lock();
        stacks
            .get(&thread::current().id())
            .cloned()
            .unwrap_or_default()
    }
}

/// Pops `count` tags when dropped, so scoped tagging releases its tags on
/// every exit path, including panics.
pub(crate) struct PopGuard<'a> {
    stack: &'a TagStack,
    count: usize,
}

impl<'a> PopGuard<'a> {
    pub(crate) fn new(stack: &'a TagStack, count: usize) -> Self {
        Self { stack, count }
    }
}

impl Drop for PopGuard<'_> {
    fn drop(&mut self) {
        self.stack.pop(self.count);
    }
}
