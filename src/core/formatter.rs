//! Record formatting.
//!
//! A [`Formatter`] turns the resolved pieces of a log call into the final
//! text handed to the dispatcher. The active tags are passed in explicitly
//! rather than read from ambient thread-local state, so a substituted
//! formatter sees exactly what the default one does. Whatever a formatter
//! returns is still sanitized and chunked downstream; substituting one
//! cannot bypass either.

use crate::core::severity::Severity;
use chrono::{DateTime, Local};

pub trait Formatter: Send + Sync {
    fn format(
        &self,
        severity: Severity,
        timestamp: DateTime<Local>,
        source: &str,
        tags: &[String],
        message: &str,
    ) -> String;
}

/// The default formatter: each active tag as a bracketed prefix in stack
/// order, then the message. Severity, timestamp and source are ignored;
/// the sink carries those out-of-band.
#[derive(Debug, Clone, Copy, Default)]
pub struct TagFormatter;

impl Formatter for TagFormatter {
    fn format(
        &self,
        _severity: Severity,
        _timestamp: DateTime<Local>,
        _source: &str,
        tags: &[String],
        message: &str,
    ) -> String {
        let mut out = String::new();
        for tag in tags {
            out.push('[');
            out.push_str(tag);
            out.push_str("] ");
        }
        out.push_str(message);
        out
    }
}
