//! Mapping between crate severities and syslog priorities, facilities and
//! open options.
//!
//! The numeric values duplicate the constants in `<syslog.h>` so that sink
//! implementations can splice them directly into wire-format headers
//! (facilities are pre-multiplied by 8, as in the header).

use crate::core::severity::Severity;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// The eight syslog message priorities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Priority {
    /// system is unusable
    Emerg = 0,
    /// action must be taken immediately
    Alert = 1,
    /// critical conditions
    Crit = 2,
    /// error conditions
    Err = 3,
    /// warning conditions
    Warning = 4,
    /// normal, but significant condition
    Notice = 5,
    /// informational message
    Info = 6,
    /// debug-level message
    Debug = 7,
}

impl Priority {
    /// The fixed severity-to-priority table. Total over the six severities;
    /// no error path.
    pub fn for_severity(severity: Severity) -> Priority {
        match severity {
            Severity::Debug => Priority::Debug,
            Severity::Info => Priority::Info,
            Severity::Warn => Priority::Warning,
            Severity::Error => Priority::Err,
            Severity::Fatal => Priority::Crit,
            Severity::Unknown => Priority::Alert,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Priority::Emerg => "LOG_EMERG",
                Priority::Alert => "LOG_ALERT",
                Priority::Crit => "LOG_CRIT",
                Priority::Err => "LOG_ERR",
                Priority::Warning => "LOG_WARNING",
                Priority::Notice => "LOG_NOTICE",
                Priority::Info => "LOG_INFO",
                Priority::Debug => "LOG_DEBUG",
            }
        )
    }
}

/// A session admission mask: one bit per [`Priority`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityMask(u8);

impl PriorityMask {
    /// A mask admitting every priority.
    pub const ALL: PriorityMask = PriorityMask(0xff);

    /// Admit `severity` and everything more severe.
    ///
    /// Severities map to numerically *decreasing* priorities, so this is the
    /// `LOG_UPTO` of the mapped priority.
    pub fn up_to(severity: Severity) -> PriorityMask {
        let pri = Priority::for_severity(severity) as u16;
        PriorityMask(((1u16 << (pri + 1)) - 1) as u8)
    }

    pub fn admits(&self, priority: Priority) -> bool {
        self.0 & (1 << priority as u8) != 0
    }

    pub fn bits(&self) -> u8 {
        self.0
    }
}

/// Facilities a sink may route records by. Opaque to the pipeline; passed
/// verbatim to [`Sink::open`](crate::core::Sink::open). Values are
/// pre-shifted by 3 as in `<syslog.h>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[derive(Default)]
pub enum Facility {
    Kern = 0 << 3,
    #[default]
    User = 1 << 3,
    Mail = 2 << 3,
    Daemon = 3 << 3,
    Auth = 4 << 3,
    Syslog = 5 << 3,
    Lpr = 6 << 3,
    News = 7 << 3,
    Uucp = 8 << 3,
    Cron = 9 << 3,
    Authpriv = 10 << 3,
    Ftp = 11 << 3,
    Local0 = 16 << 3,
    Local1 = 17 << 3,
    Local2 = 18 << 3,
    Local3 = 19 << 3,
    Local4 = 20 << 3,
    Local5 = 21 << 3,
    Local6 = 22 << 3,
    Local7 = 23 << 3,
}

/// Sink-open option flags, passed through verbatim. The bit values duplicate
/// the `LOG_*` option constants in `<syslog.h>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Options(u32);

impl Options {
    pub const NONE: Options = Options(0);
    /// add the process id to each record
    pub const PID: Options = Options(0x01);
    /// write to the console if the sink cannot be reached
    pub const CONS: Options = Options(0x02);
    /// delay connecting until the first record
    pub const ODELAY: Options = Options(0x04);
    /// connect immediately
    pub const NDELAY: Options = Options(0x08);
    pub const NOWAIT: Options = Options(0x10);
    /// also mirror each record to stderr
    pub const PERROR: Options = Options(0x20);

    pub fn bits(&self) -> u32 {
        self.0
    }

    pub fn contains(&self, other: Options) -> bool {
        self.0 & other.0 == other.0
    }
}

impl Default for Options {
    fn default() -> Self {
        Options::PID | Options::CONS
    }
}

impl BitOr for Options {
    type Output = Options;

    fn bitor(self, rhs: Options) -> Options {
        Options(self.0 | rhs.0)
    }
}

impl BitOrAssign for Options {
    fn bitor_assign(&mut self, rhs: Options) {
        self.0 |= rhs.0;
    }
}
