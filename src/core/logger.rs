//! The logger facade.

use crate::core::dispatch::{Dispatcher, Record};
use crate::core::error::Result;
use crate::core::formatter::{Formatter, TagFormatter};
use crate::core::priority::{Facility, Options};
use crate::core::severity::Severity;
use crate::core::sink::Sink;
use crate::core::tags::{PopGuard, TagStack};
use chrono::Local;
use std::sync::Arc;

/// A severity-gated logger delivering tagged, sanitized, length-bounded
/// records to a syslog sink.
///
/// Instances are independently configurable and do not share configuration,
/// but all instances in the process share one dispatch lock: the underlying
/// transport holds a single session at a time, so dispatches are serialized
/// process-wide.
///
/// Logging takes `&self`; configuration setters take `&mut self`. A logger
/// wrapped in an `Arc` can be shared across threads, in which case each
/// thread keeps its own tag stack.
///
/// # Examples
///
/// ```
/// use syslogger::prelude::*;
/// use std::sync::Arc;
///
/// let sink = MemorySink::new();
/// let logger = Logger::builder(Arc::new(sink.clone()))
///     .ident("my_app")
///     .facility(Facility::Local0)
///     .level(Severity::Info)
///     .build();
///
/// logger.warn("disk space low")?;
/// logger.debug("not admitted at INFO")?;
/// assert_eq!(sink.session_count(), 1);
/// # Ok::<(), syslogger::LoggerError>(())
/// ```
pub struct Logger {
    ident: String,
    options: Options,
    facility: Option<Facility>,
    level: Severity,
    max_octets: Option<usize>,
    formatter: Box<dyn Formatter>,
    dispatcher: Dispatcher,
    tags: TagStack,
}

impl Logger {
    /// Create a logger over `sink` with the default configuration: the
    /// current executable's name as ident, `PID | CONS` options, no
    /// facility, level `Info`, no chunk limit, the tag formatter.
    pub fn new(sink: Arc<dyn Sink>) -> Self {
        Self {
            ident: program_name(),
            options: Options::default(),
            facility: None,
            level: Severity::Info,
            max_octets: None,
            formatter: Box::new(TagFormatter),
            dispatcher: Dispatcher::new(sink),
            tags: TagStack::new(),
        }
    }

    /// Create a builder over `sink`.
    pub fn builder(sink: Arc<dyn Sink>) -> LoggerBuilder {
        LoggerBuilder::new(sink)
    }

    /// Convenience constructor over the local syslog daemon.
    #[cfg(unix)]
    pub fn to_syslog() -> Self {
        Self::new(Arc::new(crate::sinks::UnixSink::new()))
    }

    // --- configuration -----------------------------------------------------

    pub fn ident(&self) -> &str {
        &self.ident
    }

    /// Change the ident string; takes effect on the next dispatch.
    pub fn set_ident(&mut self, ident: impl Into<String>) {
        self.ident = ident.into();
    }

    pub fn options(&self) -> Options {
        self.options
    }

    pub fn set_options(&mut self, options: Options) {
        self.options = options;
    }

    pub fn facility(&self) -> Option<Facility> {
        self.facility
    }

    pub fn set_facility(&mut self, facility: Option<Facility>) {
        self.facility = facility;
    }

    /// The configured minimum severity. Always a [`Severity`].
    pub fn level(&self) -> Severity {
        self.level
    }

    /// Set the minimum severity directly.
    pub fn set_level(&mut self, level: Severity) {
        self.level = level;
    }

    /// Set the minimum severity by symbolic name (`"warn"`, `"ERROR"`, …).
    ///
    /// Anything that does not resolve to one of the six severities is
    /// [`InvalidLevel`](crate::core::LoggerError::InvalidLevel); the level
    /// is never silently coerced.
    pub fn set_level_by_name(&mut self, name: &str) -> Result<()> {
        self.level = Severity::from_name(name)?;
        Ok(())
    }

    pub fn max_octets(&self) -> Option<usize> {
        self.max_octets
    }

    /// Set the chunk limit in bytes. `None` (or zero) disables chunking.
    pub fn set_max_octets(&mut self, max_octets: Option<usize>) {
        self.max_octets = max_octets.filter(|n| *n > 0);
    }

    /// Substitute the formatter. Sanitization and chunking still apply to
    /// whatever it produces.
    pub fn set_formatter(&mut self, formatter: Box<dyn Formatter>) {
        self.formatter = formatter;
    }

    // --- the call surface --------------------------------------------------

    /// The generic entry point behind the severity-named wrappers.
    ///
    /// The call is rejected as a successful no-op when `severity` is below
    /// the configured level; the check short-circuits before `producer`
    /// runs, so a deferred message is never built for a discarded record.
    ///
    /// Message resolution: an explicit `message` wins; else `producer` is
    /// invoked; else the record is empty. One disambiguation rule supports
    /// both "log a message" and "log under a source, lazily" through this
    /// single signature: when `message` and `producer` are both absent but
    /// `source` is present, the source argument is the message — a single
    /// argument always supplies the message, never the source override.
    /// `source` otherwise defaults to the configured ident.
    pub fn add<F>(
        &self,
        severity: Severity,
        message: Option<String>,
        source: Option<&str>,
        producer: Option<F>,
    ) -> Result<()>
    where
        F: FnOnce() -> String,
    {
        if severity < self.level {
            return Ok(());
        }

        let mut message = message;
        let mut source = source;
        if message.is_none() && producer.is_none() && source.is_some() {
            message = source.take().map(str::to_string);
        }
        let source = source.unwrap_or(&self.ident);

        let resolved = match message {
            Some(message) => message,
            None => match producer {
                Some(producer) => producer(),
                None => String::new(),
            },
        };

        let formatted = self.formatter.format(
            severity,
            Local::now(),
            source,
            &self.tags.current(),
            &resolved,
        );
        self.dispatcher.dispatch(
            Record {
                severity,
                source,
                options: self.options,
                facility: self.facility,
                level: self.level,
                max_octets: self.max_octets,
            },
            &formatted,
        )
    }

    /// Log `message` at `severity`.
    pub fn log(&self, severity: Severity, message: impl Into<String>) -> Result<()> {
        self.add(severity, Some(message.into()), None, NO_PRODUCER)
    }

    /// Log at `severity` with a lazily produced message, optionally under a
    /// source name other than the configured ident. `producer` only runs if
    /// the record is admitted.
    pub fn log_with<F>(&self, severity: Severity, source: Option<&str>, producer: F) -> Result<()>
    where
        F: FnOnce() -> String,
    {
        self.add(severity, None, source, Some(producer))
    }

    /// Log `message` at `Info`. The stream-style surface (`write`).
    pub fn write(&self, message: impl Into<String>) -> Result<()> {
        self.add(Severity::Info, Some(message.into()), None, NO_PRODUCER)
    }

    #[inline]
    pub fn debug(&self, message: impl Into<String>) -> Result<()> {
        self.log(Severity::Debug, message)
    }

    #[inline]
    pub fn info(&self, message: impl Into<String>) -> Result<()> {
        self.log(Severity::Info, message)
    }

    #[inline]
    pub fn warn(&self, message: impl Into<String>) -> Result<()> {
        self.log(Severity::Warn, message)
    }

    #[inline]
    pub fn error(&self, message: impl Into<String>) -> Result<()> {
        self.log(Severity::Error, message)
    }

    #[inline]
    pub fn fatal(&self, message: impl Into<String>) -> Result<()> {
        self.log(Severity::Fatal, message)
    }

    #[inline]
    pub fn unknown(&self, message: impl Into<String>) -> Result<()> {
        self.log(Severity::Unknown, message)
    }

    #[inline]
    pub fn debug_with<F: FnOnce() -> String>(&self, source: Option<&str>, producer: F) -> Result<()> {
        self.log_with(Severity::Debug, source, producer)
    }

    #[inline]
    pub fn info_with<F: FnOnce() -> String>(&self, source: Option<&str>, producer: F) -> Result<()> {
        self.log_with(Severity::Info, source, producer)
    }

    #[inline]
    pub fn warn_with<F: FnOnce() -> String>(&self, source: Option<&str>, producer: F) -> Result<()> {
        self.log_with(Severity::Warn, source, producer)
    }

    #[inline]
    pub fn error_with<F: FnOnce() -> String>(&self, source: Option<&str>, producer: F) -> Result<()> {
        self.log_with(Severity::Error, source, producer)
    }

    #[inline]
    pub fn fatal_with<F: FnOnce() -> String>(&self, source: Option<&str>, producer: F) -> Result<()> {
        self.log_with(Severity::Fatal, source, producer)
    }

    #[inline]
    pub fn unknown_with<F: FnOnce() -> String>(&self, source: Option<&str>, producer: F) -> Result<()> {
        self.log_with(Severity::Unknown, source, producer)
    }

    // --- level predicates --------------------------------------------------

    /// Whether the configured level admits `severity`.
    fn enabled(&self, severity: Severity) -> bool {
        self.level <= severity
    }

    pub fn debug_enabled(&self) -> bool {
        self.enabled(Severity::Debug)
    }

    pub fn info_enabled(&self) -> bool {
        self.enabled(Severity::Info)
    }

    pub fn warn_enabled(&self) -> bool {
        self.enabled(Severity::Warn)
    }

    pub fn error_enabled(&self) -> bool {
        self.enabled(Severity::Error)
    }

    pub fn fatal_enabled(&self) -> bool {
        self.enabled(Severity::Fatal)
    }

    // --- tags --------------------------------------------------------------

    /// Run `f` with `tags` pushed onto the calling thread's stack.
    ///
    /// Exactly as many entries as were actually pushed are popped when `f`
    /// returns, on every exit path including panics, so nested scopes
    /// restore the prior stack depth even when the inner body fails.
    ///
    /// ```
    /// use syslogger::prelude::*;
    /// use std::sync::Arc;
    ///
    /// let sink = MemorySink::new();
    /// let logger = Logger::builder(Arc::new(sink.clone())).ident("my_app").build();
    /// logger.tagged(["request"], |logger| logger.info("handled"))?;
    /// assert!(logger.current_tags().is_empty());
    /// # Ok::<(), syslogger::LoggerError>(())
    /// ```
    pub fn tagged<I, S, T>(&self, tags: I, f: impl FnOnce(&Logger) -> T) -> T
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let appended = self.tags.push(tags);
        let _guard = PopGuard::new(&self.tags, appended.len());
        f(self)
    }

    /// Push tags onto the calling thread's stack; returns the tags actually
    /// appended (empty and duplicate tags are dropped).
    pub fn push_tags<I, S>(&self, tags: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.push(tags)
    }

    /// Pop the last `n` tags of the calling thread's stack.
    pub fn pop_tags(&self, n: usize) {
        self.tags.pop(n)
    }

    /// Clear the calling thread's tags.
    pub fn clear_tags(&self) {
        self.tags.clear()
    }

    /// The calling thread's active tags, in stack order.
    pub fn current_tags(&self) -> Vec<String> {
        self.tags.current()
    }
}

/// `None` with the producer type pinned, for [`Logger::add`] call sites
/// without a lazy message.
pub const NO_PRODUCER: Option<fn() -> String> = None;

/// The `$0` analogue: the current executable's file name.
fn program_name() -> String {
    std::env::current_exe()
        .ok()
        .and_then(|path| path.file_name().map(|name| name.to_string_lossy().into_owned()))
        .unwrap_or_else(|| "unknown".to_string())
}

/// Builder for constructing a [`Logger`] with a fluent API.
///
/// # Example
/// ```
/// use syslogger::prelude::*;
/// use std::sync::Arc;
///
/// let logger = Logger::builder(Arc::new(MemorySink::new()))
///     .ident("my_app")
///     .options(Options::PID | Options::NDELAY)
///     .facility(Facility::Daemon)
///     .level(Severity::Debug)
///     .max_octets(480)
///     .build();
/// assert_eq!(logger.ident(), "my_app");
/// ```
pub struct LoggerBuilder {
    sink: Arc<dyn Sink>,
    ident: Option<String>,
    options: Options,
    facility: Option<Facility>,
    level: Severity,
    max_octets: Option<usize>,
    formatter: Option<Box<dyn Formatter>>,
}

impl LoggerBuilder {
    pub fn new(sink: Arc<dyn Sink>) -> Self {
        Self {
            sink,
            ident: None,
            options: Options::default(),
            facility: None,
            level: Severity::Info,
            max_octets: None,
            formatter: None,
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn ident(mut self, ident: impl Into<String>) -> Self {
        self.ident = Some(ident.into());
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn facility(mut self, facility: Facility) -> Self {
        self.facility = Some(facility);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, level: Severity) -> Self {
        self.level = level;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn max_octets(mut self, max_octets: usize) -> Self {
        self.max_octets = Some(max_octets);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn formatter<F: Formatter + 'static>(mut self, formatter: F) -> Self {
        self.formatter = Some(Box::new(formatter));
        self
    }

    pub fn build(self) -> Logger {
        let mut logger = Logger::new(self.sink);
        if let Some(ident) = self.ident {
            logger.set_ident(ident);
        }
        logger.set_options(self.options);
        logger.set_facility(self.facility);
        logger.set_level(self.level);
        logger.set_max_octets(self.max_octets);
        if let Some(formatter) = self.formatter {
            logger.set_formatter(formatter);
        }
        logger
    }
}
