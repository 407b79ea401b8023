//! Integration tests for the logging pipeline
//!
//! These tests verify:
//! - Severity gating and lazy message short-circuiting
//! - Priority mapping and session admission masks
//! - Sanitization and chunking on the dispatch path
//! - Tagged output and custom formatters
//! - Sink failure propagation

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use syslogger::core::NO_PRODUCER;
use syslogger::prelude::*;
use syslogger::SessionRecord;

fn logger_over(sink: &MemorySink) -> Logger {
    Logger::builder(Arc::new(sink.clone())).ident("my_app").build()
}

#[test]
fn test_default_open_parameters() {
    let sink = MemorySink::new();
    let logger = Logger::new(Arc::new(sink.clone()));
    logger.warn("Some message").unwrap();

    let sessions = sink.sessions();
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0].options, Options::PID | Options::CONS);
    assert_eq!(sessions[0].facility, None);
    assert_eq!(sessions[0].entries, [(Priority::Warning, "Some message".to_string())]);
}

#[test]
fn test_configured_open_parameters() {
    let sink = MemorySink::new();
    let logger = Logger::builder(Arc::new(sink.clone()))
        .ident("my_app")
        .options(Options::PID)
        .facility(Facility::User)
        .build();
    logger.warn("Some message").unwrap();

    let session = &sink.sessions()[0];
    assert_eq!(session.ident, "my_app");
    assert_eq!(session.options, Options::PID);
    assert_eq!(session.facility, Some(Facility::User));
}

#[test]
fn test_each_severity_maps_to_its_priority() {
    let cases = [
        (Severity::Debug, Priority::Debug),
        (Severity::Info, Priority::Info),
        (Severity::Warn, Priority::Warning),
        (Severity::Error, Priority::Err),
        (Severity::Fatal, Priority::Crit),
        (Severity::Unknown, Priority::Alert),
    ];
    for (severity, priority) in cases {
        let sink = MemorySink::new();
        let mut logger = logger_over(&sink);
        logger.set_level(severity);
        logger.log(severity, "Some message").unwrap();
        assert_eq!(sink.records(), [(priority, "Some message".to_string())]);
    }
}

#[test]
fn test_session_mask_tracks_logger_level() {
    let sink = MemorySink::new();
    let mut logger = logger_over(&sink);
    logger.set_level(Severity::Warn);
    logger.error("admitted").unwrap();
    assert_eq!(sink.sessions()[0].mask, PriorityMask::up_to(Severity::Warn));
}

#[test]
fn test_gated_severities_touch_no_sink() {
    let sink = MemorySink::new();
    let mut logger = logger_over(&sink);
    logger.set_level(Severity::Fatal);

    logger.debug("no").unwrap();
    logger.info("no").unwrap();
    logger.warn("no").unwrap();
    logger.error("no").unwrap();
    assert_eq!(sink.session_count(), 0);

    logger.fatal("yes").unwrap();
    logger.unknown("yes").unwrap();
    assert_eq!(sink.session_count(), 2);
}

#[test]
fn test_gate_short_circuits_before_producer() {
    let sink = MemorySink::new();
    let mut logger = logger_over(&sink);
    logger.set_level(Severity::Fatal);

    let evaluated = AtomicBool::new(false);
    logger
        .warn_with(None, || {
            evaluated.store(true, Ordering::SeqCst);
            "expensive".to_string()
        })
        .unwrap();
    assert!(!evaluated.load(Ordering::SeqCst));
    assert_eq!(sink.session_count(), 0);
}

#[test]
fn test_lazy_message_with_source_override() {
    let sink = MemorySink::new();
    let logger = logger_over(&sink);
    logger
        .info_with(Some("Woah"), || "Some message that really needs a block".to_string())
        .unwrap();

    let session = &sink.sessions()[0];
    assert_eq!(session.ident, "Woah");
    assert_eq!(
        session.entries,
        [(Priority::Info, "Some message that really needs a block".to_string())]
    );
}

#[test]
fn test_percents_doubled_on_the_wire() {
    let sink = MemorySink::new();
    let logger = logger_over(&sink);
    logger.info("%me%ssage%").unwrap();
    assert_eq!(sink.records(), [(Priority::Info, "%%me%%ssage%%".to_string())]);
    assert_eq!(sink.session_count(), 1);
}

#[test]
fn test_message_stripped() {
    let sink = MemorySink::new();
    let logger = logger_over(&sink);
    logger.info("\n\nmessage  ").unwrap();
    assert_eq!(sink.messages(), ["message"]);
}

#[test]
fn test_chunking_over_the_octet_limit() {
    let sink = MemorySink::new();
    let mut logger = logger_over(&sink);
    logger.set_max_octets(Some(480));
    logger.info("a".repeat(960)).unwrap();

    let session = &sink.sessions()[0];
    assert_eq!(session.entries.len(), 2);
    for (priority, piece) in &session.entries {
        assert_eq!(*priority, Priority::Info);
        assert_eq!(piece.len(), 480);
        assert!(piece.bytes().all(|b| b == b'a'));
    }
}

#[test]
fn test_message_splitting_on_an_escape() {
    // 99 bytes of filler, then a percent that sanitizes to an escape pair
    // straddling the chunk boundary.
    let sink = MemorySink::new();
    let mut logger = logger_over(&sink);
    logger.set_max_octets(Some(100));

    let mut msg = "A".repeat(99);
    msg.push_str("%BBB");
    logger.info(msg).unwrap();

    let pieces = sink.messages();
    assert_eq!(pieces.concat(), format!("{}%%BBB", "A".repeat(99)));
    for piece in &pieces[..pieces.len() - 1] {
        assert!(!piece.ends_with('%') && !piece.ends_with('\\'));
    }
}

#[test]
fn test_tagged_output_is_sanitized() {
    let sink = MemorySink::new();
    let logger = logger_over(&sink);
    logger.tagged(["t%a%g"], |logger| {
        logger.tagged(["it"], |logger| logger.info("message"))
    })
    .unwrap();
    assert_eq!(sink.messages(), ["[t%%a%%g] [it] message"]);
}

#[test]
fn test_substituted_formatter_is_still_cleaned() {
    struct Exclaiming;
    impl Formatter for Exclaiming {
        fn format(
            &self,
            _severity: Severity,
            _timestamp: chrono::DateTime<chrono::Local>,
            _source: &str,
            _tags: &[String],
            message: &str,
        ) -> String {
            format!("test {}!", message)
        }
    }

    let sink = MemorySink::new();
    let logger = Logger::builder(Arc::new(sink.clone()))
        .ident("my_app")
        .formatter(Exclaiming)
        .build();
    logger.info("me%ssage").unwrap();
    assert_eq!(sink.messages(), ["test me%%ssage!"]);
}

#[test]
fn test_empty_record_dispatches() {
    let sink = MemorySink::new();
    let logger = logger_over(&sink);
    logger.add(Severity::Info, None, None, NO_PRODUCER).unwrap();
    assert_eq!(sink.records(), [(Priority::Info, String::new())]);
}

#[test]
fn test_sink_failures_propagate_unmodified() {
    struct RefusingSink;
    impl Sink for RefusingSink {
        fn open(
            &self,
            _ident: &str,
            _options: Options,
            _facility: Option<Facility>,
        ) -> syslogger::Result<Box<dyn Session + '_>> {
            Err(LoggerError::sink(
                "opening session",
                std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "no daemon"),
            ))
        }
    }

    let logger = Logger::builder(Arc::new(RefusingSink)).ident("my_app").build();
    let err = logger.warn("Some message").unwrap_err();
    assert!(matches!(err, LoggerError::SinkFailure { .. }));

    // A gated call never reaches the failing sink.
    logger.debug("never dispatched").unwrap();
}

#[test]
fn test_write_failure_propagates_mid_dispatch() {
    struct FailingSession;
    impl Session for FailingSession {
        fn set_mask(&mut self, _mask: PriorityMask) {}
        fn log(&mut self, _priority: Priority, _text: &str) -> syslogger::Result<()> {
            Err(LoggerError::sink(
                "writing record",
                std::io::Error::new(std::io::ErrorKind::BrokenPipe, "gone"),
            ))
        }
    }
    struct FailingSink;
    impl Sink for FailingSink {
        fn open(
            &self,
            _ident: &str,
            _options: Options,
            _facility: Option<Facility>,
        ) -> syslogger::Result<Box<dyn Session + '_>> {
            Ok(Box::new(FailingSession))
        }
    }

    let logger = Logger::builder(Arc::new(FailingSink)).build();
    assert!(logger.error("boom").is_err());
}

#[test]
fn test_session_record_snapshot_is_complete() {
    let sink = MemorySink::new();
    let mut logger = Logger::builder(Arc::new(sink.clone()))
        .ident("my_app")
        .options(Options::PID)
        .facility(Facility::Local2)
        .build();
    logger.set_level(Severity::Info);
    logger.info("hello").unwrap();

    assert_eq!(
        sink.sessions(),
        [SessionRecord {
            ident: "my_app".to_string(),
            options: Options::PID,
            facility: Some(Facility::Local2),
            mask: PriorityMask::up_to(Severity::Info),
            entries: vec![(Priority::Info, "hello".to_string())],
        }]
    );
}
