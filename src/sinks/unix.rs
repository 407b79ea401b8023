//! Delivery to the local syslog daemon over a Unix datagram socket.

use crate::core::error::{LoggerError, Result};
use crate::core::priority::{Facility, Options, Priority, PriorityMask};
use crate::core::sink::{Session, Sink};
use chrono::Local;
use std::io::Write;
use std::os::unix::net::UnixDatagram;
use std::path::PathBuf;

/// Where syslogd listens on common systems.
const SYSLOG_PATHS: [&str; 2] = ["/dev/log", "/var/run/syslog"];

/// A [`Sink`] that sends BSD-syslog datagrams to the local daemon.
///
/// Each session connects its own socket, sends one datagram per record in
/// the form `<pri>timestamp ident[pid]: text`, and disconnects on drop.
/// The admission mask is applied client-side, as `syslog(3)` does.
#[derive(Debug, Clone, Default)]
pub struct UnixSink {
    path: Option<PathBuf>,
}

impl UnixSink {
    /// A sink over the default daemon socket (`/dev/log`, falling back to
    /// `/var/run/syslog`).
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink over a specific socket path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    fn connect(&self) -> std::io::Result<UnixDatagram> {
        let socket = UnixDatagram::unbound()?;
        match &self.path {
            Some(path) => socket.connect(path)?,
            None => {
                let mut last = None;
                for path in SYSLOG_PATHS {
                    match socket.connect(path) {
                        Ok(()) => return Ok(socket),
                        Err(err) => last = Some(err),
                    }
                }
                return Err(last.unwrap_or_else(|| {
                    std::io::Error::new(std::io::ErrorKind::NotFound, "no syslog socket")
                }));
            }
        }
        Ok(socket)
    }
}

impl Sink for UnixSink {
    fn open(
        &self,
        ident: &str,
        options: Options,
        facility: Option<Facility>,
    ) -> Result<Box<dyn Session + '_>> {
        let socket = self
            .connect()
            .map_err(|err| LoggerError::sink("opening syslog socket", err))?;
        Ok(Box::new(UnixSession {
            socket,
            ident: ident.to_string(),
            options,
            facility: facility.unwrap_or_default(),
            mask: PriorityMask::ALL,
        }))
    }
}

struct UnixSession {
    socket: UnixDatagram,
    ident: String,
    options: Options,
    facility: Facility,
    mask: PriorityMask,
}

impl UnixSession {
    fn tag(&self) -> String {
        if self.options.contains(Options::PID) {
            format!("{}[{}]", self.ident, std::process::id())
        } else {
            self.ident.clone()
        }
    }
}

impl Session for UnixSession {
    fn set_mask(&mut self, mask: PriorityMask) {
        self.mask = mask;
    }

    fn log(&mut self, priority: Priority, text: &str) -> Result<()> {
        if !self.mask.admits(priority) {
            return Ok(());
        }

        let tag = self.tag();
        if self.options.contains(Options::PERROR) {
            let _ = writeln!(std::io::stderr(), "{}: {}", tag, text);
        }

        let pri = self.facility as u8 | priority as u8;
        let frame = format!(
            "<{}>{} {}: {}",
            pri,
            Local::now().format("%b %e %H:%M:%S"),
            tag,
            text
        );
        match self.socket.send(frame.as_bytes()) {
            Ok(_) => Ok(()),
            // CONS: the record goes to the console rather than being lost
            // when the daemon cannot be reached mid-session.
            Err(_) if self.options.contains(Options::CONS) => {
                let _ = writeln!(std::io::stderr(), "{}", frame);
                Ok(())
            }
            Err(err) => Err(LoggerError::sink("writing syslog record", err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::os::unix::net::UnixDatagram;

    fn receiver(dir: &std::path::Path) -> (UnixDatagram, PathBuf) {
        let path = dir.join("log.sock");
        (UnixDatagram::bind(&path).unwrap(), path)
    }

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("syslogger-{}-{}", name, std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_open_fails_without_daemon() {
        let sink = UnixSink::with_path("/nonexistent/syslog.sock");
        let err = sink
            .open("app", Options::NONE, None)
            .map(|_| ())
            .unwrap_err();
        assert!(matches!(err, LoggerError::SinkFailure { .. }));
    }

    #[test]
    fn test_frame_format() {
        let dir = temp_dir("frame");
        let (server, path) = receiver(&dir);
        let sink = UnixSink::with_path(&path);

        let mut session = sink
            .open("my_app", Options::NONE, Some(Facility::User))
            .unwrap();
        session.log(Priority::Info, "hello").unwrap();

        let mut buf = [0u8; 1024];
        let n = server.recv(&mut buf).unwrap();
        let frame = std::str::from_utf8(&buf[..n]).unwrap();
        // user.info => PRI 14; no PID option, so a bare ident tag.
        assert!(frame.starts_with("<14>"), "frame: {}", frame);
        assert!(frame.ends_with(" my_app: hello"), "frame: {}", frame);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_pid_option_appends_pid() {
        let dir = temp_dir("pid");
        let (server, path) = receiver(&dir);
        let sink = UnixSink::with_path(&path);

        let mut session = sink.open("my_app", Options::PID, None).unwrap();
        session.log(Priority::Warning, "watch out").unwrap();

        let mut buf = [0u8; 1024];
        let n = server.recv(&mut buf).unwrap();
        let frame = std::str::from_utf8(&buf[..n]).unwrap();
        let expected_tag = format!("my_app[{}]: watch out", std::process::id());
        assert!(frame.ends_with(&expected_tag), "frame: {}", frame);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_mask_applied_client_side() {
        let dir = temp_dir("mask");
        let (server, path) = receiver(&dir);
        let sink = UnixSink::with_path(&path);

        let mut session = sink.open("my_app", Options::NONE, None).unwrap();
        session.set_mask(PriorityMask::up_to(crate::core::Severity::Warn));
        session.log(Priority::Debug, "filtered").unwrap();
        session.log(Priority::Err, "kept").unwrap();

        let mut buf = [0u8; 1024];
        let n = server.recv(&mut buf).unwrap();
        let frame = std::str::from_utf8(&buf[..n]).unwrap();
        assert!(frame.ends_with("kept"), "frame: {}", frame);

        let _ = std::fs::remove_dir_all(&dir);
    }
}
