//! File-Backed Fix Logs
//!
//! Reads recorded fixes from CSV or JSON-lines files, one fix per line.
//! Recordings come from field captures or are written by hand for demos;
//! either way individual lines can be mangled, so parsing is per-line and
//! a bad line is counted and skipped rather than ending the stream.
//!
//! ## Formats
//!
//! CSV (use [`FixLog::with_skip_lines`] for a header):
//!
//! ```csv
//! timestamp,provider,latitude,longitude,altitude_m,accuracy_m
//! 1000,gps,52.5200,13.4050,34.5,4.0
//! ```
//!
//! JSON lines:
//!
//! ```json
//! {"timestamp":1000,"provider":"gps","latitude":52.52,"longitude":13.405,"altitude_m":34.5,"accuracy_m":4.0}
//! ```
//!
//! Opening a log the process may not read maps `PermissionDenied` to
//! [`LocationError::PermissionRequired`] — this is the single site where
//! an OS-level access failure becomes the user-visible permission state.

use std::fs::File;
use std::io::{self, BufRead, BufReader, ErrorKind};
use std::path::Path;

use crate::errors::LocationError;
use crate::location::{GeoFix, LocationSource, ProviderKind, UpdateRequest};

/// File formats supported by [`FixLog`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Comma-separated values
    Csv,
    /// Line-delimited JSON
    JsonLines,
}

/// Counters for a log read session
#[derive(Debug, Default, Clone)]
pub struct FixLogStats {
    /// Fixes parsed successfully
    pub fixes_read: usize,
    /// Total lines consumed, including bad ones
    pub lines_processed: usize,
    /// Lines that failed to parse
    pub parse_errors: usize,
}

/// Location source backed by a recorded fix file
#[derive(Debug)]
pub struct FixLog {
    reader: BufReader<File>,
    format: LogFormat,
    subscribed: bool,
    exhausted: bool,
    skip_lines: usize,
    lines_skipped: usize,
    stats: FixLogStats,
}

impl FixLog {
    /// Open a fix log
    ///
    /// An OS permission refusal becomes `PermissionRequired`; any other
    /// I/O failure is a transport error.
    pub fn open<P: AsRef<Path>>(
        path: P,
        format: LogFormat,
    ) -> Result<Self, LocationError<io::Error>> {
        let file = File::open(path).map_err(|e| {
            if e.kind() == ErrorKind::PermissionDenied {
                LocationError::PermissionRequired
            } else {
                LocationError::Transport(e)
            }
        })?;

        Ok(Self {
            reader: BufReader::new(file),
            format,
            subscribed: false,
            exhausted: false,
            skip_lines: 0,
            lines_skipped: 0,
            stats: FixLogStats::default(),
        })
    }

    /// Open a CSV fix log
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<Self, LocationError<io::Error>> {
        Self::open(path, LogFormat::Csv)
    }

    /// Open a JSON-lines fix log
    pub fn from_jsonl<P: AsRef<Path>>(path: P) -> Result<Self, LocationError<io::Error>> {
        Self::open(path, LogFormat::JsonLines)
    }

    /// Skip the first N lines (CSV headers)
    pub fn with_skip_lines(mut self, lines: usize) -> Self {
        self.skip_lines = lines;
        self
    }

    /// Read-session counters
    pub fn stats(&self) -> &FixLogStats {
        &self.stats
    }

    fn parse_line(&self, line: &str) -> Result<GeoFix, &'static str> {
        match self.format {
            LogFormat::Csv => parse_csv_fix(line),
            LogFormat::JsonLines => {
                serde_json::from_str(line).map_err(|_| "bad JSON fix record")
            }
        }
    }
}

/// Parse one CSV record: `timestamp,provider,latitude,longitude,altitude_m,accuracy_m`
fn parse_csv_fix(line: &str) -> Result<GeoFix, &'static str> {
    let mut fields = line.split(',').map(str::trim);

    let timestamp = fields
        .next()
        .and_then(|f| f.parse().ok())
        .ok_or("bad timestamp field")?;

    let provider = match fields.next() {
        Some("gps") => ProviderKind::Gps,
        Some("network") => ProviderKind::Network,
        _ => return Err("bad provider field"),
    };

    let latitude = fields
        .next()
        .and_then(|f| f.parse().ok())
        .ok_or("bad latitude field")?;
    let longitude = fields
        .next()
        .and_then(|f| f.parse().ok())
        .ok_or("bad longitude field")?;
    let altitude_m = fields
        .next()
        .and_then(|f| f.parse().ok())
        .ok_or("bad altitude field")?;
    let accuracy_m = fields
        .next()
        .and_then(|f| f.parse().ok())
        .ok_or("bad accuracy field")?;

    if fields.next().is_some() {
        return Err("trailing fields");
    }

    Ok(GeoFix {
        latitude,
        longitude,
        altitude_m,
        accuracy_m,
        provider,
        timestamp,
    })
}

impl LocationSource for FixLog {
    type Error = io::Error;

    fn request_updates(
        &mut self,
        _request: &UpdateRequest,
    ) -> Result<(), LocationError<io::Error>> {
        self.subscribed = true;
        Ok(())
    }

    fn remove_updates(&mut self) {
        self.subscribed = false;
    }

    fn is_subscribed(&self) -> bool {
        self.subscribed
    }

    fn poll_fix(&mut self) -> nb::Result<GeoFix, LocationError<io::Error>> {
        if !self.subscribed {
            return Err(nb::Error::WouldBlock);
        }

        if self.exhausted {
            return Err(nb::Error::Other(LocationError::RecordingExhausted));
        }

        loop {
            let mut line = String::new();
            let read = self
                .reader
                .read_line(&mut line)
                .map_err(|e| nb::Error::Other(LocationError::Transport(e)))?;

            if read == 0 {
                self.exhausted = true;
                return Err(nb::Error::Other(LocationError::RecordingExhausted));
            }

            if self.lines_skipped < self.skip_lines {
                self.lines_skipped += 1;
                continue;
            }

            self.stats.lines_processed += 1;

            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            match self.parse_line(trimmed) {
                Ok(fix) => {
                    self.stats.fixes_read += 1;
                    return Ok(fix);
                }
                Err(reason) => {
                    self.stats.parse_errors += 1;
                    log::debug!(
                        "skipping fix record at line {}: {}",
                        self.stats.lines_processed + self.lines_skipped,
                        reason
                    );
                }
            }
        }
    }

    fn provider_enabled(&self, _provider: ProviderKind) -> bool {
        // A recording carries whatever providers were captured
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_log(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn reads_csv_with_header() {
        let file = write_log(
            "timestamp,provider,latitude,longitude,altitude_m,accuracy_m\n\
             1000,gps,52.52,13.405,34.5,4.0\n\
             2000,network,52.53,13.406,36.0,20.0\n",
        );

        let mut log = FixLog::from_csv(file.path()).unwrap().with_skip_lines(1);
        log.request_updates(&UpdateRequest::default()).unwrap();

        let first = log.poll_fix().unwrap();
        assert_eq!(first.timestamp, 1000);
        assert_eq!(first.provider, ProviderKind::Gps);
        assert_eq!(first.altitude_m, 34.5);

        let second = log.poll_fix().unwrap();
        assert_eq!(second.provider, ProviderKind::Network);

        assert!(matches!(
            log.poll_fix(),
            Err(nb::Error::Other(LocationError::RecordingExhausted))
        ));
        assert_eq!(log.stats().fixes_read, 2);
    }

    #[test]
    fn reads_json_lines() {
        let file = write_log(
            "{\"timestamp\":1000,\"provider\":\"gps\",\"latitude\":52.52,\"longitude\":13.405,\"altitude_m\":34.5,\"accuracy_m\":4.0}\n",
        );

        let mut log = FixLog::from_jsonl(file.path()).unwrap();
        log.request_updates(&UpdateRequest::default()).unwrap();

        let fix = log.poll_fix().unwrap();
        assert_eq!(fix.altitude_m, 34.5);
        assert_eq!(fix.provider, ProviderKind::Gps);
    }

    #[test]
    fn bad_lines_counted_and_skipped() {
        let file = write_log(
            "1000,gps,52.52,13.405,34.5,4.0\n\
             not,a,fix\n\
             2000,gps,52.53,13.406,36.0,4.0\n",
        );

        let mut log = FixLog::from_csv(file.path()).unwrap();
        log.request_updates(&UpdateRequest::default()).unwrap();

        assert_eq!(log.poll_fix().unwrap().timestamp, 1000);
        // The bad line is swallowed; the next poll returns the next good fix
        assert_eq!(log.poll_fix().unwrap().timestamp, 2000);
        assert_eq!(log.stats().parse_errors, 1);
    }

    #[test]
    fn missing_file_is_transport_error() {
        let err = FixLog::from_csv("/nonexistent/fixes.csv").unwrap_err();
        assert!(matches!(err, LocationError::Transport(_)));
    }

    #[test]
    fn polls_block_before_subscription() {
        let file = write_log("1000,gps,52.52,13.405,34.5,4.0\n");
        let mut log = FixLog::from_csv(file.path()).unwrap();

        assert!(matches!(log.poll_fix(), Err(nb::Error::WouldBlock)));
    }
}
