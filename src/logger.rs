// SPDX-License-Identifier: MIT OR Apache-2.0

//! The logging engine.
//!
//! A [`Logger`] owns everything needed to turn a call into output: a severity threshold,
//! an [`Encoder`], a [`Sink`], an optional name, and the call-site and development
//! switches. The crate-level functions all resolve to [`Logger::log`] on the global
//! logger, but a `Logger` is an ordinary value and can be built, cloned and passed to
//! call sites directly.
//!
//! # Filtering
//!
//! A record is written iff its level is at least the threshold.
//!
//! # Terminating levels
//!
//! Three levels end the current flow of control after writing, flushing the sink first:
//!
//! | Level    | After writing                                     |
//! |----------|---------------------------------------------------|
//! | `DPanic` | panics in development mode, otherwise nothing     |
//! | `Panic`  | panics                                            |
//! | `Fatal`  | exits the process with status 1                   |
//!
//! These are not errors to recover from. They run even when the record itself is filtered
//! out by the threshold.
//!
//! # Example
//!
//! ```
//! use svclog::{Config, Field, InMemorySink, Level};
//! use std::sync::Arc;
//!
//! let sink = Arc::new(InMemorySink::new());
//! let logger = Config::default().build_with_sink("orders", sink.clone());
//!
//! logger.log(Level::Debug, "filtered out", std::iter::empty());
//! logger.log(Level::Warn, "queue is deep", [Field::new("depth", 900)]);
//!
//! let lines = sink.drain_lines();
//! assert_eq!(lines.len(), 1);
//! assert!(lines[0].contains("\"level\":\"WARN\""));
//! ```

use crate::encoder::Encoder;
use crate::field::Field;
use crate::level::Level;
use crate::log_record::{Caller, LogRecord};
use crate::sink::Sink;
use std::fmt::Display;
use std::io::{self, Write};
use std::panic::Location;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct Logger {
    name: String,
    threshold: Level,
    encoder: Arc<dyn Encoder>,
    sink: Arc<dyn Sink>,
    capture_caller: bool,
    development: bool,
    // unit tests observe fatal records through a panic instead of an exit
    fatal_panics: bool,
}

impl Logger {
    /**
    A logger writing every level, without a name or call-site capture.

    Use the `with_*` methods to adjust it, or build one from a [`Config`](crate::Config).
    */
    pub fn new(encoder: Arc<dyn Encoder>, sink: Arc<dyn Sink>) -> Self {
        Self {
            name: String::new(),
            threshold: Level::Debug,
            encoder,
            sink,
            capture_caller: false,
            development: false,
            fatal_panics: false,
        }
    }

    pub fn with_threshold(mut self, threshold: Level) -> Self {
        self.threshold = threshold;
        self
    }

    /// Annotate records with the source location of the logging call.
    pub fn with_caller(mut self, capture_caller: bool) -> Self {
        self.capture_caller = capture_caller;
        self
    }

    /// In development mode `DPanic` records panic after writing.
    pub fn with_development(mut self, development: bool) -> Self {
        self.development = development;
        self
    }

    #[cfg(test)]
    pub(crate) fn with_fatal_panics(mut self) -> Self {
        self.fatal_panics = true;
        self
    }

    /**
    A child logger whose name is this logger's name and `name` joined with a dot.

    An empty `name` leaves the name unchanged.
    */
    pub fn named(&self, name: &str) -> Self {
        let mut child = self.clone();
        if !name.is_empty() {
            child.name = if self.name.is_empty() {
                name.to_string()
            } else {
                format!("{}.{}", self.name, name)
            };
        }
        child
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn threshold(&self) -> Level {
        self.threshold
    }

    pub fn is_development(&self) -> bool {
        self.development
    }

    pub fn enabled(&self, level: Level) -> bool {
        level >= self.threshold
    }

    /**
    Logs `message` with `fields` at `level`.

    The call site is captured with `#[track_caller]`. The message is only rendered when the
    record is written or the level terminates.
    */
    #[track_caller]
    pub fn log(
        &self,
        level: Level,
        message: impl Display,
        fields: impl IntoIterator<Item = Field>,
    ) {
        self.log_at(
            level,
            Caller::from_location(Location::caller(), None),
            message,
            fields,
        );
    }

    /// Like [`log`](Self::log), with an explicit call site.
    pub fn log_at(
        &self,
        level: Level,
        caller: Caller,
        message: impl Display,
        fields: impl IntoIterator<Item = Field>,
    ) {
        let enabled = self.enabled(level);
        let terminates = self.terminates(level);
        if !enabled && !terminates {
            return;
        }

        let message = message.to_string();
        if enabled {
            let record = LogRecord::new(level, message.as_str())
                .with_logger_name(self.name.as_str())
                .with_caller(self.capture_caller.then_some(caller))
                .with_fields(fields);
            self.write(&record);
        }
        if terminates {
            self.terminate(level, &message);
        }
    }

    /// Encodes and writes a record, bypassing the threshold.
    pub fn write(&self, record: &LogRecord) {
        let result = self
            .encoder
            .encode(record)
            .and_then(|line| self.sink.write_line(&line));
        if let Err(err) = result {
            report_internal_error("write error", &err);
        }
    }

    /// Flushes the sink.
    pub fn sync(&self) {
        if let Err(err) = self.sink.sync() {
            report_internal_error("sync error", &err);
        }
    }

    fn terminates(&self, level: Level) -> bool {
        match level {
            Level::DPanic => self.development,
            Level::Panic | Level::Fatal => true,
            _ => false,
        }
    }

    fn terminate(&self, level: Level, message: &str) -> ! {
        self.sync();
        if level == Level::Fatal && !self.fatal_panics {
            std::process::exit(1);
        }
        panic!("{message}");
    }
}

// Failures of the sink itself have nowhere else to go.
fn report_internal_error(context: &str, err: &io::Error) {
    let now = chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.6f %z");
    let _ = writeln!(io::stderr().lock(), "{now}\t{context}: {err}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::inmemory_sink::InMemorySink;
    use std::panic::{AssertUnwindSafe, catch_unwind};

    fn capture(threshold: Level) -> (Logger, Arc<InMemorySink>) {
        let sink = Arc::new(InMemorySink::new());
        let logger = Config::default()
            .build_with_sink("test", sink.clone())
            .with_threshold(threshold)
            .with_fatal_panics();
        (logger, sink)
    }

    fn parse(line: &str) -> serde_json::Value {
        serde_json::from_str(line).expect("record should be valid JSON")
    }

    #[test]
    fn writes_iff_level_reaches_threshold() {
        for threshold in Level::ALL {
            for level in Level::ALL {
                let (logger, sink) = capture(threshold);
                let _ = catch_unwind(AssertUnwindSafe(|| {
                    logger.log(level, "probe", std::iter::empty())
                }));
                let written = sink.drain_lines().len();
                assert_eq!(
                    written,
                    usize::from(level >= threshold),
                    "level {level} against threshold {threshold}"
                );
            }
        }
    }

    #[test]
    fn record_carries_name_level_and_fields() {
        let (logger, sink) = capture(Level::Debug);
        logger.log(Level::Error, "failed", [Field::new("user", 42)]);
        let json = parse(&sink.drain_lines()[0]);
        assert_eq!(json["level"], "ERROR");
        assert_eq!(json["service"], "test");
        assert_eq!(json["message"], "failed");
        assert_eq!(json["user"], 42);
    }

    #[test]
    fn caller_capture_points_at_the_call_site() {
        let (logger, sink) = capture(Level::Debug);
        let logger = logger.with_caller(true);
        let expected_line = line!() + 1;
        logger.log(Level::Info, "here", std::iter::empty());
        let json = parse(&sink.drain_lines()[0]);
        assert_eq!(json["line"], format!("src/logger.rs:{expected_line}"));

        let logger = logger.with_caller(false);
        logger.log(Level::Info, "nowhere", std::iter::empty());
        assert!(parse(&sink.drain_lines()[0]).get("line").is_none());
    }

    #[test]
    fn named_children() {
        let (logger, _) = capture(Level::Debug);
        assert_eq!(logger.named("db").name(), "test.db");
        assert_eq!(logger.named("db").named("pool").name(), "test.db.pool");
        assert_eq!(logger.named("").name(), "test");
    }

    #[test]
    #[should_panic(expected = "invariant broken")]
    fn panic_level_panics_after_writing() {
        let (logger, _) = capture(Level::Debug);
        logger.log(Level::Panic, "invariant broken", std::iter::empty());
    }

    #[test]
    fn dpanic_only_panics_in_development() {
        let (logger, sink) = capture(Level::Debug);
        logger.log(Level::DPanic, "odd", std::iter::empty());
        assert_eq!(sink.drain_lines().len(), 1);

        let logger = logger.with_development(true);
        let outcome = catch_unwind(AssertUnwindSafe(|| {
            logger.log(Level::DPanic, "odd", std::iter::empty())
        }));
        assert!(outcome.is_err());
        assert_eq!(sink.drain_lines().len(), 1, "written before panicking");
    }

    #[test]
    fn fatal_writes_then_terminates() {
        let (logger, sink) = capture(Level::Info);
        let outcome = catch_unwind(AssertUnwindSafe(|| {
            logger.log(Level::Fatal, "out of disk", [Field::new("free", 0)])
        }));
        assert!(outcome.is_err());
        let json = parse(&sink.drain_lines()[0]);
        assert_eq!(json["level"], "FATAL");
        assert_eq!(json["free"], 0);
    }

    #[test]
    fn filtered_panic_still_panics() {
        let (logger, sink) = capture(Level::Fatal);
        let outcome = catch_unwind(AssertUnwindSafe(|| {
            logger.log(Level::Panic, "quiet", std::iter::empty())
        }));
        assert!(outcome.is_err());
        assert!(sink.is_empty());
    }

    #[derive(Debug)]
    struct BrokenSink;

    impl Sink for BrokenSink {
        fn write_line(&self, _line: &[u8]) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"))
        }

        fn sync(&self) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"))
        }
    }

    #[test]
    fn sink_failures_are_swallowed() {
        let logger = Config::default().build_with_sink("test", Arc::new(BrokenSink));
        logger.log(Level::Error, "nobody hears this", std::iter::empty());
        logger.sync();
    }
}
