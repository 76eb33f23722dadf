// SPDX-License-Identifier: MIT OR Apache-2.0

//! # In-Memory Sink
//!
//! This module provides an in-memory [`Sink`] for testing and embedding. The
//! `InMemorySink` captures encoded records in memory rather than writing them to stdout,
//! making it ideal for:
//!
//! - Unit testing code that logs through the facade
//! - Asserting on the exact encoded shape of records
//! - Capturing logs where stdout is redirected or unavailable
//!
//! ## Architecture
//!
//! Lines are stored in a `Mutex<Vec<String>>`, one entry per record with the trailing
//! newline removed. Multiple threads can log concurrently while retrieval stays
//! consistent.
//!
//! ## Integration with the Global Logger
//!
//! Hand the sink to [`configure_with_sink`](crate::configure_with_sink) or build a
//! [`Logger`](crate::Logger) around it and install it with
//! [`set_global_logger`](crate::set_global_logger).

use crate::sink::Sink;
use std::io;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// A sink that stores each encoded record as a `String`.
///
/// # Example
///
/// ```rust
/// use svclog::{Config, InMemorySink, Level, Logger};
/// use std::sync::Arc;
///
/// let sink = Arc::new(InMemorySink::new());
/// let logger = Config::default().build_with_sink("billing", sink.clone());
///
/// logger.log(Level::Info, "invoice sent", [svclog::Field::new("invoice", 7)]);
///
/// let lines = sink.drain_lines();
/// assert_eq!(lines.len(), 1);
/// assert!(lines[0].contains("\"invoice\":7"));
/// ```
///
/// # Test Isolation Pattern
///
/// Tests that touch the global logger can swap in a capturing logger and restore the
/// previous one afterwards:
///
/// ```rust
/// use svclog::{Config, InMemorySink, set_global_logger};
/// use std::sync::Arc;
///
/// let sink = Arc::new(InMemorySink::new());
/// let previous = set_global_logger(Config::default().build_with_sink("test", sink.clone()));
///
/// svclog::info("captured");
/// assert!(sink.drain_logs().contains("captured"));
///
/// set_global_logger(previous);
/// ```
#[derive(Debug)]
pub struct InMemorySink {
    lines: Mutex<Vec<String>>,
}

// ============================================================================
// BOILERPLATE TRAIT IMPLEMENTATIONS
// ============================================================================
//
// Design decisions for InMemorySink trait implementations:
//
// - Debug: Derived for diagnostic purposes and required by Sink trait
// - Default: Implemented with obvious zero-value (empty buffer)
// - Clone: NOT implemented - sinks are shared through Arc, a copy would split the capture
// - PartialEq/Eq: NOT implemented - mutex state comparison is problematic
// - Display: NOT implemented - no meaningful display representation
// - Send/Sync: Automatically implemented due to Mutex usage (required for Sink trait)

impl Default for InMemorySink {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemorySink {
    pub fn new() -> Self {
        Self {
            lines: Mutex::new(Vec::new()),
        }
    }

    // A test that panics mid-log must not hide the lines written before it.
    fn lock(&self) -> MutexGuard<'_, Vec<String>> {
        self.lines.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Removes and returns every captured line, oldest first.
    pub fn drain_lines(&self) -> Vec<String> {
        std::mem::take(&mut *self.lock())
    }

    /// Drains all lines into a single newline-joined string.
    pub fn drain_logs(&self) -> String {
        self.drain_lines().join("\n")
    }

    /// A copy of the captured lines, leaving the buffer intact.
    pub fn lines(&self) -> Vec<String> {
        self.lock().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

impl Sink for InMemorySink {
    fn write_line(&self, line: &[u8]) -> io::Result<()> {
        let text = String::from_utf8_lossy(line);
        let text = text.strip_suffix('\n').unwrap_or(&text);
        self.lock().push(text.to_string());
        Ok(())
    }

    fn sync(&self) -> io::Result<()> {
        // nothing buffered outside the vector
        Ok(())
    }
}
