// SPDX-License-Identifier: MIT OR Apache-2.0
use crate::sink::Sink;
use std::io::{self, Write};

/**
The facade's sink: writes records to standard output.

Each line is written while holding the stdout lock, so records from concurrent threads
never interleave.
 */
#[derive(Debug, Clone)]
pub struct StdoutSink {}

// ============================================================================
// BOILERPLATE TRAIT IMPLEMENTATIONS
// ============================================================================
//
// Design decisions for StdoutSink trait implementations:
//
// - Debug/Clone: Already derived - appropriate for zero-sized struct
// - Copy: Implemented - safe for zero-sized struct with no heap allocation
// - PartialEq/Eq: Implemented - all instances write to the same stream
// - Default: Implemented - provides convenient zero-argument constructor
// - Display: NOT implemented - no meaningful string representation
// - Send/Sync: Automatically implemented - zero-sized struct is always thread-safe

impl Copy for StdoutSink {}

impl PartialEq for StdoutSink {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for StdoutSink {}

impl Default for StdoutSink {
    fn default() -> Self {
        Self::new()
    }
}

impl StdoutSink {
    pub const fn new() -> Self {
        Self {}
    }
}

impl Sink for StdoutSink {
    fn write_line(&self, line: &[u8]) -> io::Result<()> {
        let mut lock = io::stdout().lock();
        lock.write_all(line)
    }

    fn sync(&self) -> io::Result<()> {
        io::stdout().lock().flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_and_syncs() {
        let sink = StdoutSink::new();
        sink.write_line(b"{\"message\":\"stdout sink test\"}\n").unwrap();
        sink.sync().unwrap();
    }
}
