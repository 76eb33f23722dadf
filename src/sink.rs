//SPDX-License-Identifier: MIT OR Apache-2.0
use std::fmt::Debug;
use std::io;

/**
A destination for encoded records.

Sinks receive one complete line per record, newline included, and must be safe to call
from many threads at once. The facade writes to [`StdoutSink`](crate::StdoutSink);
[`InMemorySink`](crate::InMemorySink) captures lines for tests.
*/
pub trait Sink: Debug + Send + Sync {
    /**
    Writes one encoded record.

    Errors are reported by the logger on stderr and then dropped; they never reach the
    code that logged.
    */
    fn write_line(&self, line: &[u8]) -> io::Result<()>;

    /**
    The application may imminently exit.  Ensure all buffers are flushed and up to date.
    */
    fn sync(&self) -> io::Result<()>;
}

/*
Boilerplate notes.

# Sink

Clone doesn't make sense for a destination that may own a file handle or buffer, so sinks
are shared through Arc instead.
PartialEq/Eq/Hash: unclear whether we'd mean data equality or destination identity, skip.
Default depends on the destination, not on the trait.
Send/Sync are required since one sink backs a process-wide logger.
*/
