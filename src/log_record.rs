// SPDX-License-Identifier: MIT OR Apache-2.0

//! Log record type.
//!
//! A [`LogRecord`] is the unit handed from a [`Logger`](crate::Logger) to its
//! [`Encoder`](crate::Encoder): the entry metadata (level, time, logger name, call site),
//! the rendered message and the ordered fields. Records are built and written
//! synchronously, one per logging call, and are never shared between threads.

use crate::field::Field;
use crate::level::Level;
use chrono::{DateTime, Local};
use std::fmt::{self, Display};
use std::panic::Location;

/**
A source location captured at the logging call site.

Call sites are captured with `#[track_caller]`, so the location is the user's code, not
the facade's. `function` is only known for records logged through the crate's macros,
which pass `module_path!()`.
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Caller {
    file: &'static str,
    line: u32,
    function: Option<&'static str>,
}

impl Caller {
    pub const fn new(file: &'static str, line: u32, function: Option<&'static str>) -> Self {
        Self {
            file,
            line,
            function,
        }
    }

    pub fn from_location(
        location: &'static Location<'static>,
        function: Option<&'static str>,
    ) -> Self {
        Self::new(location.file(), location.line(), function)
    }

    pub fn file(&self) -> &'static str {
        self.file
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn function(&self) -> Option<&'static str> {
        self.function
    }

    /// `dir/file.rs:line`, keeping only the last directory of the path.
    pub fn short(&self) -> String {
        format!("{}:{}", trimmed_path(self.file), self.line)
    }

    /// `path/to/dir/file.rs:line`.
    pub fn full(&self) -> String {
        format!("{}:{}", self.file, self.line)
    }
}

fn trimmed_path(file: &str) -> &str {
    let Some(last) = file.rfind(['/', '\\']) else {
        return file;
    };
    match file[..last].rfind(['/', '\\']) {
        Some(previous) => &file[previous + 1..],
        None => file,
    }
}

impl Display for Caller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// One log statement, ready to encode.
#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
    level: Level,
    time: DateTime<Local>,
    logger_name: String,
    caller: Option<Caller>,
    message: String,
    fields: Vec<Field>,
}

impl LogRecord {
    /// A record stamped with the current local time.
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            level,
            time: Local::now(),
            logger_name: String::new(),
            caller: None,
            message: message.into(),
            fields: Vec::new(),
        }
    }

    pub fn with_logger_name(mut self, name: impl Into<String>) -> Self {
        self.logger_name = name.into();
        self
    }

    pub fn with_caller(mut self, caller: Option<Caller>) -> Self {
        self.caller = caller;
        self
    }

    pub fn with_time(mut self, time: DateTime<Local>) -> Self {
        self.time = time;
        self
    }

    /// Appends fields after any already on the record.
    pub fn with_fields(mut self, fields: impl IntoIterator<Item = Field>) -> Self {
        self.fields.extend(fields);
        self
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn time(&self) -> DateTime<Local> {
        self.time
    }

    pub fn logger_name(&self) -> &str {
        &self.logger_name
    }

    pub fn caller(&self) -> Option<&Caller> {
        self.caller.as_ref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }
}

/*
Boilerplate notes for LogRecord:

- Clone/PartialEq: derived, useful for forwarding and for tests.
- Eq/Hash: not implemented, fields may carry floats.
- Default: not implemented, a record without a level and timestamp is meaningless.
- Display: not implemented, rendering belongs to the encoders.
*/
