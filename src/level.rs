// SPDX-License-Identifier: MIT OR Apache-2.0

//! Severity levels.
//!
//! Levels are totally ordered: `Debug < Info < Warn < Error < DPanic < Panic < Fatal`.
//! A logger writes a record iff the record's level is at least the logger's threshold.
//!
//! Configuration resolves level names through a fixed table. The lookup is lenient:
//! an unrecognized name resolves to [`Level::Debug`], the most verbose level, instead of
//! failing. Callers that want to reject bad input can use the strict [`FromStr`] impl.
//!
//! ```
//! use svclog::Level;
//!
//! assert_eq!(Level::from_name("warn"), Level::Warn);
//! assert_eq!(Level::from_name("verbose"), Level::Debug);
//! assert!("verbose".parse::<Level>().is_err());
//! ```

use serde::{Deserialize, Serialize, Serializer};
use std::fmt::{self, Display};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Deserialize)]
#[serde(from = "String")]
pub enum Level {
    /// Verbose diagnostics, usually disabled in production.
    Debug,
    /// The default threshold.
    #[default]
    Info,
    /// Suspicious condition.
    Warn,
    /// Runtime error worth a human look.
    Error,
    /// Programmer error. Panics after writing when the logger is in development mode.
    DPanic,
    /// Programmer error. Always panics after writing.
    Panic,
    /// Unrecoverable. Flushes and terminates the process after writing.
    Fatal,
}

const LEVEL_NAMES: [(&str, Level); 7] = [
    ("debug", Level::Debug),
    ("info", Level::Info),
    ("warn", Level::Warn),
    ("error", Level::Error),
    ("dpanic", Level::DPanic),
    ("panic", Level::Panic),
    ("fatal", Level::Fatal),
];

impl Level {
    /// Every level, least severe first.
    pub const ALL: [Level; 7] = [
        Level::Debug,
        Level::Info,
        Level::Warn,
        Level::Error,
        Level::DPanic,
        Level::Panic,
        Level::Fatal,
    ];

    /**
    Resolves a configuration name to a level.

    Names are matched exactly against the lowercase table. Anything else resolves to
    [`Level::Debug`].
    */
    pub fn from_name(name: &str) -> Level {
        lookup(name).unwrap_or(Level::Debug)
    }

    /// The lowercase configuration name, e.g. `"dpanic"`.
    pub const fn name(self) -> &'static str {
        match self {
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
            Level::DPanic => "dpanic",
            Level::Panic => "panic",
            Level::Fatal => "fatal",
        }
    }

    /// The uppercase name used in encoded records, e.g. `"DPANIC"`.
    pub const fn capital_name(self) -> &'static str {
        match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
            Level::DPanic => "DPANIC",
            Level::Panic => "PANIC",
            Level::Fatal => "FATAL",
        }
    }

    // ANSI foreground color
    pub(crate) const fn color(self) -> u8 {
        match self {
            Level::Debug => 35,
            Level::Info => 34,
            Level::Warn => 33,
            Level::Error | Level::DPanic | Level::Panic | Level::Fatal => 31,
        }
    }
}

fn lookup(name: &str) -> Option<Level> {
    LEVEL_NAMES
        .iter()
        .find(|(candidate, _)| *candidate == name)
        .map(|(_, level)| *level)
}

/// Returned by the strict [`FromStr`] impl of [`Level`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error(
    "unrecognized level {name:?}, expected one of debug, info, warn, error, dpanic, panic, fatal"
)]
pub struct ParseLevelError {
    name: String,
}

impl ParseLevelError {
    /// The rejected input.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        lookup(s).ok_or_else(|| ParseLevelError { name: s.to_string() })
    }
}

impl From<String> for Level {
    fn from(name: String) -> Self {
        Level::from_name(&name)
    }
}

impl From<&str> for Level {
    fn from(name: &str) -> Self {
        Level::from_name(name)
    }
}

impl Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Level {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}
