// SPDX-License-Identifier: MIT OR Apache-2.0

//! Crate-level logging functions.
//!
//! Every severity comes in three shapes, all writing through the global logger:
//!
//! | Shape     | Example                                         |
//! |-----------|-------------------------------------------------|
//! | plain     | `svclog::info("started")`                       |
//! | formatted | `svclog::info_f(format_args!("took {ms}ms"))`   |
//! | keyed     | `svclog::info_w("started", [Field::new("port", 8080)])` |
//!
//! The plain functions cannot see the calling module, so their JSON records carry `line` but
//! no `caller`. The macro forms record it: [`infof!`](crate::infof) for plain and formatted
//! messages, [`infow!`](crate::infow) for keyed ones.
//!
//! `dpanic`, `panic` and `fatal` terminate after writing, see [`Logger`](crate::Logger).

use crate::field::Field;
use crate::global_logger::global_logger;
use crate::level::Level;
use crate::log_record::Caller;
use std::fmt::{self, Display};
use std::panic::Location;

macro_rules! leveled {
    ($level:expr, $name:literal, $plain:ident, $formatted:ident, $keyed:ident) => {
        #[doc = concat!("Logs `message` at ", $name, " severity.")]
        #[track_caller]
        pub fn $plain(message: impl Display) {
            global_logger().log($level, message, std::iter::empty());
        }

        #[doc = concat!("Logs preformatted arguments at ", $name, " severity.")]
        #[track_caller]
        pub fn $formatted(args: fmt::Arguments<'_>) {
            global_logger().log($level, args, std::iter::empty());
        }

        #[doc = concat!("Logs `message` with `fields` at ", $name, " severity.")]
        #[track_caller]
        pub fn $keyed(message: impl Display, fields: impl IntoIterator<Item = Field>) {
            global_logger().log($level, message, fields);
        }
    };
}

leveled!(Level::Debug, "debug", debug, debug_f, debug_w);
leveled!(Level::Info, "info", info, info_f, info_w);
leveled!(Level::Warn, "warn", warn, warn_f, warn_w);
leveled!(Level::Error, "error", error, error_f, error_w);
leveled!(Level::DPanic, "dpanic", dpanic, dpanic_f, dpanic_w);
leveled!(Level::Panic, "panic", panic, panic_f, panic_w);
leveled!(Level::Fatal, "fatal", fatal, fatal_f, fatal_w);

// Entry point of the logging macros; `module` is the caller's `module_path!()`.
#[doc(hidden)]
#[track_caller]
pub fn log_in_module(
    level: Level,
    module: &'static str,
    message: impl Display,
    fields: impl IntoIterator<Item = Field>,
) {
    global_logger().log_at(
        level,
        Caller::from_location(Location::caller(), Some(module)),
        message,
        fields,
    );
}
