// SPDX-License-Identifier: MIT OR Apache-2.0

//! Global logger management.
//!
//! This module holds the process-wide logger that every crate-level logging function and
//! every [`ContextLog`](crate::ContextLog) writes through.
//!
//! # Architecture
//!
//! The global logger is a single `Arc<Logger>` behind an `RwLock`, created on first use.
//! Logging calls take the read lock only long enough to clone the `Arc`, then encode and
//! write without holding it. This ensures:
//! - Any number of threads can log concurrently
//! - Reconfiguring while other threads log is safe: in-flight records finish on the
//!   logger they started with, later records use the new one
//! - There is exactly one active logger at a time; the last configuration wins
//!
//! # Default Behavior
//!
//! Until [`configure`] runs, the global logger is built from [`Config::default`]: JSON to
//! stdout, `info` threshold, call-site capture on, no service name.
//!
//! # Examples
//!
//! ## Configuring at startup
//!
//! ```
//! use svclog::{Config, Encoding, Level};
//!
//! svclog::configure("billing", &Config {
//!     encoding: Encoding::Json,
//!     level: Level::Info,
//!     dev_mode: false,
//!     capture_caller: true,
//!     ..Config::default()
//! });
//! svclog::info("ready");
//! ```
//!
//! ## Passing the logger explicitly
//!
//! ```
//! use svclog::{global_logger, Level};
//!
//! let logger = global_logger();
//! std::thread::spawn(move || {
//!     logger.log(Level::Info, "from a worker", std::iter::empty());
//! })
//! .join()
//! .unwrap();
//! ```
//!
//! # Best Practices
//!
//! 1. Configure once, early, before spawning threads that log
//! 2. Tests that capture output should restore the previous logger when done, see
//!    [`InMemorySink`](crate::InMemorySink)

use crate::config::Config;
use crate::field::Field;
use crate::level::Level;
use crate::logger::Logger;
use crate::sink::Sink;
use crate::stdout_sink::StdoutSink;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

static GLOBAL_LOGGER: OnceLock<RwLock<Arc<Logger>>> = OnceLock::new();

fn slot() -> &'static RwLock<Arc<Logger>> {
    GLOBAL_LOGGER.get_or_init(|| RwLock::new(Arc::new(Config::default().build(""))))
}

/**
The current global logger.

The returned handle stays valid after a reconfiguration; it keeps writing with the
settings it was built with.
*/
pub fn global_logger() -> Arc<Logger> {
    slot().read().unwrap_or_else(PoisonError::into_inner).clone()
}

/// Replaces the global logger, returning the previous one.
pub fn set_global_logger(logger: impl Into<Arc<Logger>>) -> Arc<Logger> {
    let mut current = slot().write().unwrap_or_else(PoisonError::into_inner);
    std::mem::replace(&mut *current, logger.into())
}

/**
Configures the global logger to write to stdout.

Builds a logger from `config`, names it `service`, installs it, then logs the configured
level name at `info` and flushes. Never fails: an unrecognized level name has already
resolved to `debug` when the config was parsed.
*/
#[track_caller]
pub fn configure(service: &str, config: &Config) {
    configure_with_sink(service, config, Arc::new(StdoutSink::new()));
}

/// Like [`configure`], writing to `sink` instead of stdout.
#[track_caller]
pub fn configure_with_sink(service: &str, config: &Config, sink: Arc<dyn Sink>) {
    let logger = Arc::new(config.build_with_sink(service, sink));
    set_global_logger(logger.clone());
    logger.log(
        Level::Info,
        "(SET LOG LEVEL)",
        [Field::string("LEVEL", config.announced_level())],
    );
    logger.sync();
}

/// Configures the global logger with [`Config::default`].
#[track_caller]
pub fn with_default(service: &str) {
    configure(service, &Config::default());
}
