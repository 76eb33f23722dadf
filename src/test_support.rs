// SPDX-License-Identifier: MIT OR Apache-2.0
//! Shared helpers for unit tests that touch the global logger.

use crate::{Config, InMemorySink, Level, set_global_logger};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

static TEST_LOGGER_GUARD: Mutex<()> = Mutex::new(());

/// Serializes tests that replace the global logger.
pub(crate) fn guard() -> MutexGuard<'static, ()> {
    TEST_LOGGER_GUARD
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
}

/// Installs a JSON global logger at `threshold` writing to a fresh in-memory sink.
pub(crate) fn capture_global(threshold: Level) -> Arc<InMemorySink> {
    let sink = Arc::new(InMemorySink::new());
    let config = Config {
        level: threshold,
        ..Config::default()
    };
    set_global_logger(
        config
            .build_with_sink("test", sink.clone())
            .with_fatal_panics(),
    );
    sink
}
