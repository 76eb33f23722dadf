// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-call-site context loggers.
//!
//! A [`ContextLog`] collects fields for one log statement, optionally including the span
//! identifier of an OpenTelemetry context, then writes a single record through the global
//! logger (or an explicit [`Logger`]).
//!
//! # Lifecycle
//!
//! 1. Create with [`ContextLog::new`] (or [`with_log`] / [`with_context`])
//! 2. Add fields with [`with`](ContextLog::with) and
//!    [`with_tracing_context`](ContextLog::with_tracing_context), in any order
//! 3. Finish with one terminal method such as [`error`](ContextLog::error), which consumes
//!    the builder
//!
//! Dropping a builder without a terminal call writes nothing. Clone it first to emit
//! several records with the same fields.
//!
//! Builders made with the [`context_log!`](crate::context_log!) macro remember the module
//! they were created in, which the JSON encoder writes under `caller`:
//!
//! ```
//! svclog::context_log!["user" => 42].error("failed to load profile");
//! ```
//!
//! # Tracing identifiers
//!
//! [`with_tracing_context`](ContextLog::with_tracing_context) adds one `spanId` field
//! holding the active span's id as 16 lowercase hex digits. A context without an active
//! span, or whose span context is invalid (a no-op or foreign tracer), leaves the builder
//! unchanged.
//!
//! ```
//! use opentelemetry::trace::{
//!     SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState,
//! };
//! use svclog::{ContextLog, Field};
//!
//! let span = SpanContext::new(
//!     TraceId::from_hex("4bf92f3577b34da6a3ce929d0e0e4736").unwrap(),
//!     SpanId::from_hex("00f067aa0ba902b7").unwrap(),
//!     TraceFlags::SAMPLED,
//!     true,
//!     TraceState::default(),
//! );
//! let cx = opentelemetry::Context::new().with_remote_span_context(span);
//!
//! let log = ContextLog::new([Field::new("user", 42)]).with_tracing_context(&cx);
//! assert_eq!(log.fields()[1].key(), "spanId");
//! log.info("profile loaded");
//! ```

use crate::field::Field;
use crate::global_logger::global_logger;
use crate::keys;
use crate::level::Level;
use crate::log_record::Caller;
use crate::logger::Logger;
use opentelemetry::Context;
use opentelemetry::trace::TraceContextExt;
use std::fmt::{self, Display};
use std::panic::Location;

/// Fields accumulated for a single log statement.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContextLog {
    fields: Vec<Field>,
    function: Option<&'static str>,
}

macro_rules! terminal {
    ($level:expr, $name:literal, $plain:ident, $formatted:ident) => {
        #[doc = concat!("Writes the accumulated fields with `message` at ", $name, " severity.")]
        #[track_caller]
        pub fn $plain(self, message: impl Display) {
            self.log_to(&global_logger(), $level, message);
        }

        #[doc = concat!("Writes the accumulated fields with formatted arguments at ", $name, ".")]
        #[track_caller]
        pub fn $formatted(self, args: fmt::Arguments<'_>) {
            self.log_to(&global_logger(), $level, args);
        }
    };
}

impl ContextLog {
    pub fn new(fields: impl IntoIterator<Item = Field>) -> Self {
        Self {
            fields: fields.into_iter().collect(),
            function: None,
        }
    }

    /// Records `module` (usually `module_path!()`) as the calling function of every record.
    pub fn in_module(mut self, module: &'static str) -> Self {
        self.function = Some(module);
        self
    }

    /// Appends `fields` after those already collected.
    pub fn with(mut self, fields: impl IntoIterator<Item = Field>) -> Self {
        self.fields.extend(fields);
        self
    }

    /// Appends a `spanId` field when `cx` carries a valid active span.
    pub fn with_tracing_context(self, cx: &Context) -> Self {
        match span_id(cx) {
            Some(span_id) => self.with([Field::string(keys::SPAN_ID, span_id)]),
            None => self,
        }
    }

    /// [`with_tracing_context`](Self::with_tracing_context) on the thread's current
    /// OpenTelemetry context.
    pub fn with_current_tracing_context(self) -> Self {
        self.with_tracing_context(&Context::current())
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Writes the accumulated fields with `message` at `level` to `logger`.
    #[track_caller]
    pub fn log_to(self, logger: &Logger, level: Level, message: impl Display) {
        let caller = Caller::from_location(Location::caller(), self.function);
        logger.log_at(level, caller, message, self.fields);
    }

    terminal!(Level::Debug, "debug", debug, debug_f);
    terminal!(Level::Info, "info", info, info_f);
    terminal!(Level::Warn, "warn", warn, warn_f);
    terminal!(Level::Error, "error", error, error_f);
    terminal!(Level::DPanic, "dpanic", dpanic, dpanic_f);
    terminal!(Level::Panic, "panic", panic, panic_f);
    terminal!(Level::Fatal, "fatal", fatal, fatal_f);
}

fn span_id(cx: &Context) -> Option<String> {
    if !cx.has_active_span() {
        return None;
    }
    let span = cx.span();
    let span_context = span.span_context();
    span_context
        .is_valid()
        .then(|| span_context.span_id().to_string())
}

/// A builder starting with `fields`.
pub fn with_log(fields: impl IntoIterator<Item = Field>) -> ContextLog {
    ContextLog::new(fields)
}

/// An empty builder with the span id of `cx` attached, if any.
pub fn with_context(cx: &Context) -> ContextLog {
    ContextLog::default().with_tracing_context(cx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::inmemory_sink::InMemorySink;
    use opentelemetry::trace::{SpanContext, SpanId, TraceFlags, TraceId, TraceState};
    use std::sync::Arc;

    const SPAN: [u8; 8] = [0x00, 0xf0, 0x67, 0xaa, 0x0b, 0xa9, 0x02, 0xb7];

    fn traced() -> Context {
        let span_context = SpanContext::new(
            TraceId::from_bytes([0x4b; 16]),
            SpanId::from_bytes(SPAN),
            TraceFlags::SAMPLED,
            true,
            TraceState::default(),
        );
        Context::new().with_remote_span_context(span_context)
    }

    fn capture() -> (Logger, Arc<InMemorySink>) {
        let sink = Arc::new(InMemorySink::new());
        let logger = Config::default().build_with_sink("ctx", sink.clone());
        (logger, sink)
    }

    fn keys(log: &ContextLog) -> Vec<&str> {
        log.fields().iter().map(Field::key).collect()
    }

    #[test]
    fn accumulation_preserves_order() {
        let log = ContextLog::new([Field::new("a", 1), Field::new("b", 2)])
            .with([Field::new("c", 3)]);
        assert_eq!(keys(&log), ["a", "b", "c"]);
    }

    #[test]
    fn span_id_is_attached_once() {
        let log = with_log([Field::new("user", 42)]).with_tracing_context(&traced());
        assert_eq!(keys(&log), ["user", "spanId"]);
        assert_eq!(
            log.fields()[1].value(),
            &crate::Value::String("00f067aa0ba902b7".to_string())
        );
    }

    #[test]
    fn context_without_span_is_a_no_op() {
        let plain = ContextLog::new([Field::new("user", 42)]);
        let traced = plain.clone().with_tracing_context(&Context::new());
        assert_eq!(plain, traced);
    }

    #[test]
    fn invalid_span_context_is_a_no_op() {
        let cx = Context::new().with_remote_span_context(SpanContext::empty_context());
        assert!(with_context(&cx).fields().is_empty());
    }

    #[test]
    fn current_context_is_read() {
        let _attached = traced().attach();
        let log = ContextLog::default().with_current_tracing_context();
        assert_eq!(keys(&log), ["spanId"]);
    }

    #[test]
    fn record_carries_accumulated_fields() {
        let (logger, sink) = capture();
        ContextLog::new([Field::new("user", 42)])
            .with_tracing_context(&traced())
            .log_to(&logger, Level::Error, "failed");

        let line = sink.drain_lines().remove(0);
        let json: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(json["level"], "ERROR");
        assert_eq!(json["message"], "failed");
        assert_eq!(json["user"], 42);
        assert_eq!(json["spanId"], "00f067aa0ba902b7");
        assert!(line.find("\"user\"").unwrap() < line.find("\"spanId\"").unwrap());
    }

    #[test]
    fn no_span_record_matches_plain_record() {
        let (logger, sink) = capture();
        ContextLog::new([Field::new("user", 42)]).log_to(&logger, Level::Info, "same");
        ContextLog::new([Field::new("user", 42)])
            .with_tracing_context(&Context::new())
            .log_to(&logger, Level::Info, "same");

        let lines: Vec<serde_json::Value> = sink
            .drain_lines()
            .iter()
            .map(|line| {
                let mut json: serde_json::Value = serde_json::from_str(line).unwrap();
                // timestamps and call sites legitimately differ
                json.as_object_mut().unwrap().remove("time");
                json.as_object_mut().unwrap().remove("line");
                json
            })
            .collect();
        assert_eq!(lines[0], lines[1]);
    }

    #[test]
    fn global_terminal_methods() {
        let _guard = crate::test_support::guard();
        let sink = crate::test_support::capture_global(Level::Debug);

        let log = with_log([Field::new("order", 7)]);
        log.clone().warn("slow");
        log.info_f(format_args!("done in {}ms", 12));

        let lines = sink.drain_lines();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("\"level\":\"WARN\""));
        assert!(lines[1].contains("\"message\":\"done in 12ms\""));
        assert!(lines.iter().all(|line| line.contains("\"order\":7")));
    }

    #[test]
    fn macro_builder_records_the_module() {
        let _guard = crate::test_support::guard();
        let sink = crate::test_support::capture_global(Level::Debug);

        let log = crate::context_log!["order" => 7];
        log.clone().with_tracing_context(&traced()).error("rejected");
        crate::context_log![].warn("empty");

        let records: Vec<serde_json::Value> = sink
            .drain_lines()
            .iter()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(records.len(), 2);
        for record in &records {
            assert_eq!(record["caller"], module_path!());
            assert!(record["line"].as_str().unwrap().starts_with("src/context_log.rs:"));
        }
        assert_eq!(records[0]["order"], 7);
        assert_eq!(records[0]["spanId"], "00f067aa0ba902b7");
    }

    #[test]
    fn module_survives_chaining() {
        let log = ContextLog::default()
            .in_module("billing::invoices")
            .with([Field::new("a", 1)])
            .with_tracing_context(&Context::new());
        let (logger, sink) = capture();
        log.log_to(&logger, Level::Info, "sent");
        let json: serde_json::Value = serde_json::from_str(&sink.drain_lines()[0]).unwrap();
        assert_eq!(json["caller"], "billing::invoices");
    }

    #[test]
    fn plain_builder_has_no_caller_key() {
        let (logger, sink) = capture();
        ContextLog::new([Field::new("a", 1)]).log_to(&logger, Level::Info, "sent");
        let json: serde_json::Value = serde_json::from_str(&sink.drain_lines()[0]).unwrap();
        assert!(json.get("caller").is_none());
        assert!(json.get("line").is_some());
    }
}
