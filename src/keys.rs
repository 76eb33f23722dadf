// SPDX-License-Identifier: MIT OR Apache-2.0

//! Field and message keys shared with downstream log consumers.
//!
//! Log pipelines match on these names, so they are part of the public contract and must
//! not change.

/// Message token of gRPC access records.
pub const GRPC: &str = "grpc";
/// Message token of HTTP access records.
pub const HTTP: &str = "http";
/// Response size in bytes.
pub const SIZE: &str = "size";
pub const URI: &str = "uri";
/// Response status code.
pub const STATUS: &str = "status";
pub const ERROR: &str = "error";
pub const METHOD: &str = "method";
pub const METADATA: &str = "metadata";
pub const REQUEST: &str = "request";
pub const REPLY: &str = "reply";
/// Elapsed time of the call. Also the structural timestamp key.
pub const TIME: &str = "time";
/// Request body snippet.
pub const IN: &str = "in";
/// Response body snippet.
pub const OUT: &str = "out";

/// Span identifier attached by [`ContextLog::with_tracing_context`](crate::ContextLog::with_tracing_context).
pub const SPAN_ID: &str = "spanId";

// structural keys written by the configured encoders
pub const SERVICE: &str = "service";
pub const LEVEL: &str = "level";
pub const LINE: &str = "line";
pub const CALLER: &str = "caller";
pub const MESSAGE: &str = "message";
