// SPDX-License-Identifier: MIT OR Apache-2.0

//! Access-log helpers for transport middleware.
//!
//! These write one record per handled call with a fixed vocabulary from [`keys`]: HTTP
//! records carry the message `http`, gRPC records the message `grpc`. Downstream parsers
//! match on these names.
//!
//! ```
//! use svclog::HttpAccess;
//! use std::time::Duration;
//!
//! let access = HttpAccess::new("GET", "/health", 200, Duration::from_millis(3));
//! svclog::http_access_log(&access);
//! // same record, plus the calling module under `caller`
//! svclog::http_access_log!(&access);
//! ```

use crate::field::Field;
use crate::global_logger::global_logger;
use crate::keys;
use crate::level::Level;
use crate::leveled::log_in_module;
use crate::logger::Logger;
use serde::Serialize;
use std::collections::BTreeMap;
use std::error::Error;
use std::time::Duration;

/// Call metadata (e.g. gRPC headers), sorted by key for stable output.
pub type Metadata = BTreeMap<String, Vec<String>>;

/// One served HTTP request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpAccess<'a> {
    pub method: &'a str,
    pub uri: &'a str,
    pub status: u16,
    /// Response size in bytes.
    pub size: Option<u64>,
    pub elapsed: Duration,
    /// Request body snippet, logged under `in`.
    pub request_body: Option<&'a str>,
    /// Response body snippet, logged under `out`.
    pub response_body: Option<&'a str>,
}

impl<'a> HttpAccess<'a> {
    pub fn new(method: &'a str, uri: &'a str, status: u16, elapsed: Duration) -> Self {
        Self {
            method,
            uri,
            status,
            size: None,
            elapsed,
            request_body: None,
            response_body: None,
        }
    }

    pub fn with_size(mut self, size: u64) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_bodies(mut self, request: Option<&'a str>, response: Option<&'a str>) -> Self {
        self.request_body = request;
        self.response_body = response;
        self
    }

    /// `method`, `uri`, `status`, `size`, `time`, `in`, `out`, skipping absent ones.
    pub fn fields(&self) -> Vec<Field> {
        let mut fields = vec![
            Field::string(keys::METHOD, self.method),
            Field::string(keys::URI, self.uri),
            Field::new(keys::STATUS, self.status),
        ];
        if let Some(size) = self.size {
            fields.push(Field::new(keys::SIZE, size));
        }
        fields.push(Field::duration(keys::TIME, self.elapsed));
        if let Some(body) = self.request_body {
            fields.push(Field::string(keys::IN, body));
        }
        if let Some(body) = self.response_body {
            fields.push(Field::string(keys::OUT, body));
        }
        fields
    }

    /// Writes the access record to `logger` at info severity.
    #[track_caller]
    pub fn log_to(&self, logger: &Logger) {
        logger.log(Level::Info, keys::HTTP, self.fields());
    }
}

/// Writes an HTTP access record to the global logger at info severity.
///
/// The [`http_access_log!`](crate::http_access_log!) macro also records the calling module
/// under `caller`.
#[track_caller]
pub fn http_access_log(access: &HttpAccess<'_>) {
    access.log_to(&global_logger());
}

/**
Writes a served gRPC call to the global logger.

The record is at error severity when `err` is present and info otherwise. `error` is
always written, as null for successful calls.
*/
#[track_caller]
pub fn grpc_access_log(
    method: &str,
    elapsed: Duration,
    metadata: &Metadata,
    err: Option<&dyn Error>,
) {
    let fields = grpc_server_fields(method, elapsed, metadata, err);
    global_logger().log(grpc_level(err), keys::GRPC, fields);
}

/// Writes an outgoing gRPC call with its request and reply, same severity rule as
/// [`grpc_access_log`].
#[track_caller]
pub fn grpc_client_log<Req, Rep>(
    method: &str,
    request: &Req,
    reply: &Rep,
    elapsed: Duration,
    metadata: &Metadata,
    err: Option<&dyn Error>,
) where
    Req: Serialize + ?Sized,
    Rep: Serialize + ?Sized,
{
    let fields = grpc_client_fields(method, request, reply, elapsed, metadata, err);
    global_logger().log(grpc_level(err), keys::GRPC, fields);
}

#[doc(hidden)]
#[track_caller]
pub fn http_access_log_in_module(module: &'static str, access: &HttpAccess<'_>) {
    log_in_module(Level::Info, module, keys::HTTP, access.fields());
}

#[doc(hidden)]
#[track_caller]
pub fn grpc_access_log_in_module(
    module: &'static str,
    method: &str,
    elapsed: Duration,
    metadata: &Metadata,
    err: Option<&dyn Error>,
) {
    let fields = grpc_server_fields(method, elapsed, metadata, err);
    log_in_module(grpc_level(err), module, keys::GRPC, fields);
}

#[doc(hidden)]
#[track_caller]
pub fn grpc_client_log_in_module<Req, Rep>(
    module: &'static str,
    method: &str,
    request: &Req,
    reply: &Rep,
    elapsed: Duration,
    metadata: &Metadata,
    err: Option<&dyn Error>,
) where
    Req: Serialize + ?Sized,
    Rep: Serialize + ?Sized,
{
    let fields = grpc_client_fields(method, request, reply, elapsed, metadata, err);
    log_in_module(grpc_level(err), module, keys::GRPC, fields);
}

fn grpc_server_fields(
    method: &str,
    elapsed: Duration,
    metadata: &Metadata,
    err: Option<&dyn Error>,
) -> Vec<Field> {
    vec![
        Field::string(keys::METHOD, method),
        Field::duration(keys::TIME, elapsed),
        Field::any(keys::METADATA, metadata),
        Field::error(err),
    ]
}

fn grpc_client_fields<Req, Rep>(
    method: &str,
    request: &Req,
    reply: &Rep,
    elapsed: Duration,
    metadata: &Metadata,
    err: Option<&dyn Error>,
) -> Vec<Field>
where
    Req: Serialize + ?Sized,
    Rep: Serialize + ?Sized,
{
    vec![
        Field::string(keys::METHOD, method),
        Field::any(keys::REQUEST, request),
        Field::any(keys::REPLY, reply),
        Field::duration(keys::TIME, elapsed),
        Field::any(keys::METADATA, metadata),
        Field::error(err),
    ]
}

fn grpc_level(err: Option<&dyn Error>) -> Level {
    if err.is_some() { Level::Error } else { Level::Info }
}
