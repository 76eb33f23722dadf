// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed key/value fields attached to log records.
//!
//! A [`Field`] pairs a key with a [`Value`]. Fields keep the order they were added in, and
//! encoders write them in that order after the structural keys.
//!
//! ```
//! use svclog::{Field, Value};
//! use std::time::Duration;
//!
//! let user = Field::new("user", 42);
//! assert_eq!(user.value(), &Value::Int(42));
//!
//! let elapsed = Field::new("time", Duration::from_millis(15));
//! assert_eq!(elapsed.key(), "time");
//! ```

use serde::Serialize;
use std::borrow::Cow;
use std::time::Duration;

/// The value half of a [`Field`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    String(String),
    /// Rendered according to the encoder's duration style.
    Duration(Duration),
    /// Arbitrary serialized data, see [`Field::any`].
    Json(serde_json::Value),
}

macro_rules! value_from {
    ($variant:ident as $target:ty: $($source:ty),+) => {
        $(
            impl From<$source> for Value {
                fn from(v: $source) -> Self {
                    Value::$variant(v as $target)
                }
            }
        )+
    };
}

value_from!(Int as i64: i8, i16, i32, i64, isize);
value_from!(Uint as u64: u8, u16, u32, u64, usize);
value_from!(Float as f64: f32, f64);

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<Cow<'_, str>> for Value {
    fn from(v: Cow<'_, str>) -> Self {
        Value::String(v.into_owned())
    }
}

impl From<Duration> for Value {
    fn from(v: Duration) -> Self {
        Value::Duration(v)
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        Value::Json(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

/**
A single key/value pair on a log record.

Keys are usually string literals, so they are stored as `Cow<'static, str>` and only
allocate when built from an owned string.
*/
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    key: Cow<'static, str>,
    value: Value,
}

impl Field {
    pub fn new(key: impl Into<Cow<'static, str>>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn string(key: impl Into<Cow<'static, str>>, value: impl Into<String>) -> Self {
        Self::new(key, Value::String(value.into()))
    }

    pub fn int(key: impl Into<Cow<'static, str>>, value: i64) -> Self {
        Self::new(key, Value::Int(value))
    }

    pub fn duration(key: impl Into<Cow<'static, str>>, value: Duration) -> Self {
        Self::new(key, Value::Duration(value))
    }

    /**
    Serializes any serde value into a field.

    Serialization failures are never surfaced. The field is replaced by a string field
    named `<key>Error` holding the serializer's message.
    */
    pub fn any<T: Serialize + ?Sized>(key: impl Into<Cow<'static, str>>, value: &T) -> Self {
        let key = key.into();
        match serde_json::to_value(value) {
            Ok(json) => Self::new(key, Value::Json(json)),
            Err(err) => Self::new(format!("{key}Error"), Value::String(err.to_string())),
        }
    }

    /// An [`ERROR`](crate::keys::ERROR) field: the error's message, or null when absent.
    pub fn error(err: Option<&dyn std::error::Error>) -> Self {
        Self::new(
            crate::keys::ERROR,
            err.map_or(Value::Null, |err| Value::String(err.to_string())),
        )
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &Value {
        &self.value
    }
}
