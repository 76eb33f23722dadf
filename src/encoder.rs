// SPDX-License-Identifier: MIT OR Apache-2.0

//! Record encoders.
//!
//! An [`Encoder`] turns a [`LogRecord`] into one line of bytes. Two encoders are provided:
//!
//! - [`JsonEncoder`] writes one JSON object per line for log pipelines.
//! - [`ConsoleEncoder`] writes a human-readable line, structural elements joined by a
//!   separator, with the fields rendered as a JSON object at the end.
//!
//! Both read their key names and rendering styles from an [`EncoderConfig`]. A key set to
//! the empty string omits that element from the output.
//!
//! ```text
//! {"level":"INFO","time":"2024-05-01T10:00:00.000+0000","service":"billing","message":"hello","user":42}
//! 2024-05-01T10:00:00.000+0000 | INFO | billing | src/main.rs:12 | hello | {"user":42}
//! ```

use crate::field::{Field, Value};
use crate::level::Level;
use crate::log_record::LogRecord;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::borrow::Cow;
use std::fmt::Debug;
use std::io;

const ISO8601: &str = "%Y-%m-%dT%H:%M:%S%.3f%z";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LevelStyle {
    /// `info`
    Lowercase,
    /// `INFO`
    Capital,
    /// `INFO` wrapped in an ANSI color
    CapitalColor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeStyle {
    /// `2024-05-01T10:00:00.000+0200`
    Iso8601,
    /// Fractional seconds since the Unix epoch.
    EpochSeconds,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DurationStyle {
    /// `15ms`, `1.5s`
    String,
    /// Fractional seconds as a number.
    Seconds,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallerStyle {
    /// `dir/file.rs:line`
    Short,
    /// The path as the compiler recorded it.
    Full,
}

/// Key names and rendering styles shared by both encoders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncoderConfig {
    pub name_key: String,
    pub time_key: String,
    pub level_key: String,
    pub caller_key: String,
    /// Only written when the call site's function is known.
    pub function_key: Option<String>,
    pub message_key: String,
    pub level_style: LevelStyle,
    pub time_style: TimeStyle,
    pub duration_style: DurationStyle,
    pub caller_style: CallerStyle,
    /// Joins elements in console output.
    pub console_separator: String,
}

impl EncoderConfig {
    /// Compact keys and numeric time for machine consumption.
    pub fn production() -> Self {
        Self {
            name_key: "logger".to_string(),
            time_key: "ts".to_string(),
            level_key: "level".to_string(),
            caller_key: "caller".to_string(),
            function_key: None,
            message_key: "msg".to_string(),
            level_style: LevelStyle::Lowercase,
            time_style: TimeStyle::EpochSeconds,
            duration_style: DurationStyle::Seconds,
            caller_style: CallerStyle::Short,
            console_separator: "\t".to_string(),
        }
    }

    /// Single-letter keys and readable time for local development.
    pub fn development() -> Self {
        Self {
            name_key: "N".to_string(),
            time_key: "T".to_string(),
            level_key: "L".to_string(),
            caller_key: "C".to_string(),
            function_key: None,
            message_key: "M".to_string(),
            level_style: LevelStyle::Capital,
            time_style: TimeStyle::Iso8601,
            duration_style: DurationStyle::String,
            caller_style: CallerStyle::Short,
            console_separator: "\t".to_string(),
        }
    }

    fn level_text(&self, level: Level) -> Cow<'static, str> {
        match self.level_style {
            LevelStyle::Lowercase => Cow::Borrowed(level.name()),
            LevelStyle::Capital => Cow::Borrowed(level.capital_name()),
            LevelStyle::CapitalColor => Cow::Owned(format!(
                "\x1b[{}m{}\x1b[0m",
                level.color(),
                level.capital_name()
            )),
        }
    }

    fn caller_text(&self, record: &LogRecord) -> Option<String> {
        record.caller().map(|caller| match self.caller_style {
            CallerStyle::Short => caller.short(),
            CallerStyle::Full => caller.full(),
        })
    }

    fn function_entry<'r>(&self, record: &'r LogRecord) -> Option<(&str, &'r str)> {
        let key = self.function_key.as_deref().filter(|key| !key.is_empty())?;
        let function = record.caller()?.function()?;
        Some((key, function))
    }
}

/// Renders a record into one line, trailing newline included.
pub trait Encoder: Debug + Send + Sync {
    fn encode(&self, record: &LogRecord) -> io::Result<Vec<u8>>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonEncoder {
    config: EncoderConfig,
}

impl JsonEncoder {
    pub fn new(config: EncoderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }
}

impl Encoder for JsonEncoder {
    fn encode(&self, record: &LogRecord) -> io::Result<Vec<u8>> {
        let mut line = serde_json::to_vec(&JsonLine {
            record,
            config: &self.config,
        })?;
        line.push(b'\n');
        Ok(line)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleEncoder {
    config: EncoderConfig,
}

impl ConsoleEncoder {
    pub fn new(config: EncoderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }
}

impl Encoder for ConsoleEncoder {
    fn encode(&self, record: &LogRecord) -> io::Result<Vec<u8>> {
        let config = &self.config;
        let mut elements: Vec<String> = Vec::with_capacity(6);

        if !config.time_key.is_empty() {
            elements.push(match config.time_style {
                TimeStyle::Iso8601 => record.time().format(ISO8601).to_string(),
                TimeStyle::EpochSeconds => epoch_seconds(record).to_string(),
            });
        }
        if !config.level_key.is_empty() {
            elements.push(config.level_text(record.level()).into_owned());
        }
        if !config.name_key.is_empty() && !record.logger_name().is_empty() {
            elements.push(record.logger_name().to_string());
        }
        if !config.caller_key.is_empty() {
            if let Some(caller) = config.caller_text(record) {
                elements.push(caller);
            }
            if let Some((_, function)) = config.function_entry(record) {
                elements.push(function.to_string());
            }
        }
        if !config.message_key.is_empty() {
            elements.push(record.message().to_string());
        }
        if !record.fields().is_empty() {
            elements.push(serde_json::to_string(&FieldMap {
                fields: record.fields(),
                config,
            })?);
        }

        let mut line = elements.join(&config.console_separator);
        line.push('\n');
        Ok(line.into_bytes())
    }
}

fn epoch_seconds(record: &LogRecord) -> f64 {
    record.time().timestamp_millis() as f64 / 1000.0
}

fn put<M, V>(map: &mut M, key: &str, value: &V) -> Result<(), M::Error>
where
    M: SerializeMap,
    V: Serialize + ?Sized,
{
    if key.is_empty() {
        return Ok(());
    }
    map.serialize_entry(key, value)
}

struct JsonLine<'a> {
    record: &'a LogRecord,
    config: &'a EncoderConfig,
}

impl Serialize for JsonLine<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let JsonLine { record, config } = *self;
        let mut map = serializer.serialize_map(None)?;

        put(&mut map, &config.level_key, &config.level_text(record.level()))?;
        match config.time_style {
            TimeStyle::Iso8601 => put(
                &mut map,
                &config.time_key,
                &record.time().format(ISO8601).to_string(),
            )?,
            TimeStyle::EpochSeconds => put(&mut map, &config.time_key, &epoch_seconds(record))?,
        }
        if !record.logger_name().is_empty() {
            put(&mut map, &config.name_key, record.logger_name())?;
        }
        if let Some(caller) = config.caller_text(record) {
            put(&mut map, &config.caller_key, &caller)?;
        }
        if let Some((key, function)) = config.function_entry(record) {
            put(&mut map, key, function)?;
        }
        put(&mut map, &config.message_key, record.message())?;
        for field in record.fields() {
            map.serialize_entry(
                field.key(),
                &EncodedValue {
                    value: field.value(),
                    config,
                },
            )?;
        }
        map.end()
    }
}

// Duplicate keys are written as given, so this can't go through serde_json::Map.
struct FieldMap<'a> {
    fields: &'a [Field],
    config: &'a EncoderConfig,
}

impl Serialize for FieldMap<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for field in self.fields {
            map.serialize_entry(
                field.key(),
                &EncodedValue {
                    value: field.value(),
                    config: self.config,
                },
            )?;
        }
        map.end()
    }
}

struct EncodedValue<'a> {
    value: &'a Value,
    config: &'a EncoderConfig,
}

impl Serialize for EncodedValue<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.value {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(v) => serializer.serialize_bool(*v),
            Value::Int(v) => serializer.serialize_i64(*v),
            Value::Uint(v) => serializer.serialize_u64(*v),
            Value::Float(v) => serializer.serialize_f64(*v),
            Value::String(v) => serializer.serialize_str(v),
            Value::Duration(v) => match self.config.duration_style {
                DurationStyle::String => serializer.serialize_str(&format!("{v:?}")),
                DurationStyle::Seconds => serializer.serialize_f64(v.as_secs_f64()),
            },
            Value::Json(v) => v.serialize(serializer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log_record::Caller;
    use std::time::Duration;

    fn structured() -> EncoderConfig {
        EncoderConfig {
            name_key: "service".to_string(),
            time_key: "time".to_string(),
            level_key: "level".to_string(),
            caller_key: "line".to_string(),
            function_key: Some("caller".to_string()),
            message_key: "message".to_string(),
            level_style: LevelStyle::Capital,
            time_style: TimeStyle::Iso8601,
            duration_style: DurationStyle::String,
            caller_style: CallerStyle::Short,
            console_separator: " | ".to_string(),
        }
    }

    fn record() -> LogRecord {
        LogRecord::new(Level::Warn, "disk almost full")
            .with_logger_name("storage")
            .with_caller(Some(Caller::new("/srv/app/src/disk.rs", 88, Some("app::disk"))))
            .with_fields([
                Field::new("free", 12u64),
                Field::duration("time", Duration::from_millis(15)),
            ])
    }

    fn encode_json(config: EncoderConfig, record: &LogRecord) -> serde_json::Value {
        let bytes = JsonEncoder::new(config).encode(record).unwrap();
        assert_eq!(bytes.last(), Some(&b'\n'));
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn json_structural_keys() {
        let json = encode_json(structured(), &record());
        assert_eq!(json["level"], "WARN");
        assert_eq!(json["service"], "storage");
        assert_eq!(json["line"], "src/disk.rs:88");
        assert_eq!(json["caller"], "app::disk");
        assert_eq!(json["message"], "disk almost full");
        assert_eq!(json["free"], 12);
        assert!(json["time"].is_string());
    }

    #[test]
    fn json_field_order_follows_insertion() {
        let record = LogRecord::new(Level::Info, "m").with_fields([
            Field::new("zeta", 1),
            Field::new("alpha", 2),
            Field::new("mid", 3),
        ]);
        let bytes = JsonEncoder::new(structured()).encode(&record).unwrap();
        let line = String::from_utf8(bytes).unwrap();
        let zeta = line.find("\"zeta\"").unwrap();
        let alpha = line.find("\"alpha\"").unwrap();
        let mid = line.find("\"mid\"").unwrap();
        assert!(zeta < alpha && alpha < mid, "{line}");
        // structural keys come first
        assert!(line.find("\"message\"").unwrap() < zeta);
    }

    #[test]
    fn json_omits_absent_caller_and_name() {
        let record = LogRecord::new(Level::Info, "hello");
        let json = encode_json(structured(), &record);
        let keys: Vec<_> = json.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys.len(), 3);
        for key in ["level", "time", "message"] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
    }

    #[test]
    fn json_durations() {
        let encode = |config: EncoderConfig| {
            let bytes = JsonEncoder::new(config).encode(&record()).unwrap();
            String::from_utf8(bytes).unwrap()
        };

        let line = encode(structured());
        assert!(line.contains("\"time\":\"15ms\""), "{line}");

        let mut seconds = structured();
        seconds.duration_style = DurationStyle::Seconds;
        let line = encode(seconds);
        assert!(line.contains("\"time\":0.015"), "{line}");
    }

    #[test]
    fn empty_keys_are_omitted() {
        let mut config = structured();
        config.time_key = String::new();
        config.caller_key = String::new();
        let json = encode_json(config, &record());
        assert!(json.get("line").is_none());
        assert_eq!(json["caller"], "app::disk");
        assert!(json.get("time").is_some(), "the duration field keeps its key");
    }

    #[test]
    fn production_defaults() {
        let json = encode_json(EncoderConfig::production(), &record());
        assert_eq!(json["level"], "warn");
        assert_eq!(json["msg"], "disk almost full");
        assert_eq!(json["logger"], "storage");
        assert!(json["ts"].is_f64());
    }

    #[test]
    fn console_line() {
        let mut config = structured();
        config.function_key = None;
        config.caller_style = CallerStyle::Full;
        let bytes = ConsoleEncoder::new(config).encode(&record()).unwrap();
        let line = String::from_utf8(bytes).unwrap();
        let line = line.strip_suffix('\n').unwrap();
        let parts: Vec<_> = line.split(" | ").collect();
        assert_eq!(parts.len(), 6, "{line}");
        assert_eq!(parts[1], "WARN");
        assert_eq!(parts[2], "storage");
        assert_eq!(parts[3], "/srv/app/src/disk.rs:88");
        assert_eq!(parts[4], "disk almost full");
        assert_eq!(parts[5], r#"{"free":12,"time":"15ms"}"#);
    }

    #[test]
    fn console_colors_levels() {
        let mut config = structured();
        config.level_style = LevelStyle::CapitalColor;
        let record = LogRecord::new(Level::Error, "boom");
        let bytes = ConsoleEncoder::new(config).encode(&record).unwrap();
        let line = String::from_utf8(bytes).unwrap();
        assert!(line.contains("\x1b[31mERROR\x1b[0m"), "{line:?}");
        assert!(line.ends_with("boom\n"), "no fields element expected: {line:?}");
    }
}
