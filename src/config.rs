// SPDX-License-Identifier: MIT OR Apache-2.0

//! Logger configuration.
//!
//! [`Config`] is the single knob set of the facade: output encoding, threshold, development
//! mode and call-site capture. It derives serde so the owning application can keep it in
//! its own configuration file:
//!
//! ```
//! use svclog::{Config, Encoding, Level};
//!
//! let config: Config = serde_json::from_str(
//!     r#"{"encoding": "console", "level": "warn", "dev_mode": true}"#,
//! ).unwrap();
//! assert_eq!(config.encoding, Encoding::Console);
//! assert_eq!(config.level, Level::Warn);
//! assert!(config.capture_caller, "missing keys keep their defaults");
//! ```
//!
//! Parsing never fails on bad values: unknown level names become `debug` and unknown
//! encodings become `json`. The level name is kept as written in
//! [`level_name`](Config::level_name), so the configuration announcement can show what was
//! asked for.

use crate::encoder::{
    CallerStyle, ConsoleEncoder, DurationStyle, Encoder, EncoderConfig, JsonEncoder, LevelStyle,
    TimeStyle,
};
use crate::keys;
use crate::level::Level;
use crate::logger::Logger;
use crate::sink::Sink;
use crate::stdout_sink::StdoutSink;
use serde::{Deserialize, Serialize, Serializer};
use std::sync::Arc;

/// Output rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(from = "String")]
pub enum Encoding {
    /// One JSON object per line.
    #[default]
    Json,
    /// Human-readable, colored, ` | `-separated.
    Console,
}

impl Encoding {
    /// `"console"` selects [`Encoding::Console`]; anything else is JSON.
    pub fn from_name(name: &str) -> Self {
        if name == "console" {
            Encoding::Console
        } else {
            Encoding::Json
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Encoding::Json => "json",
            Encoding::Console => "console",
        }
    }
}

impl From<String> for Encoding {
    fn from(name: String) -> Self {
        Encoding::from_name(&name)
    }
}

impl Serialize for Encoding {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawConfig")]
pub struct Config {
    pub encoding: Encoding,
    pub level: Level,
    /// Development mode: `DPanic` records panic after writing.
    pub dev_mode: bool,
    /// Annotate records with the logging call's source location.
    pub capture_caller: bool,
    /**
    The level as written in the configuration source, unknown names included.

    Only used to announce the configuration, and only while it still resolves to
    [`level`](Self::level).
    */
    #[serde(skip_serializing)]
    pub level_name: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            encoding: Encoding::Json,
            level: Level::Info,
            dev_mode: false,
            capture_caller: true,
            level_name: None,
        }
    }
}

// Deserialization goes through here to keep the level name as written.
#[derive(Deserialize)]
#[serde(default)]
struct RawConfig {
    encoding: Encoding,
    level: Option<String>,
    dev_mode: bool,
    capture_caller: bool,
}

impl Default for RawConfig {
    fn default() -> Self {
        let config = Config::default();
        Self {
            encoding: config.encoding,
            level: None,
            dev_mode: config.dev_mode,
            capture_caller: config.capture_caller,
        }
    }
}

impl From<RawConfig> for Config {
    fn from(raw: RawConfig) -> Self {
        Self {
            encoding: raw.encoding,
            level: raw.level.as_deref().map_or(Level::default(), Level::from_name),
            dev_mode: raw.dev_mode,
            capture_caller: raw.capture_caller,
            level_name: raw.level,
        }
    }
}

impl Config {
    /// The level name for the configuration announcement: [`level_name`](Self::level_name)
    /// when it still resolves to [`level`](Self::level), otherwise the level's own name.
    pub fn announced_level(&self) -> &str {
        match self.level_name.as_deref() {
            Some(name) if Level::from_name(name) == self.level => name,
            _ => self.level.name(),
        }
    }

    /// Installs a stdout logger built from this config as the global logger.
    ///
    /// Same as [`configure`](crate::configure).
    #[track_caller]
    pub fn apply(&self, service: &str) {
        crate::global_logger::configure(service, self);
    }

    /// A stdout logger named `service`.
    pub fn build(&self, service: &str) -> Logger {
        self.build_with_sink(service, Arc::new(StdoutSink::new()))
    }

    /// A logger named `service` writing to `sink`.
    pub fn build_with_sink(&self, service: &str, sink: Arc<dyn Sink>) -> Logger {
        let encoder_config = self.encoder_config();
        let encoder: Arc<dyn Encoder> = match self.encoding {
            Encoding::Json => Arc::new(JsonEncoder::new(encoder_config)),
            Encoding::Console => Arc::new(ConsoleEncoder::new(encoder_config)),
        };
        Logger::new(encoder, sink)
            .with_threshold(self.level)
            .with_caller(self.capture_caller)
            .with_development(self.dev_mode)
            .named(service)
    }

    /**
    The encoder settings for this config.

    Starts from the development or production defaults, then assigns the facade's fixed
    key names and styles. JSON output also gets the `caller` function key; console output
    gets colored levels, full caller paths and the ` | ` separator.
    */
    pub fn encoder_config(&self) -> EncoderConfig {
        let mut config = if self.dev_mode {
            EncoderConfig::development()
        } else {
            EncoderConfig::production()
        };
        config.name_key = keys::SERVICE.to_string();
        config.time_key = keys::TIME.to_string();
        config.level_key = keys::LEVEL.to_string();
        config.caller_key = keys::LINE.to_string();
        config.message_key = keys::MESSAGE.to_string();
        config.time_style = TimeStyle::Iso8601;
        config.level_style = LevelStyle::Capital;
        config.caller_style = CallerStyle::Short;
        config.duration_style = DurationStyle::String;

        match self.encoding {
            Encoding::Console => {
                config.level_style = LevelStyle::CapitalColor;
                config.caller_style = CallerStyle::Full;
                config.console_separator = " | ".to_string();
            }
            Encoding::Json => {
                config.function_key = Some(keys::CALLER.to_string());
            }
        }
        config
    }
}
