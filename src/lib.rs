//SPDX-License-Identifier: MIT OR Apache-2.0
/*!
# svclog

svclog is a process-wide structured logging facade for services.

# The problem

Every service in a fleet ends up writing the same glue: pick an encoding, pick a level,
write JSON to stdout, remember which key holds the message, and somehow get the trace id
of the current request onto the line. When each service writes that glue itself, the keys
drift apart and the log pipeline has to learn every variant.

svclog is that glue, written once. It is configured once at startup and then used from
anywhere through crate-level functions.

# Configuration

```rust
use svclog::{Config, Encoding, Level};

svclog::configure("billing", &Config {
    encoding: Encoding::Json,
    level: Level::Info,
    dev_mode: false,
    capture_caller: true,
    ..Config::default()
});
```

| Option           | Values                                                  | Effect                                   |
|------------------|---------------------------------------------------------|------------------------------------------|
| `encoding`       | `json`, `console`                                       | JSON lines, or colored text split by pipes |
| `level`          | `debug`, `info`, `warn`, `error`, `dpanic`, `panic`, `fatal` | threshold; unknown names mean `debug` |
| `dev_mode`       | bool                                                    | `dpanic` panics after writing            |
| `capture_caller` | bool                                                    | adds the call site under `line`          |

Output always goes to stdout. A JSON record looks like:

```text
{"level":"INFO","time":"2024-05-01T10:00:00.000+0000","service":"billing","line":"src/main.rs:14","message":"hello","user":42}
```

# The API

Each severity has three shapes:

```rust
use svclog::Field;

svclog::info("plain message");
svclog::infof!("formatted {}", "message");
svclog::info_w("keyed message", [Field::new("user", 42)]);
```

The functions cannot see which module called them. With `capture_caller` on, their JSON
records carry `line` but no `caller`. The macro forms add it:

```rust
svclog::infof!("formatted {}", "message");
svclog::infow!("keyed message", svclog::fields!["user" => 42]);
svclog::context_log!["user" => 42].error("failed");
```

`dpanic`, `panic` and `fatal` are not ordinary levels: after writing they panic (in
development mode, for `dpanic`) or exit the process. Use them for conditions the program
should not survive.

# Context loggers

A [`ContextLog`] collects fields for a single statement, including the span id of an
OpenTelemetry context, then writes one record:

```rust
use svclog::{ContextLog, Field};

ContextLog::new([Field::new("user", 42)])
    .with_current_tracing_context()
    .error("failed to load profile");
```

# Access logs

[`http_access_log`], [`grpc_access_log`] and [`grpc_client_log`] write middleware access
records with a fixed key vocabulary (see [`keys`]).

# Multithreading

Logging is safe from any thread. Reconfiguring is also safe while other threads log;
records already in flight finish on the logger they started with. For dependency
injection, [`global_logger`] hands out the current [`Logger`] and [`set_global_logger`]
installs a hand-built one.
*/

mod access;
mod config;
mod context_log;
mod encoder;
mod field;
pub mod global_logger;
mod inmemory_sink;
pub mod keys;
mod level;
mod leveled;
mod log_record;
mod logger;
mod macros;
mod sink;
mod stdout_sink;

#[cfg(test)]
mod test_support;

pub use access::{HttpAccess, Metadata, grpc_access_log, grpc_client_log, http_access_log};
pub use config::{Config, Encoding};
pub use context_log::{ContextLog, with_context, with_log};
pub use encoder::{
    CallerStyle, ConsoleEncoder, DurationStyle, Encoder, EncoderConfig, JsonEncoder, LevelStyle,
    TimeStyle,
};
pub use field::{Field, Value};
pub use global_logger::{
    configure, configure_with_sink, global_logger, set_global_logger, with_default,
};
pub use inmemory_sink::InMemorySink;
pub use level::{Level, ParseLevelError};
pub use leveled::{
    debug, debug_f, debug_w, dpanic, dpanic_f, dpanic_w, error, error_f, error_w, fatal, fatal_f,
    fatal_w, info, info_f, info_w, panic, panic_f, panic_w, warn, warn_f, warn_w,
};
pub use log_record::{Caller, LogRecord};
pub use logger::Logger;
pub use sink::Sink;
pub use stdout_sink::StdoutSink;

#[doc(hidden)]
pub mod hidden {
    pub use crate::access::{
        grpc_access_log_in_module, grpc_client_log_in_module, http_access_log_in_module,
    };
    pub use crate::leveled::log_in_module;
}
