// SPDX-License-Identifier: MIT OR Apache-2.0

//! Logging macros.
//!
//! The crate-level functions cannot see which module called them. These macros pass
//! `module_path!()` along, and the JSON encoder writes it under `caller` next to the `line`
//! of the call site.
//!
//! `debugf!` through `fatalf!` take `format!`-style arguments:
//!
//! ```
//! let attempts = 3;
//! svclog::warnf!("retrying after {attempts} attempts");
//! ```
//!
//! `debugw!` through `fatalw!` take a message and the field list of the keyed functions,
//! which [`fields!`](crate::fields) builds from `key => value` pairs:
//!
//! ```
//! svclog::infow!("user signed in", svclog::fields!["user" => 42, "admin" => false]);
//! ```
//!
//! [`context_log!`](crate::context_log!) starts a [`ContextLog`](crate::ContextLog), and
//! `http_access_log!`, `grpc_access_log!` and `grpc_client_log!` take the same arguments as
//! the functions of the same name.

#[macro_export]
macro_rules! debugf {
    ($($arg:tt)+) => {
        $crate::hidden::log_in_module(
            $crate::Level::Debug,
            module_path!(),
            format_args!($($arg)+),
            ::core::iter::empty(),
        )
    };
}

#[macro_export]
macro_rules! infof {
    ($($arg:tt)+) => {
        $crate::hidden::log_in_module(
            $crate::Level::Info,
            module_path!(),
            format_args!($($arg)+),
            ::core::iter::empty(),
        )
    };
}

#[macro_export]
macro_rules! warnf {
    ($($arg:tt)+) => {
        $crate::hidden::log_in_module(
            $crate::Level::Warn,
            module_path!(),
            format_args!($($arg)+),
            ::core::iter::empty(),
        )
    };
}

#[macro_export]
macro_rules! errorf {
    ($($arg:tt)+) => {
        $crate::hidden::log_in_module(
            $crate::Level::Error,
            module_path!(),
            format_args!($($arg)+),
            ::core::iter::empty(),
        )
    };
}

#[macro_export]
macro_rules! dpanicf {
    ($($arg:tt)+) => {
        $crate::hidden::log_in_module(
            $crate::Level::DPanic,
            module_path!(),
            format_args!($($arg)+),
            ::core::iter::empty(),
        )
    };
}

#[macro_export]
macro_rules! panicf {
    ($($arg:tt)+) => {
        $crate::hidden::log_in_module(
            $crate::Level::Panic,
            module_path!(),
            format_args!($($arg)+),
            ::core::iter::empty(),
        )
    };
}

#[macro_export]
macro_rules! fatalf {
    ($($arg:tt)+) => {
        $crate::hidden::log_in_module(
            $crate::Level::Fatal,
            module_path!(),
            format_args!($($arg)+),
            ::core::iter::empty(),
        )
    };
}

#[macro_export]
macro_rules! debugw {
    ($message:expr, $fields:expr $(,)?) => {
        $crate::hidden::log_in_module($crate::Level::Debug, module_path!(), $message, $fields)
    };
}

#[macro_export]
macro_rules! infow {
    ($message:expr, $fields:expr $(,)?) => {
        $crate::hidden::log_in_module($crate::Level::Info, module_path!(), $message, $fields)
    };
}

#[macro_export]
macro_rules! warnw {
    ($message:expr, $fields:expr $(,)?) => {
        $crate::hidden::log_in_module($crate::Level::Warn, module_path!(), $message, $fields)
    };
}

#[macro_export]
macro_rules! errorw {
    ($message:expr, $fields:expr $(,)?) => {
        $crate::hidden::log_in_module($crate::Level::Error, module_path!(), $message, $fields)
    };
}

#[macro_export]
macro_rules! dpanicw {
    ($message:expr, $fields:expr $(,)?) => {
        $crate::hidden::log_in_module($crate::Level::DPanic, module_path!(), $message, $fields)
    };
}

#[macro_export]
macro_rules! panicw {
    ($message:expr, $fields:expr $(,)?) => {
        $crate::hidden::log_in_module($crate::Level::Panic, module_path!(), $message, $fields)
    };
}

#[macro_export]
macro_rules! fatalw {
    ($message:expr, $fields:expr $(,)?) => {
        $crate::hidden::log_in_module($crate::Level::Fatal, module_path!(), $message, $fields)
    };
}

/// `[Field; N]` from `key => value` pairs.
#[macro_export]
macro_rules! fields {
    ($($key:expr => $value:expr),* $(,)?) => {
        [$($crate::Field::new($key, $value)),*]
    };
}

/// A [`ContextLog`](crate::ContextLog) holding `key => value` pairs and the calling module.
#[macro_export]
macro_rules! context_log {
    () => {
        $crate::ContextLog::default().in_module(module_path!())
    };
    ($($key:expr => $value:expr),+ $(,)?) => {
        $crate::ContextLog::new($crate::fields![$($key => $value),+]).in_module(module_path!())
    };
}

#[macro_export]
macro_rules! http_access_log {
    ($access:expr $(,)?) => {
        $crate::hidden::http_access_log_in_module(module_path!(), $access)
    };
}

#[macro_export]
macro_rules! grpc_access_log {
    ($($arg:expr),+ $(,)?) => {
        $crate::hidden::grpc_access_log_in_module(module_path!(), $($arg),+)
    };
}

#[macro_export]
macro_rules! grpc_client_log {
    ($($arg:expr),+ $(,)?) => {
        $crate::hidden::grpc_client_log_in_module(module_path!(), $($arg),+)
    };
}

#[cfg(test)]
mod tests {
    use crate::test_support::{capture_global, guard};
    use crate::{Field, HttpAccess, Level, Metadata, Value};
    use std::time::Duration;

    fn records(sink: &crate::InMemorySink) -> Vec<serde_json::Value> {
        sink.drain_lines()
            .iter()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn fields_macro_keeps_order() {
        let fields = fields!["b" => 1, "a" => "x", "c" => true,];
        let keys: Vec<_> = fields.iter().map(Field::key).collect();
        assert_eq!(keys, ["b", "a", "c"]);
        assert_eq!(fields[1].value(), &Value::String("x".to_string()));
    }

    #[test]
    fn empty_fields_macro() {
        let fields: [Field; 0] = fields![];
        assert!(fields.is_empty());
    }

    #[test]
    fn keyed_macros_record_the_module() {
        let _guard = guard();
        let sink = capture_global(Level::Debug);

        infow!("keyed", fields!["a" => 1]);
        errorw!("from a vec", vec![Field::new("b", 2)]);
        debugf!("plain");

        let records = records(&sink);
        assert_eq!(records.len(), 3);
        for record in &records {
            assert_eq!(record["caller"], module_path!());
            assert!(record["line"].as_str().unwrap().starts_with("src/macros.rs:"));
        }
        assert_eq!(records[0]["message"], "keyed");
        assert_eq!(records[0]["a"], 1);
        assert_eq!(records[1]["level"], "ERROR");
        assert_eq!(records[1]["b"], 2);
        assert_eq!(records[2]["level"], "DEBUG");
    }

    #[test]
    fn keyed_macros_respect_the_threshold() {
        let _guard = guard();
        let sink = capture_global(Level::Warn);
        infow!("hidden", fields!["a" => 1]);
        warnw!("shown", fields!["a" => 1]);
        assert_eq!(sink.drain_lines().len(), 1);
    }

    #[test]
    fn access_macros_record_the_module() {
        let _guard = guard();
        let sink = capture_global(Level::Debug);

        http_access_log!(&HttpAccess::new("GET", "/x", 200, Duration::from_millis(15)));
        grpc_access_log!("/orders.Orders/Get", Duration::ZERO, &Metadata::new(), None);
        grpc_client_log!(
            "/orders.Orders/Get",
            &7,
            &"shipped",
            Duration::ZERO,
            &Metadata::new(),
            None,
        );

        let records = records(&sink);
        assert_eq!(records.len(), 3);
        for record in &records {
            assert_eq!(record["caller"], module_path!());
        }
        assert_eq!(records[0]["message"], "http");
        assert_eq!(records[0]["uri"], "/x");
        assert_eq!(records[1]["message"], "grpc");
        assert!(records[1]["error"].is_null());
        assert_eq!(records[2]["reply"], "shipped");
    }
}
