// Quill - Structured logging with message templates
// Copyright (C) 2025 Quill Contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published
// by the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.

//! Convenience macros for logging with properties.
//!
//! Each macro takes a logger, a template and optional `key = value`
//! properties, and returns the logger's `TransportResult`.
//!
//! ```rust
//! use quill_observability::log_info;
//! use quill_core::Logger;
//!
//! let logger = Logger::default();
//! log_info!(logger, "plain").ok();
//! log_info!(logger, "user {id} from {ip}", id = 7, ip = "10.0.0.1").ok();
//! ```

/// Log at `trace` with properties
#[macro_export]
macro_rules! log_trace {
    ($logger:expr, $msg:expr) => {
        $logger.trace($msg)
    };
    ($logger:expr, $msg:expr, $($key:ident = $value:expr),+ $(,)?) => {
        $logger.trace(($msg, $crate::properties!($($key = $value),+)))
    };
}

/// Log at `debug` with properties
#[macro_export]
macro_rules! log_debug {
    ($logger:expr, $msg:expr) => {
        $logger.debug($msg)
    };
    ($logger:expr, $msg:expr, $($key:ident = $value:expr),+ $(,)?) => {
        $logger.debug(($msg, $crate::properties!($($key = $value),+)))
    };
}

/// Log at `info` with properties
#[macro_export]
macro_rules! log_info {
    ($logger:expr, $msg:expr) => {
        $logger.info($msg)
    };
    ($logger:expr, $msg:expr, $($key:ident = $value:expr),+ $(,)?) => {
        $logger.info(($msg, $crate::properties!($($key = $value),+)))
    };
}

/// Log at `warn` with properties
#[macro_export]
macro_rules! log_warn {
    ($logger:expr, $msg:expr) => {
        $logger.warn($msg)
    };
    ($logger:expr, $msg:expr, $($key:ident = $value:expr),+ $(,)?) => {
        $logger.warn(($msg, $crate::properties!($($key = $value),+)))
    };
}

/// Log at `error` with properties
#[macro_export]
macro_rules! log_error {
    ($logger:expr, $msg:expr) => {
        $logger.error($msg)
    };
    ($logger:expr, $msg:expr, $($key:ident = $value:expr),+ $(,)?) => {
        $logger.error(($msg, $crate::properties!($($key = $value),+)))
    };
}

/// Log at `fatal` with properties
#[macro_export]
macro_rules! log_fatal {
    ($logger:expr, $msg:expr) => {
        $logger.fatal($msg)
    };
    ($logger:expr, $msg:expr, $($key:ident = $value:expr),+ $(,)?) => {
        $logger.fatal(($msg, $crate::properties!($($key = $value),+)))
    };
}
