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

//! Transport that forwards records into `tracing`
//!
//! Records are re-emitted as events with target `quill`, so they flow
//! through whatever subscriber the application installed. `fatal` has no
//! `tracing` counterpart and is emitted at `ERROR` with `fatal = true`.

use quill_core::{LogLevel, LogRecord, Transport, TransportResult, TransportState};
use serde_json::Value;
use tracing::Level;

/// Map a record level onto a `tracing` level
pub fn tracing_level(level: LogLevel) -> Level {
    match level {
        LogLevel::Trace => Level::TRACE,
        LogLevel::Debug => Level::DEBUG,
        LogLevel::Info => Level::INFO,
        LogLevel::Warn => Level::WARN,
        LogLevel::Error | LogLevel::Fatal => Level::ERROR,
    }
}

/// Transport emitting `tracing` events
#[derive(Debug)]
pub struct TracingTransport {
    state: TransportState,
}

impl TracingTransport {
    /// Create a tracing transport
    pub fn new<S: Into<String>>(id: S) -> Self {
        TracingTransport {
            state: TransportState::new(id),
        }
    }
}

impl Default for TracingTransport {
    fn default() -> Self {
        Self::new("tracing")
    }
}

macro_rules! emit {
    ($macro:ident, $record:expr, $fatal:expr) => {{
        let record = $record;
        let category = record.category().join(".");
        let properties = Value::Object(record.properties().clone());
        tracing::$macro!(
            target: "quill",
            category = %category,
            prefix = record.prefix(),
            properties = %properties,
            fatal = $fatal,
            "{}",
            record.text()
        );
    }};
}

impl Transport for TracingTransport {
    fn state(&self) -> &TransportState {
        &self.state
    }

    fn send(&self, record: &LogRecord) -> TransportResult {
        match record.level() {
            LogLevel::Trace => emit!(trace, record, false),
            LogLevel::Debug => emit!(debug, record, false),
            LogLevel::Info => emit!(info, record, false),
            LogLevel::Warn => emit!(warn, record, false),
            LogLevel::Error => emit!(error, record, false),
            LogLevel::Fatal => emit!(error, record, true),
        }
        Ok(())
    }
}
