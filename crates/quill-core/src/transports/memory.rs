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

//! In-memory transport
//!
//! Captures a [`RecordSnapshot`] of every record it receives. Useful for
//! tests and for inspecting what a logger emitted.
//!
//! # Examples
//!
//! ```rust
//! use quill_core::{Logger, LoggerConfig, MemoryTransport};
//! use std::sync::Arc;
//!
//! let memory = Arc::new(MemoryTransport::new("memory"));
//! let logger = Logger::new(LoggerConfig::default().with_transport(memory.clone()));
//!
//! logger.info("stored").ok();
//! assert_eq!(memory.messages(), vec!["stored"]);
//! ```

use crate::error::{TransportError, TransportResult};
use crate::level::LogLevel;
use crate::record::{LogRecord, RecordSnapshot};
use crate::transport::{Transport, TransportState};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Transport that keeps snapshots of received records
///
/// Thread-safe; the buffer is guarded by a `Mutex`.
#[derive(Debug)]
pub struct MemoryTransport {
    state: TransportState,
    records: Mutex<Vec<RecordSnapshot>>,
    capacity: Option<usize>,
}

impl MemoryTransport {
    /// Create an unbounded memory transport
    pub fn new<S: Into<String>>(id: S) -> Self {
        MemoryTransport {
            state: TransportState::new(id),
            records: Mutex::new(Vec::new()),
            capacity: None,
        }
    }

    /// Keep at most `capacity` records, dropping the oldest first
    pub fn with_capacity<S: Into<String>>(id: S, capacity: usize) -> Self {
        MemoryTransport {
            capacity: Some(capacity),
            ..Self::new(id)
        }
    }

    /// All captured records, oldest first
    pub fn records(&self) -> Vec<RecordSnapshot> {
        self.lock().clone()
    }

    /// Captured records at `level`
    pub fn records_at(&self, level: LogLevel) -> Vec<RecordSnapshot> {
        self.lock()
            .iter()
            .filter(|record| record.level == level)
            .cloned()
            .collect()
    }

    /// Message text of every captured record
    pub fn messages(&self) -> Vec<String> {
        self.lock().iter().map(|record| record.text.clone()).collect()
    }

    /// Most recent record
    pub fn last(&self) -> Option<RecordSnapshot> {
        self.lock().last().cloned()
    }

    /// Number of captured records
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether nothing was captured
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every captured record
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, Vec<RecordSnapshot>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Transport for MemoryTransport {
    fn state(&self) -> &TransportState {
        &self.state
    }

    fn send(&self, record: &LogRecord) -> TransportResult {
        let snapshot = record.snapshot();
        let mut records = self
            .records
            .lock()
            .map_err(|_| TransportError::rejected(self.id(), "record buffer is poisoned"))?;

        records.push(snapshot);
        if let Some(capacity) = self.capacity {
            let excess = records.len().saturating_sub(capacity);
            records.rotate_left(excess);
            records.truncate(capacity);
        }
        Ok(())
    }
}
