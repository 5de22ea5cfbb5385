// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2025 Quill Contributors

//! Transports and writers for tests.

use quill_core::{LogRecord, Transport, TransportError, TransportResult, TransportState};
use std::io::{self, Write};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Transport that rejects every record and counts the attempts.
#[derive(Debug)]
pub struct FailingTransport {
    state: TransportState,
    reason: String,
    attempts: AtomicUsize,
}

impl FailingTransport {
    /// Create a failing transport with a generic reason.
    pub fn new(id: &str) -> Self {
        Self::with_reason(id, "simulated failure")
    }

    /// Create a failing transport with a custom reason.
    pub fn with_reason(id: &str, reason: &str) -> Self {
        Self {
            state: TransportState::new(id),
            reason: reason.to_string(),
            attempts: AtomicUsize::new(0),
        }
    }

    /// Number of records this transport was asked to send.
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

impl Transport for FailingTransport {
    fn state(&self) -> &TransportState {
        &self.state
    }

    fn send(&self, _record: &LogRecord) -> TransportResult {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(TransportError::rejected(self.id(), self.reason.as_str()))
    }
}

/// Cloneable in-memory writer.
///
/// Hand one clone to a transport and read the output from another.
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, lossily decoded.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.bytes.lock().expect("buffer poisoned")).into_owned()
    }

    /// Written lines.
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes.lock().expect("buffer poisoned").extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
