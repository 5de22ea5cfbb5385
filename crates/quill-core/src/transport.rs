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

//! Transport abstraction and the ordered transport set
//!
//! A transport delivers records somewhere: a terminal, a buffer, the
//! `tracing` pipeline. Transports are shared as `Arc<dyn Transport>` so one
//! transport can be attached to several loggers.

use crate::error::{TransportError, TransportResult};
use crate::record::LogRecord;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared transport handle
pub type SharedTransport = Arc<dyn Transport>;

/// Identity and enabled flag common to every transport
#[derive(Debug)]
pub struct TransportState {
    id: String,
    enabled: AtomicBool,
}

impl TransportState {
    /// Enabled state for transport `id`
    pub fn new<S: Into<String>>(id: S) -> Self {
        Self::with_enabled(id, true)
    }

    /// State with an explicit initial flag
    pub fn with_enabled<S: Into<String>>(id: S, enabled: bool) -> Self {
        TransportState {
            id: id.into(),
            enabled: AtomicBool::new(enabled),
        }
    }

    /// Transport id
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Whether the transport receives records
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }

    /// Turn delivery on or off
    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Release);
    }
}

/// Destination for log records
pub trait Transport: Send + Sync {
    /// Shared id and enabled flag
    fn state(&self) -> &TransportState;

    /// Deliver one record
    fn send(&self, record: &LogRecord) -> TransportResult;

    /// Render a record into display segments
    fn formatter(&self, record: &LogRecord) -> Vec<String> {
        format_segments(record)
    }

    /// Transport id
    fn id(&self) -> &str {
        self.state().id()
    }

    /// Whether the transport receives records
    fn is_enabled(&self) -> bool {
        self.state().is_enabled()
    }

    /// Turn delivery on or off
    fn set_enabled(&self, enabled: bool) {
        self.state().set_enabled(enabled);
    }
}

/// Default segments: time, prefix, level, category, message
pub fn format_segments(record: &LogRecord) -> Vec<String> {
    let mut segments = vec![format_time(record.timestamp())];
    if !record.prefix().is_empty() {
        segments.push(record.prefix().to_string());
    }
    segments.push(record.level().short_name().to_string());
    if !record.category().is_empty() {
        segments.push(record.category().join("·"));
    }
    segments.push(record.text());
    segments
}

/// Local wall-clock time `HH:MM:SS.mmm` of a millisecond timestamp
pub fn format_time(timestamp: u64) -> String {
    i64::try_from(timestamp)
        .ok()
        .and_then(chrono::DateTime::from_timestamp_millis)
        .map(|time| {
            time.with_timezone(&chrono::Local)
                .format("%H:%M:%S%.3f")
                .to_string()
        })
        .unwrap_or_default()
}

/// Ordered set of transports keyed by id
#[derive(Clone, Default)]
pub struct TransportManager {
    transports: Vec<SharedTransport>,
}

impl TransportManager {
    /// Create an empty manager
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a transport; an existing transport with the same id is replaced
    /// in place
    pub fn add(&mut self, transport: SharedTransport) {
        match self.position(transport.id()) {
            Some(index) => self.transports[index] = transport,
            None => self.transports.push(transport),
        }
    }

    /// Add several transports in order
    pub fn extend<I: IntoIterator<Item = SharedTransport>>(&mut self, transports: I) {
        for transport in transports {
            self.add(transport);
        }
    }

    /// Remove and return the transport with `id`
    pub fn remove(&mut self, id: &str) -> Option<SharedTransport> {
        let index = self.position(id)?;
        Some(self.transports.remove(index))
    }

    /// Transport with `id`
    pub fn get(&self, id: &str) -> Option<&SharedTransport> {
        self.transports.iter().find(|t| t.id() == id)
    }

    /// Enable transport `id`; returns whether it exists
    pub fn enable(&self, id: &str) -> bool {
        self.set_enabled(id, true)
    }

    /// Disable transport `id`; returns whether it exists
    pub fn disable(&self, id: &str) -> bool {
        self.set_enabled(id, false)
    }

    /// Enable every transport
    pub fn enable_all(&self) {
        self.transports.iter().for_each(|t| t.set_enabled(true));
    }

    /// Disable every transport
    pub fn disable_all(&self) {
        self.transports.iter().for_each(|t| t.set_enabled(false));
    }

    /// Drop every transport
    pub fn release(&mut self) {
        self.transports.clear();
    }

    /// Transports in order
    pub fn iter(&self) -> impl Iterator<Item = &SharedTransport> {
        self.transports.iter()
    }

    /// Ids in order
    pub fn ids(&self) -> Vec<String> {
        self.transports.iter().map(|t| t.id().to_string()).collect()
    }

    /// Number of transports
    pub fn len(&self) -> usize {
        self.transports.len()
    }

    /// Whether there are no transports
    pub fn is_empty(&self) -> bool {
        self.transports.is_empty()
    }

    /// Send `record` to every enabled transport
    ///
    /// Every enabled transport is attempted. Each failure is reported with
    /// `tracing::error!` and the first one is returned.
    pub fn dispatch(&self, record: &LogRecord) -> TransportResult {
        let mut first_error: Option<TransportError> = None;

        for transport in self.transports.iter().filter(|t| t.is_enabled()) {
            if let Err(err) = transport.send(record) {
                tracing::error!(
                    transport = transport.id(),
                    level = %record.level(),
                    error = %err,
                    "transport failed to deliver log record"
                );
                if first_error.is_none() {
                    first_error = Some(err);
                }
            }
        }

        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.transports.iter().position(|t| t.id() == id)
    }

    fn set_enabled(&self, id: &str, enabled: bool) -> bool {
        match self.get(id) {
            Some(transport) => {
                transport.set_enabled(enabled);
                true
            }
            None => false,
        }
    }
}

impl fmt::Debug for TransportManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransportManager")
            .field("ids", &self.ids())
            .finish()
    }
}

impl FromIterator<SharedTransport> for TransportManager {
    fn from_iter<I: IntoIterator<Item = SharedTransport>>(iter: I) -> Self {
        let mut manager = TransportManager::new();
        manager.extend(iter);
        manager
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::context::ContextManager;
    use crate::level::LogLevel;
    use crate::message::MessageSource;
    use crate::record::RecordHeader;
    use std::sync::Mutex;

    struct Recording {
        state: TransportState,
        fail: bool,
        seen: Mutex<Vec<String>>,
    }

    impl Recording {
        fn new(id: &str, fail: bool) -> Arc<Self> {
            Arc::new(Recording {
                state: TransportState::new(id),
                fail,
                seen: Mutex::new(Vec::new()),
            })
        }

        fn seen(&self) -> Vec<String> {
            self.seen.lock().unwrap().clone()
        }
    }

    impl Transport for Recording {
        fn state(&self) -> &TransportState {
            &self.state
        }

        fn send(&self, record: &LogRecord) -> TransportResult {
            self.seen.lock().unwrap().push(record.text());
            if self.fail {
                Err(TransportError::rejected(self.id(), "configured to fail"))
            } else {
                Ok(())
            }
        }
    }

    fn record(text: &str) -> LogRecord {
        LogRecord::build(
            RecordHeader::new(LogLevel::Info)
                .with_prefix("[p]")
                .with_category(vec!["a".to_string(), "b".to_string()]),
            MessageSource::from(text),
            &ContextManager::new(),
        )
    }

    #[test]
    fn test_add_replaces_same_id_in_place() {
        let mut manager = TransportManager::new();
        manager.add(Recording::new("one", false));
        manager.add(Recording::new("two", false));
        let replacement = Recording::new("one", false);
        manager.add(Arc::clone(&replacement) as SharedTransport);

        assert_eq!(manager.ids(), vec!["one", "two"]);
        manager.dispatch(&record("x")).unwrap();
        assert_eq!(replacement.seen(), vec!["x"]);
    }

    #[test]
    fn test_enable_disable() {
        let first = Recording::new("one", false);
        let manager: TransportManager =
            vec![Arc::clone(&first) as SharedTransport].into_iter().collect();

        assert!(manager.disable("one"));
        assert!(!manager.disable("missing"));
        manager.dispatch(&record("skipped")).unwrap();
        assert!(first.seen().is_empty());

        manager.enable_all();
        manager.dispatch(&record("sent")).unwrap();
        assert_eq!(first.seen(), vec!["sent"]);
    }

    #[test]
    fn test_dispatch_attempts_all_and_returns_first_error() {
        let failing_a = Recording::new("fail-a", true);
        let healthy = Recording::new("ok", false);
        let failing_b = Recording::new("fail-b", true);
        let mut manager = TransportManager::new();
        manager.extend([
            Arc::clone(&failing_a) as SharedTransport,
            Arc::clone(&healthy) as SharedTransport,
            Arc::clone(&failing_b) as SharedTransport,
        ]);

        let err = manager.dispatch(&record("m")).unwrap_err();
        assert!(matches!(err, TransportError::Rejected { ref id, .. } if id == "fail-a"));
        assert_eq!(healthy.seen(), vec!["m"]);
        assert_eq!(failing_b.seen(), vec!["m"]);
    }

    #[test]
    fn test_remove_and_release() {
        let mut manager = TransportManager::new();
        manager.add(Recording::new("one", false));
        manager.add(Recording::new("two", false));

        assert!(manager.remove("one").is_some());
        assert!(manager.remove("one").is_none());
        assert_eq!(manager.len(), 1);

        manager.release();
        assert!(manager.is_empty());
    }

    #[test]
    fn test_default_formatter_segments() {
        let transport = Recording::new("fmt", false);
        let segments = transport.formatter(&record("hello"));

        assert_eq!(segments.len(), 5);
        assert_eq!(segments[0].len(), "00:00:00.000".len());
        assert_eq!(&segments[1..], &["[p]", "INF", "a·b", "hello"]);
    }
}
