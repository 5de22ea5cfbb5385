// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2025 Quill Contributors

//! Subscriber recorder for logger tests.

use quill_core::{LogLevel, Logger, RecordSnapshot, Subscription};
use std::cell::RefCell;
use std::rc::Rc;

/// One notification seen by a recorder.
#[derive(Debug, Clone, PartialEq)]
pub struct NotifiedEvent {
    /// Level passed to the subscriber.
    pub level: LogLevel,
    /// Category of the record.
    pub category: Vec<String>,
    /// Resolved record, when the recorder captures snapshots.
    pub snapshot: Option<RecordSnapshot>,
}

/// Records every notification a logger delivers.
///
/// A plain recorder never reads the message, so lazy records stay unresolved.
#[derive(Debug, Clone, Default)]
pub struct SubscriberRecorder {
    events: Rc<RefCell<Vec<NotifiedEvent>>>,
    capture: bool,
}

impl SubscriberRecorder {
    /// Recorder that records levels and categories only.
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorder that also resolves and stores each record.
    pub fn capturing() -> Self {
        Self {
            capture: true,
            ..Self::default()
        }
    }

    /// Subscribe this recorder to `logger`.
    pub fn attach(&self, logger: &Logger) -> Subscription {
        let events = Rc::clone(&self.events);
        let capture = self.capture;
        logger.on_log(move |level, record| {
            events.borrow_mut().push(NotifiedEvent {
                level,
                category: record.category().to_vec(),
                snapshot: capture.then(|| record.snapshot()),
            });
        })
    }

    /// All events in notification order.
    pub fn events(&self) -> Vec<NotifiedEvent> {
        self.events.borrow().clone()
    }

    /// Levels in notification order.
    pub fn levels(&self) -> Vec<LogLevel> {
        self.events.borrow().iter().map(|e| e.level).collect()
    }

    /// Message texts of captured snapshots.
    pub fn messages(&self) -> Vec<String> {
        self.events
            .borrow()
            .iter()
            .filter_map(|e| e.snapshot.as_ref().map(|s| s.text.clone()))
            .collect()
    }

    /// Number of notifications.
    pub fn count(&self) -> usize {
        self.events.borrow().len()
    }
}
