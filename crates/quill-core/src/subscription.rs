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

//! Ordered registry of log listeners

use crate::id::{IdGenerator, UuidGenerator};
use crate::level::LogLevel;
use crate::record::LogRecord;
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

/// Listener invoked for every record a logger builds
pub type LogCallback = dyn Fn(LogLevel, &LogRecord);

struct Entry {
    id: String,
    callback: Rc<LogCallback>,
}

type Entries = RefCell<Vec<Entry>>;

/// Registry of subscriptions, notified in registration order
pub struct SubscriptionRegistry {
    entries: Rc<Entries>,
    ids: Rc<dyn IdGenerator>,
}

impl SubscriptionRegistry {
    /// Create a registry with UUID subscription ids
    pub fn new() -> Self {
        Self::with_id_generator(Rc::new(UuidGenerator))
    }

    /// Create a registry drawing ids from `ids`
    pub fn with_id_generator(ids: Rc<dyn IdGenerator>) -> Self {
        SubscriptionRegistry {
            entries: Rc::new(RefCell::new(Vec::new())),
            ids,
        }
    }

    /// Register `callback` and return its handle
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(LogLevel, &LogRecord) + 'static,
    {
        let id = self.ids.generate(None);
        self.entries.borrow_mut().push(Entry {
            id: id.clone(),
            callback: Rc::new(callback),
        });
        Subscription {
            id,
            entries: Rc::downgrade(&self.entries),
        }
    }

    /// Invoke every subscription with `(level, record)`
    ///
    /// Iterates a snapshot taken before the first call, so callbacks may
    /// subscribe or unsubscribe freely; changes apply from the next
    /// notification.
    pub fn notify_all(&self, level: LogLevel, record: &LogRecord) {
        let snapshot: Vec<Rc<LogCallback>> = self
            .entries
            .borrow()
            .iter()
            .map(|entry| Rc::clone(&entry.callback))
            .collect();

        for callback in snapshot {
            callback(level, record);
        }
    }

    /// Ids of live subscriptions in order
    pub fn ids(&self) -> Vec<String> {
        self.entries.borrow().iter().map(|e| e.id.clone()).collect()
    }

    /// Number of live subscriptions
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Whether there are no subscriptions
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every subscription
    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }
}

impl Default for SubscriptionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SubscriptionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubscriptionRegistry")
            .field("ids", &self.ids())
            .finish()
    }
}

/// Handle returned by [`SubscriptionRegistry::subscribe`]
///
/// Dropping the handle keeps the subscription alive; call
/// [`Subscription::unsubscribe`] to remove it.
#[derive(Debug, Clone)]
pub struct Subscription {
    id: String,
    entries: Weak<Entries>,
}

impl Subscription {
    /// Subscription id
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Remove the subscription; repeated calls are no-ops
    pub fn unsubscribe(&self) {
        if let Some(entries) = self.entries.upgrade() {
            entries.borrow_mut().retain(|entry| entry.id != self.id);
        }
    }

    /// Whether the subscription is still registered
    pub fn is_active(&self) -> bool {
        self.entries
            .upgrade()
            .is_some_and(|entries| entries.borrow().iter().any(|entry| entry.id == self.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::SequentialIdGenerator;
    use crate::message::MessageSource;
    use crate::record::RecordHeader;
    use crate::ContextManager;

    fn record() -> LogRecord {
        LogRecord::build(
            RecordHeader::new(LogLevel::Info),
            MessageSource::from("hello"),
            &ContextManager::new(),
        )
    }

    #[test]
    fn test_notifies_in_order() {
        let registry = SubscriptionRegistry::new();
        let calls = Rc::new(RefCell::new(Vec::new()));
        for name in ["a", "b", "c"] {
            let calls = Rc::clone(&calls);
            registry.subscribe(move |_, _| calls.borrow_mut().push(name));
        }

        registry.notify_all(LogLevel::Info, &record());
        assert_eq!(*calls.borrow(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_unsubscribe_is_idempotent() {
        let registry =
            SubscriptionRegistry::with_id_generator(Rc::new(SequentialIdGenerator::new("s")));
        let first = registry.subscribe(|_, _| {});
        let second = registry.subscribe(|_, _| {});
        assert_eq!(registry.ids(), vec!["s-1", "s-2"]);

        first.unsubscribe();
        first.unsubscribe();
        assert!(!first.is_active());
        assert!(second.is_active());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_handle_outlives_registry() {
        let registry = SubscriptionRegistry::new();
        let subscription = registry.subscribe(|_, _| {});
        drop(registry);
        subscription.unsubscribe();
        assert!(!subscription.is_active());
    }

    #[test]
    fn test_unsubscribe_during_notification() {
        let registry = Rc::new(SubscriptionRegistry::new());
        let count = Rc::new(RefCell::new(0));
        let slot: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));

        let subscription = {
            let count = Rc::clone(&count);
            let slot = Rc::clone(&slot);
            registry.subscribe(move |_, _| {
                *count.borrow_mut() += 1;
                if let Some(own) = slot.borrow().as_ref() {
                    own.unsubscribe();
                }
            })
        };
        *slot.borrow_mut() = Some(subscription);

        registry.notify_all(LogLevel::Info, &record());
        registry.notify_all(LogLevel::Info, &record());
        assert_eq!(*count.borrow(), 1);
        assert!(registry.is_empty());
    }
}
