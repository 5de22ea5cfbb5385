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

//! The logger engine
//!
//! A [`Logger`] turns log calls into [`LogRecord`]s, gates them on its
//! lowest level, fans them out to transports and notifies subscribers.
//!
//! ```rust
//! use quill_core::{properties, LogLevel, Logger, LoggerConfig, MemoryTransport};
//! use std::sync::Arc;
//!
//! let memory = Arc::new(MemoryTransport::new("memory"));
//! let logger = Logger::new(
//!     LoggerConfig::default()
//!         .with_prefix("[app]")
//!         .with_lowest_level(Some(LogLevel::Info))
//!         .with_transport(memory.clone()),
//! );
//!
//! logger.debug("dropped").ok();
//! logger.info(("user {id} signed in", properties! { id = 42 })).ok();
//! assert_eq!(memory.messages(), vec!["user 42 signed in"]);
//! ```

use crate::context::ContextManager;
use crate::error::TransportResult;
use crate::id::{IdGenerator, UuidGenerator};
use crate::level::LogLevel;
use crate::message::MessageSource;
use crate::record::{now_millis, LogRecord, RecordHeader};
use crate::subscription::{Subscription, SubscriptionRegistry};
use crate::transport::{SharedTransport, TransportManager};
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

/// Prefix used when none is configured
pub const DEFAULT_PREFIX: &str = "[Logger]";

/// Logger construction options
#[derive(Clone)]
pub struct LoggerConfig {
    /// Text prepended to every record
    pub prefix: String,
    /// Whether the logger starts enabled
    pub enabled: bool,
    /// Category path
    pub category: Vec<String>,
    /// Initial transports
    pub transports: Vec<SharedTransport>,
    /// Records below this level are not sent; `None` mutes the logger
    pub lowest_level: Option<LogLevel>,
    id_generator: Rc<dyn IdGenerator>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        LoggerConfig {
            prefix: DEFAULT_PREFIX.to_string(),
            enabled: true,
            category: Vec::new(),
            transports: Vec::new(),
            lowest_level: Some(LogLevel::Debug),
            id_generator: Rc::new(UuidGenerator),
        }
    }
}

impl LoggerConfig {
    /// Set the prefix
    pub fn with_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Set whether the logger starts enabled
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Set the category path
    pub fn with_category<I, S>(mut self, category: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.category = category.into_iter().map(Into::into).collect();
        self
    }

    /// Add a transport
    pub fn with_transport(mut self, transport: SharedTransport) -> Self {
        self.transports.push(transport);
        self
    }

    /// Add several transports
    pub fn with_transports<I: IntoIterator<Item = SharedTransport>>(
        mut self,
        transports: I,
    ) -> Self {
        self.transports.extend(transports);
        self
    }

    /// Set the lowest level sent to transports
    pub fn with_lowest_level(mut self, level: Option<LogLevel>) -> Self {
        self.lowest_level = level;
        self
    }

    /// Use `ids` for subscription ids
    pub fn with_id_generator<G: IdGenerator + 'static>(mut self, ids: G) -> Self {
        self.id_generator = Rc::new(ids);
        self
    }
}

impl fmt::Debug for LoggerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggerConfig")
            .field("prefix", &self.prefix)
            .field("enabled", &self.enabled)
            .field("category", &self.category)
            .field("transports", &self.transports.len())
            .field("lowest_level", &self.lowest_level)
            .finish_non_exhaustive()
    }
}

/// State shared between a logger and its children
struct Shared {
    prefix: RefCell<String>,
    enabled: Cell<bool>,
    lowest_level: Cell<Option<LogLevel>>,
    transports: RefCell<TransportManager>,
    context: ContextManager,
    ids: Rc<dyn IdGenerator>,
}

/// Structured logger
///
/// Single-threaded: a logger and everything it shares with its children
/// live on one thread. Transports may be shared across threads.
pub struct Logger {
    category: Vec<String>,
    shared: Rc<Shared>,
    subscriptions: SubscriptionRegistry,
}

macro_rules! level_methods {
    ($($(#[$doc:meta])* $name:ident => $level:expr;)+) => {
        $(
            $(#[$doc])*
            ///
            /// # Errors
            ///
            /// Returns the first transport failure; every transport is still
            /// attempted and subscribers are still notified.
            pub fn $name<M: Into<MessageSource>>(&self, source: M) -> TransportResult {
                self.log($level, source)
            }
        )+
    };
}

impl Logger {
    /// Create a logger
    pub fn new(config: LoggerConfig) -> Self {
        let subscriptions =
            SubscriptionRegistry::with_id_generator(Rc::clone(&config.id_generator));
        let transports: TransportManager = config.transports.into_iter().collect();

        Logger {
            category: config.category,
            shared: Rc::new(Shared {
                prefix: RefCell::new(config.prefix),
                enabled: Cell::new(config.enabled),
                lowest_level: Cell::new(config.lowest_level),
                transports: RefCell::new(transports),
                context: ContextManager::new(),
                ids: config.id_generator,
            }),
            subscriptions,
        }
    }

    level_methods! {
        /// Log at `trace`
        trace => LogLevel::Trace;
        /// Log at `debug`
        debug => LogLevel::Debug;
        /// Log at `info`
        info => LogLevel::Info;
        /// Log at `warn`
        warn => LogLevel::Warn;
        /// Log at `error`
        error => LogLevel::Error;
        /// Log at `fatal`
        fatal => LogLevel::Fatal;
    }

    /// Log at `level`
    ///
    /// A disabled logger returns immediately. Otherwise a record is built,
    /// sent to every enabled transport when `level` passes the lowest level,
    /// and handed to every subscriber either way.
    ///
    /// # Errors
    ///
    /// Returns the first transport failure.
    pub fn log<M: Into<MessageSource>>(&self, level: LogLevel, source: M) -> TransportResult {
        if !self.shared.enabled.get() {
            return Ok(());
        }

        let header = RecordHeader {
            level,
            category: self.category.clone(),
            prefix: self.shared.prefix.borrow().clone(),
            timestamp: now_millis(),
        };
        let record = LogRecord::build(header, source.into(), &self.shared.context);

        let result = if self.accepts(level) {
            let transports = self.shared.transports.borrow().clone();
            transports.dispatch(&record)
        } else {
            Ok(())
        };

        self.subscriptions.notify_all(level, &record);
        result
    }

    /// Whether a record at `level` would reach transports
    pub fn accepts(&self, level: LogLevel) -> bool {
        self.shared
            .lowest_level
            .get()
            .is_some_and(|lowest| level >= lowest)
    }

    /// Subscribe to every record this logger builds
    pub fn on_log<F>(&self, callback: F) -> Subscription
    where
        F: Fn(LogLevel, &LogRecord) + 'static,
    {
        self.subscriptions.subscribe(callback)
    }

    /// Scoped context used for ambient properties
    pub fn context(&self) -> &ContextManager {
        &self.shared.context
    }

    /// Create a child logger with `name` appended to the category
    ///
    /// The child shares transports, prefix, level, enabled flag and context
    /// with this logger; it has its own subscribers.
    pub fn child<S: Into<String>>(&self, name: S) -> Logger {
        let mut category = self.category.clone();
        category.push(name.into());
        Logger {
            category,
            shared: Rc::clone(&self.shared),
            subscriptions: SubscriptionRegistry::with_id_generator(Rc::clone(&self.shared.ids)),
        }
    }

    /// Attach a transport, replacing one with the same id
    pub fn add_transport(&self, transport: SharedTransport) {
        tracing::debug!(transport = transport.id(), "transport attached");
        self.shared.transports.borrow_mut().add(transport);
    }

    /// Detach transport `id`
    pub fn remove_transport(&self, id: &str) -> Option<SharedTransport> {
        let removed = self.shared.transports.borrow_mut().remove(id);
        if removed.is_some() {
            tracing::debug!(transport = id, "transport detached");
        }
        removed
    }

    /// Snapshot of the attached transports
    ///
    /// Enabling or disabling through the snapshot affects the live
    /// transports; adding or removing does not.
    pub fn transports(&self) -> TransportManager {
        self.shared.transports.borrow().clone()
    }

    /// Detach every transport
    pub fn release_transports(&self) {
        self.shared.transports.borrow_mut().release();
    }

    /// Resume logging
    pub fn enable(&self) {
        self.shared.enabled.set(true);
    }

    /// Stop logging; calls return immediately
    pub fn disable(&self) {
        self.shared.enabled.set(false);
    }

    /// Whether the logger is enabled
    pub fn is_enabled(&self) -> bool {
        self.shared.enabled.get()
    }

    /// Current prefix
    pub fn prefix(&self) -> String {
        self.shared.prefix.borrow().clone()
    }

    /// Replace the prefix
    pub fn set_prefix<S: Into<String>>(&self, prefix: S) {
        *self.shared.prefix.borrow_mut() = prefix.into();
    }

    /// Category path
    pub fn category(&self) -> &[String] {
        &self.category
    }

    /// Lowest level sent to transports; `None` when muted
    pub fn lowest_level(&self) -> Option<LogLevel> {
        self.shared.lowest_level.get()
    }

    /// Change the lowest level
    pub fn set_lowest_level(&self, level: Option<LogLevel>) {
        self.shared.lowest_level.set(level);
    }

    /// Subscriber registry
    pub fn subscriptions(&self) -> &SubscriptionRegistry {
        &self.subscriptions
    }
}

impl Default for Logger {
    fn default() -> Self {
        Logger::new(LoggerConfig::default())
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("prefix", &self.prefix())
            .field("category", &self.category)
            .field("enabled", &self.is_enabled())
            .field("lowest_level", &self.lowest_level())
            .field("transports", &self.shared.transports.borrow())
            .field("subscriptions", &self.subscriptions)
            .finish()
    }
}
