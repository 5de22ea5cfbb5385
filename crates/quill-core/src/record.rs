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

//! Canonical log records
//!
//! Whatever shape a log call takes, [`LogRecord::build`] turns it into one
//! record. Message pieces, the raw message and the properties may be
//! computed lazily; each is computed at most once.

use crate::context::ContextManager;
use crate::level::LogLevel;
use crate::message::{MessageSource, PropertySource, TemplateTag};
use quill_message::{coerce_value, join_pieces, parse, parse_template, print_to_array};
use quill_message::{MessagePiece, ParseError, Properties};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cell::{Cell, OnceCell};
use std::fmt;

/// Parts and values of a tagged template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateParts {
    /// Literal parts
    pub parts: Vec<String>,
    /// Values spliced between parts
    pub values: Vec<Value>,
}

impl TemplateParts {
    /// Create template parts
    pub fn new(parts: Vec<String>, values: Vec<Value>) -> Self {
        TemplateParts { parts, values }
    }

    /// Parts with the values spliced in
    pub fn splice(&self) -> String {
        let mut text = String::new();
        for (i, part) in self.parts.iter().enumerate() {
            text.push_str(part);
            if let Some(value) = self.values.get(i) {
                text.push_str(&coerce_value(value));
            }
        }
        text
    }
}

/// The message as the caller wrote it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum RawMessage {
    /// `{name}` template text
    Text(String),
    /// Tagged template
    Template(TemplateParts),
}

impl fmt::Display for RawMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawMessage::Text(text) => f.write_str(text),
            RawMessage::Template(parts) => f.write_str(&parts.splice()),
        }
    }
}

/// Fields of a record that are fixed when the call is made
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordHeader {
    /// Severity
    pub level: LogLevel,
    /// Category path, outermost first
    pub category: Vec<String>,
    /// Logger prefix
    pub prefix: String,
    /// Milliseconds since the Unix epoch
    pub timestamp: u64,
}

impl RecordHeader {
    /// Header stamped with the current time
    pub fn new(level: LogLevel) -> Self {
        RecordHeader {
            level,
            category: Vec::new(),
            prefix: String::new(),
            timestamp: now_millis(),
        }
    }

    /// Set the category path
    pub fn with_category(mut self, category: Vec<String>) -> Self {
        self.category = category;
        self
    }

    /// Set the prefix
    pub fn with_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Set the timestamp
    pub fn with_timestamp(mut self, timestamp: u64) -> Self {
        self.timestamp = timestamp;
        self
    }
}

/// Current time in milliseconds since the Unix epoch
pub fn now_millis() -> u64 {
    u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or_default()
}

/// Value computed once by a one-shot initializer
struct Deferred<T> {
    init: Cell<Option<Box<dyn FnOnce() -> T>>>,
    value: OnceCell<T>,
}

impl<T> Deferred<T> {
    fn new(init: impl FnOnce() -> T + 'static) -> Self {
        Deferred {
            init: Cell::new(Some(Box::new(init))),
            value: OnceCell::new(),
        }
    }

    fn ready(value: T) -> Self {
        Deferred {
            init: Cell::new(None),
            value: OnceCell::from(value),
        }
    }

    fn get(&self) -> &T {
        self.value.get_or_init(|| match self.init.take() {
            Some(init) => init(),
            None => panic!("deferred value unavailable (initializer panicked or re-entered)"),
        })
    }

    fn is_resolved(&self) -> bool {
        self.value.get().is_some()
    }
}

/// Outcome of a lazy message callback; `None` when the tag was never called
type LazyOutcome = Option<(Vec<MessagePiece>, RawMessage)>;

enum RecordBody {
    Ready {
        message: Vec<MessagePiece>,
        raw: RawMessage,
    },
    Templated {
        raw: RawMessage,
        message: OnceCell<Vec<MessagePiece>>,
    },
    Callback(Deferred<LazyOutcome>),
}

/// A single log event
///
/// Lent to transports and subscribers as `&LogRecord`. Lazy fields are
/// resolved on first access, so a record is `!Send`.
pub struct LogRecord {
    header: RecordHeader,
    properties: Deferred<Properties>,
    body: RecordBody,
}

impl LogRecord {
    /// Build a record from any call shape
    ///
    /// Ambient properties are read from `context` now; explicit properties
    /// are overlaid on top of them (explicit keys win).
    pub fn build(header: RecordHeader, source: MessageSource, context: &ContextManager) -> Self {
        match source {
            MessageSource::Text {
                message,
                properties: PropertySource::Eager(explicit),
            } => {
                let properties = context.merged(explicit);
                let raw = RawMessage::Text(message);
                let message = render_raw(&raw, &properties);
                LogRecord {
                    header,
                    properties: Deferred::ready(properties),
                    body: RecordBody::Ready { message, raw },
                }
            }
            MessageSource::Text {
                message,
                properties: PropertySource::Deferred(explicit),
            } => {
                let ambient = context.get_store().unwrap_or_default();
                LogRecord {
                    header,
                    properties: Deferred::new(move || {
                        let mut merged = ambient;
                        merged.extend(explicit());
                        merged
                    }),
                    body: RecordBody::Templated {
                        raw: RawMessage::Text(message),
                        message: OnceCell::new(),
                    },
                }
            }
            MessageSource::Lazy(callback) => LogRecord {
                header,
                properties: Deferred::ready(context.get_store().unwrap_or_default()),
                body: RecordBody::Callback(Deferred::new(move || {
                    let mut tag = TemplateTag::new();
                    let pieces = callback(&mut tag);
                    tag.into_raw()
                        .map(|raw| (pieces, RawMessage::Template(raw)))
                })),
            },
            MessageSource::Template { parts, values } => {
                let raw = RawMessage::Template(TemplateParts::new(parts, values));
                let message = render_raw(&raw, &Properties::new());
                LogRecord {
                    header,
                    properties: Deferred::ready(context.get_store().unwrap_or_default()),
                    body: RecordBody::Ready { message, raw },
                }
            }
        }
    }

    /// Severity
    pub fn level(&self) -> LogLevel {
        self.header.level
    }

    /// Category path
    pub fn category(&self) -> &[String] {
        &self.header.category
    }

    /// Logger prefix at call time
    pub fn prefix(&self) -> &str {
        &self.header.prefix
    }

    /// Milliseconds since the Unix epoch
    pub fn timestamp(&self) -> u64 {
        self.header.timestamp
    }

    /// Merged properties
    pub fn properties(&self) -> &Properties {
        self.properties.get()
    }

    /// Printed message pieces
    ///
    /// # Panics
    ///
    /// Panics if the record came from a lazy callback that never called
    /// [`TemplateTag::format`].
    pub fn message(&self) -> &[MessagePiece] {
        match &self.body {
            RecordBody::Ready { message, .. } => message,
            RecordBody::Templated { raw, message } => {
                message.get_or_init(|| render_raw(raw, self.properties()))
            }
            RecordBody::Callback(outcome) => &lazy_outcome(outcome).0,
        }
    }

    /// Message as written at the call site
    ///
    /// # Panics
    ///
    /// Same as [`LogRecord::message`].
    pub fn raw_message(&self) -> &RawMessage {
        match &self.body {
            RecordBody::Ready { raw, .. } | RecordBody::Templated { raw, .. } => raw,
            RecordBody::Callback(outcome) => &lazy_outcome(outcome).1,
        }
    }

    /// Message pieces joined into one string
    pub fn text(&self) -> String {
        join_pieces(self.message())
    }

    /// Whether every lazy field has been computed
    pub fn is_resolved(&self) -> bool {
        let body = match &self.body {
            RecordBody::Ready { .. } => true,
            RecordBody::Templated { message, .. } => message.get().is_some(),
            RecordBody::Callback(outcome) => outcome.is_resolved(),
        };
        body && self.properties.is_resolved()
    }

    /// Owned copy with every lazy field resolved
    pub fn snapshot(&self) -> RecordSnapshot {
        RecordSnapshot {
            level: self.level(),
            category: self.category().to_vec(),
            prefix: self.prefix().to_string(),
            timestamp: self.timestamp(),
            message: self.message().to_vec(),
            text: self.text(),
            raw_message: self.raw_message().clone(),
            properties: self.properties().clone(),
        }
    }
}

impl fmt::Debug for LogRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogRecord")
            .field("header", &self.header)
            .field("resolved", &self.is_resolved())
            .finish_non_exhaustive()
    }
}

/// Owned, serializable copy of a [`LogRecord`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordSnapshot {
    /// Severity
    pub level: LogLevel,
    /// Category path
    pub category: Vec<String>,
    /// Logger prefix
    pub prefix: String,
    /// Milliseconds since the Unix epoch
    pub timestamp: u64,
    /// Printed message pieces
    pub message: Vec<MessagePiece>,
    /// Pieces joined into one string
    pub text: String,
    /// Message as written at the call site
    pub raw_message: RawMessage,
    /// Merged properties
    pub properties: Properties,
}

fn lazy_outcome(outcome: &Deferred<LazyOutcome>) -> &(Vec<MessagePiece>, RawMessage) {
    match outcome.get() {
        Some(outcome) => outcome,
        None => panic!(
            "no log record was made: the lazy message callback never called the template tag"
        ),
    }
}

/// Parse and print a raw message; parse failures yield no pieces
pub(crate) fn render_raw(raw: &RawMessage, properties: &Properties) -> Vec<MessagePiece> {
    match raw {
        RawMessage::Text(text) => match parse(text, properties) {
            Ok(elements) => print_to_array(&elements),
            Err(err) => report_parse_error(&err),
        },
        RawMessage::Template(parts) => render_template(parts),
    }
}

pub(crate) fn render_template(raw: &TemplateParts) -> Vec<MessagePiece> {
    match parse_template(&raw.parts, &raw.values) {
        Ok(elements) => print_to_array(&elements),
        Err(err) => report_parse_error(&err),
    }
}

fn report_parse_error(err: &ParseError) -> Vec<MessagePiece> {
    tracing::warn!(
        kind = err.kind.as_str(),
        template = %err.message,
        error = %err,
        "log message template failed to parse"
    );
    Vec::new()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::panic::{catch_unwind, AssertUnwindSafe};
    use std::rc::Rc;

    fn header() -> RecordHeader {
        RecordHeader::new(LogLevel::Info)
            .with_prefix("[test]")
            .with_category(vec!["app".to_string()])
            .with_timestamp(1_000)
    }

    fn props(value: Value) -> Properties {
        match value {
            Value::Object(map) => map,
            _ => Properties::new(),
        }
    }

    #[test]
    fn test_eager_text_record() {
        let source =
            MessageSource::with_properties("Hello, {name}!", props(json!({"name": "World"})));
        let record = LogRecord::build(header(), source, &ContextManager::new());

        assert!(record.is_resolved());
        assert_eq!(record.text(), "Hello, World!");
        assert_eq!(record.raw_message(), &RawMessage::Text("Hello, {name}!".to_string()));
        assert_eq!(record.prefix(), "[test]");
        assert_eq!(record.timestamp(), 1_000);
    }

    #[test]
    fn test_ambient_context_is_merged() {
        let context = ContextManager::new();
        let mut ambient = ContextManager::create_empty_context();
        ambient.insert("request".to_string(), json!("r-7"));
        ambient.insert("user".to_string(), json!("ambient"));

        let record = context.run_with_context(ambient, || {
            let source =
                MessageSource::with_properties("{user} {request}", props(json!({"user": "ann"})));
            LogRecord::build(header(), source, &context)
        });

        assert_eq!(record.text(), "ann r-7");
        assert_eq!(record.properties().get("request"), Some(&json!("r-7")));
    }

    #[test]
    fn test_deferred_properties_run_once() {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let source = MessageSource::deferred("took {ms}ms", move || {
            counter.set(counter.get() + 1);
            props(json!({"ms": 5}))
        });
        let record = LogRecord::build(header(), source, &ContextManager::new());

        assert_eq!(calls.get(), 0);
        assert!(!record.is_resolved());
        assert_eq!(record.text(), "took 5ms");
        assert_eq!(record.text(), "took 5ms");
        assert_eq!(record.properties().get("ms"), Some(&json!(5)));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_template_record() {
        let source = MessageSource::template(["took ", "ms"], [json!(7)]);
        let record = LogRecord::build(header(), source, &ContextManager::new());
        assert_eq!(record.text(), "took 7ms");
        assert_eq!(record.raw_message().to_string(), "took 7ms");
        assert!(matches!(record.raw_message(), RawMessage::Template(_)));
    }

    #[test]
    fn test_lazy_callback_runs_on_first_read() {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let source = MessageSource::lazy(move |tag| {
            counter.set(counter.get() + 1);
            tag.format(&["n=", ""], &[json!(3)])
        });
        let record = LogRecord::build(header(), source, &ContextManager::new());

        assert_eq!(calls.get(), 0);
        assert_eq!(record.text(), "n=3");
        assert!(matches!(
            record.raw_message(),
            RawMessage::Template(parts) if parts.values == vec![json!(3)]
        ));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_untagged_lazy_callback_panics_on_access() {
        let source = MessageSource::lazy(|_| Vec::new());
        let record = LogRecord::build(header(), source, &ContextManager::new());

        let result = catch_unwind(AssertUnwindSafe(|| record.message().len()));
        assert!(result.is_err());
    }

    fn panic_message(payload: Box<dyn std::any::Any + Send>) -> String {
        match payload.downcast::<&str>() {
            Ok(message) => message.to_string(),
            Err(payload) => payload
                .downcast::<String>()
                .map(|message| *message)
                .unwrap_or_default(),
        }
    }

    #[test]
    fn test_deferred_after_failed_initializer() {
        let deferred: Deferred<u32> = Deferred::new(|| panic!("callback failed"));

        let first = catch_unwind(AssertUnwindSafe(|| *deferred.get())).unwrap_err();
        assert_eq!(panic_message(first), "callback failed");
        assert!(!deferred.is_resolved());

        let second = catch_unwind(AssertUnwindSafe(|| *deferred.get())).unwrap_err();
        assert_eq!(
            panic_message(second),
            "deferred value unavailable (initializer panicked or re-entered)"
        );
    }

    #[test]
    fn test_parse_failure_yields_empty_message() {
        let record =
            LogRecord::build(header(), MessageSource::text("broken {"), &ContextManager::new());
        assert!(record.message().is_empty());
        assert_eq!(record.text(), "");
    }

    #[test]
    fn test_snapshot_serializes() {
        let source = MessageSource::with_properties("{x}", props(json!({"x": 1})));
        let snapshot = LogRecord::build(header(), source, &ContextManager::new()).snapshot();
        let json = serde_json::to_value(&snapshot).unwrap();

        assert_eq!(json["level"], "info");
        assert_eq!(json["text"], "1");
        assert_eq!(json["raw_message"]["kind"], "text");
        assert_eq!(json["message"][0]["kind"], "argument");
    }
}
