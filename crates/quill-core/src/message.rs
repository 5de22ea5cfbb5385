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

//! The shapes a log call can take
//!
//! Every logging method accepts anything convertible into a
//! [`MessageSource`]:
//!
//! ```rust
//! use quill_core::{properties, Logger, MessageSource};
//! use serde_json::json;
//!
//! let logger = Logger::default();
//! logger.info("plain text").ok();
//! logger.info(("Hello, {name}!", properties! { name = "World" })).ok();
//! logger.info(MessageSource::deferred("took {ms}ms", || properties! { ms = 12 })).ok();
//! logger.info(MessageSource::template(["took ", "ms"], [json!(12)])).ok();
//! logger.info(MessageSource::lazy(|tag| tag.format(&["took ", "ms"], &[json!(12)]))).ok();
//! ```

use crate::record::{render_template, TemplateParts};
use quill_message::{MessagePiece, Properties};
use serde_json::Value;
use std::fmt;

/// Properties given with a text template
pub enum PropertySource {
    /// Known at call time
    Eager(Properties),
    /// Computed on first access of the record's properties
    Deferred(Box<dyn FnOnce() -> Properties>),
}

impl fmt::Debug for PropertySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertySource::Eager(properties) => f.debug_tuple("Eager").field(properties).finish(),
            PropertySource::Deferred(_) => f.write_str("Deferred(..)"),
        }
    }
}

/// Callback that builds a message through a [`TemplateTag`]
pub type LazyMessage = Box<dyn FnOnce(&mut TemplateTag) -> Vec<MessagePiece>>;

/// Input of a log call
pub enum MessageSource {
    /// `{name}` template resolved against properties
    Text {
        /// Template text
        message: String,
        /// Explicit properties, overlaid on the ambient context
        properties: PropertySource,
    },
    /// Message produced on first read by a callback
    Lazy(LazyMessage),
    /// Tagged template with values spliced between the parts
    Template {
        /// Literal parts, one more than `values` in the usual case
        parts: Vec<String>,
        /// Values spliced between parts
        values: Vec<Value>,
    },
}

impl MessageSource {
    /// Template text with no explicit properties
    pub fn text<S: Into<String>>(message: S) -> Self {
        Self::with_properties(message, Properties::new())
    }

    /// Template text with eager properties
    pub fn with_properties<S: Into<String>>(message: S, properties: Properties) -> Self {
        MessageSource::Text {
            message: message.into(),
            properties: PropertySource::Eager(properties),
        }
    }

    /// Template text whose properties are computed on first access
    pub fn deferred<S, F>(message: S, properties: F) -> Self
    where
        S: Into<String>,
        F: FnOnce() -> Properties + 'static,
    {
        MessageSource::Text {
            message: message.into(),
            properties: PropertySource::Deferred(Box::new(properties)),
        }
    }

    /// Message built by `callback` the first time it is read
    pub fn lazy<F>(callback: F) -> Self
    where
        F: FnOnce(&mut TemplateTag) -> Vec<MessagePiece> + 'static,
    {
        MessageSource::Lazy(Box::new(callback))
    }

    /// Tagged template
    pub fn template<P, S, V>(parts: P, values: V) -> Self
    where
        P: IntoIterator<Item = S>,
        S: Into<String>,
        V: IntoIterator<Item = Value>,
    {
        MessageSource::Template {
            parts: parts.into_iter().map(Into::into).collect(),
            values: values.into_iter().collect(),
        }
    }
}

impl fmt::Debug for MessageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageSource::Text {
                message,
                properties,
            } => f
                .debug_struct("Text")
                .field("message", message)
                .field("properties", properties)
                .finish(),
            MessageSource::Lazy(_) => f.write_str("Lazy(..)"),
            MessageSource::Template { parts, values } => f
                .debug_struct("Template")
                .field("parts", parts)
                .field("values", values)
                .finish(),
        }
    }
}

impl From<&str> for MessageSource {
    fn from(message: &str) -> Self {
        MessageSource::text(message)
    }
}

impl From<String> for MessageSource {
    fn from(message: String) -> Self {
        MessageSource::text(message)
    }
}

impl<S: Into<String>> From<(S, Properties)> for MessageSource {
    fn from((message, properties): (S, Properties)) -> Self {
        MessageSource::with_properties(message, properties)
    }
}

/// Tag handed to lazy message callbacks
///
/// [`TemplateTag::format`] records the raw template on the log record and
/// returns its printed pieces.
#[derive(Debug, Default)]
pub struct TemplateTag {
    raw: Option<TemplateParts>,
}

impl TemplateTag {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Format a tagged template; the last call wins
    pub fn format<S: AsRef<str>>(&mut self, parts: &[S], values: &[Value]) -> Vec<MessagePiece> {
        let raw = TemplateParts::new(
            parts.iter().map(|part| part.as_ref().to_string()).collect(),
            values.to_vec(),
        );
        let pieces = render_template(&raw);
        self.raw = Some(raw);
        pieces
    }

    /// Whether `format` has been called
    pub fn is_tagged(&self) -> bool {
        self.raw.is_some()
    }

    pub(crate) fn into_raw(self) -> Option<TemplateParts> {
        self.raw
    }
}
