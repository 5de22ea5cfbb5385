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

//! Parsed template elements and printed pieces

use crate::position::Location;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Property map used for argument substitution
pub type Properties = serde_json::Map<String, Value>;

/// One parsed unit of a template
///
/// Arguments carry their resolved substitution, not the placeholder name:
/// lookup happens while parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Element {
    /// Verbatim text, with quoting already removed
    Literal {
        /// Unescaped text
        value: String,
        /// Span in the source template
        location: Location,
    },
    /// Placeholder substitution
    Argument {
        /// Resolved property value, or the identifier when unresolved
        value: String,
        /// Span in the source template, braces included
        location: Location,
    },
}

impl Element {
    /// Text carried by the element
    pub fn value(&self) -> &str {
        match self {
            Element::Literal { value, .. } | Element::Argument { value, .. } => value,
        }
    }

    /// Source span of the element
    pub fn location(&self) -> Location {
        match self {
            Element::Literal { location, .. } | Element::Argument { location, .. } => *location,
        }
    }

    /// Whether this is a literal run
    pub fn is_literal(&self) -> bool {
        matches!(self, Element::Literal { .. })
    }

    /// Whether this is a substituted argument
    pub fn is_argument(&self) -> bool {
        matches!(self, Element::Argument { .. })
    }
}

/// Printed form of an element
///
/// Pieces keep their kind so renderers can style substituted values without
/// relying on their index.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum MessagePiece {
    /// Re-escaped literal text
    Literal(String),
    /// Substituted value
    Argument(String),
}

impl MessagePiece {
    /// Printed text of the piece
    pub fn as_str(&self) -> &str {
        match self {
            MessagePiece::Literal(text) | MessagePiece::Argument(text) => text,
        }
    }

    /// Whether the piece came from an argument
    pub fn is_argument(&self) -> bool {
        matches!(self, MessagePiece::Argument(_))
    }
}

impl fmt::Display for MessagePiece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Join printed pieces into one string
pub fn join_pieces(pieces: &[MessagePiece]) -> String {
    pieces.iter().map(MessagePiece::as_str).collect()
}

/// String form of a property value
///
/// Strings are used as-is; every other value uses its JSON rendering, so
/// `1` becomes `"1"` and `[1,2]` stays `"[1,2]"`.
pub fn coerce_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
