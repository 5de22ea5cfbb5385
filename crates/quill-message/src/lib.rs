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

//! Message templates for Quill
//!
//! This crate provides the template language used by log call sites:
//! - **Parser**: turns `"Hello, {name}!"` into literal and argument elements,
//!   resolving arguments from a property map as it goes
//! - **Printer**: renders elements back to a string or to tagged pieces,
//!   re-escaping literal text so the output stays parseable
//! - **Positions**: UTF-16 offsets plus line/column for diagnostics
//!
//! # Quick Start
//!
//! ```rust
//! use quill_message::{parse, print_to_string, Properties};
//! use serde_json::json;
//!
//! let mut properties = Properties::new();
//! properties.insert("name".to_string(), json!("World"));
//!
//! let elements = parse("Hello, {name}!", &properties).unwrap();
//! assert_eq!(print_to_string(&elements), "Hello, World!");
//! ```
//!
//! # Escaping
//!
//! - `''` prints a single apostrophe
//! - `'{` and `'}` start a quoted span where braces are plain text; the span
//!   ends at the next lone apostrophe
//! - any other apostrophe is literal text, so `don't` needs no escaping

pub mod element;
pub mod error;
pub mod parser;
pub mod position;
pub mod printer;

pub use element::{coerce_value, join_pieces, Element, MessagePiece, Properties};
pub use error::{ErrorKind, ParseError, ParseResult};
pub use parser::{parse, parse_template, MessageParser};
pub use position::{Location, Position, PositionTracker};
pub use printer::{print_to_array, print_to_string, MessagePrinter};

/// Parse and print `message` in one step
///
/// # Errors
///
/// Returns the [`ParseError`] when the template is malformed.
pub fn format_message(message: &str, properties: &Properties) -> ParseResult<String> {
    let elements = parse(message, properties)?;
    Ok(print_to_string(&elements))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn format_message_substitutes() {
        let mut properties = Properties::new();
        properties.insert("user".to_string(), json!("ann"));
        assert_eq!(
            format_message("login by {user}", &properties).ok(),
            Some("login by ann".to_string())
        );
    }

    #[test]
    fn format_message_reports_errors() {
        let err = format_message("{}", &Properties::new());
        assert!(matches!(err, Err(e) if e.kind == ErrorKind::EmptyArgument));
    }
}
