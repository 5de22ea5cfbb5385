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

//! Rendering parsed elements back to text
//!
//! Literal runs are re-escaped so the printed output parses back to the same
//! literal text: apostrophes touching an element boundary are doubled and
//! brace runs are wrapped in quotes.
//!
//! Apostrophes inside a literal are printed as-is. A literal holding `''`
//! therefore prints as `''` and parses back as a single `'`; such literals
//! do not survive a print and parse cycle.

use crate::element::{Element, MessagePiece};

/// Renders element sequences
#[derive(Debug, Clone, Copy, Default)]
pub struct MessagePrinter;

impl MessagePrinter {
    /// Create a printer
    pub fn new() -> Self {
        MessagePrinter
    }

    /// Print elements into a single string
    pub fn print_to_string(&self, elements: &[Element]) -> String {
        self.print_to_array(elements)
            .iter()
            .map(MessagePiece::as_str)
            .collect()
    }

    /// Print elements into ordered pieces, one per element
    pub fn print_to_array(&self, elements: &[Element]) -> Vec<MessagePiece> {
        let last = elements.len().saturating_sub(1);
        elements
            .iter()
            .enumerate()
            .map(|(i, element)| match element {
                Element::Literal { value, .. } => {
                    MessagePiece::Literal(print_literal(value, i == 0, i == last))
                }
                Element::Argument { value, .. } => MessagePiece::Argument(value.clone()),
            })
            .collect()
    }
}

/// Print elements with a default printer
pub fn print_to_string(elements: &[Element]) -> String {
    MessagePrinter.print_to_string(elements)
}

/// Print elements to pieces with a default printer
pub fn print_to_array(elements: &[Element]) -> Vec<MessagePiece> {
    MessagePrinter.print_to_array(elements)
}

fn print_literal(value: &str, is_first: bool, is_last: bool) -> String {
    let mut escaped = value.to_string();

    // An apostrophe next to a neighbouring element would pair up with it
    if !is_first && escaped.starts_with('\'') {
        escaped.insert(0, '\'');
    }
    if !is_last && escaped.ends_with('\'') {
        escaped.push('\'');
    }

    escape_braces(&escaped)
}

/// Quote everything from the first brace to the last one
fn escape_braces(text: &str) -> String {
    let is_brace = |c: char| c == '{' || c == '}';
    match (text.find(is_brace), text.rfind(is_brace)) {
        (Some(first), Some(last)) => {
            let mut escaped = String::with_capacity(text.len() + 2);
            escaped.push_str(&text[..first]);
            escaped.push('\'');
            escaped.push_str(&text[first..=last]);
            escaped.push('\'');
            escaped.push_str(&text[last + 1..]);
            escaped
        }
        _ => text.to_string(),
    }
}
