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

//! Recursive-descent parser for message templates
//!
//! Grammar:
//! - literal text: any run without an unescaped `{`
//! - argument: `{`, optional whitespace, identifier, optional whitespace, `}`
//! - `''` is a literal apostrophe; `'{` or `'}` opens a quoted span that ends
//!   at the next lone apostrophe (or end of input)
//!
//! Arguments are resolved against the property map while parsing, so the
//! resulting [`Element::Argument`] holds the substituted value.

use crate::element::{coerce_value, Element, Properties};
use crate::error::{ErrorKind, ParseError, ParseResult};
use crate::position::{Location, Position, PositionTracker};
use serde_json::Value;

/// Single-use template parser
///
/// A parser that has consumed input panics when asked to parse again; call
/// [`MessageParser::release`] to reuse it.
#[derive(Debug, Default)]
pub struct MessageParser {
    message: String,
    chars: Vec<char>,
    index: usize,
    tracker: PositionTracker,
}

impl MessageParser {
    /// Create a fresh parser
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a tagged template
    ///
    /// Parts and values are interleaved as `parts[0], values[0], parts[1], ...`
    /// with values spliced in as text, then parsed with no properties. Braces
    /// inside spliced values are therefore parsed like template text.
    pub fn parse_template<S: AsRef<str>>(&mut self, parts: &[S], values: &[Value]) -> ParseResult {
        let message = splice_template(parts, values);
        self.parse(&message, &Properties::new())
    }

    /// Parse `message`, resolving arguments from `properties`
    ///
    /// # Panics
    ///
    /// Panics if this parser already consumed input and was not released.
    pub fn parse(&mut self, message: &str, properties: &Properties) -> ParseResult {
        if self.tracker.offset() != 0 {
            panic!("parser can only be used once; call release() before reusing it");
        }

        self.message = message.to_string();
        self.chars = message.chars().collect();
        self.index = 0;

        self.parse_message(0, properties)
    }

    /// Reset all state so the parser can be used again
    pub fn release(&mut self) {
        self.message.clear();
        self.chars.clear();
        self.index = 0;
        self.tracker.reset();
    }

    /// Current cursor position
    pub fn position(&self) -> Position {
        self.tracker.position()
    }

    fn parse_message(&mut self, nesting_level: usize, properties: &Properties) -> ParseResult {
        let mut elements = Vec::new();

        while !self.is_eof() {
            match self.current() {
                '{' => elements.push(self.parse_argument(properties)?),
                '}' if nesting_level > 0 => break,
                _ => elements.push(self.parse_literal(nesting_level)),
            }
        }

        Ok(elements)
    }

    fn parse_argument(&mut self, properties: &Properties) -> ParseResult<Element> {
        let opening = self.tracker.position();
        self.bump(); // `{`

        self.bump_space();

        if self.is_eof() {
            return Err(self.error(ErrorKind::ExpectArgumentClosingBrace, opening));
        }

        if self.current() == '}' {
            self.bump();
            return Err(self.error(ErrorKind::EmptyArgument, opening));
        }

        let name = self.parse_identifier();
        if name.is_empty() {
            return Err(self.error(ErrorKind::MalformedArgument, opening));
        }

        self.bump_space();

        if self.is_eof() {
            return Err(self.error(ErrorKind::ExpectArgumentClosingBrace, opening));
        }

        if self.current() != '}' {
            return Err(self.error(ErrorKind::MalformedArgument, opening));
        }
        self.bump(); // `}`

        // Missing and null properties both fall back to the placeholder name
        let value = match properties.get(&name) {
            Some(value) if !value.is_null() => coerce_value(value),
            _ => name,
        };

        Ok(Element::Argument {
            value,
            location: Location::new(opening, self.tracker.position()),
        })
    }

    fn parse_literal(&mut self, nesting_level: usize) -> Element {
        let start = self.tracker.position();
        let mut value = String::new();

        loop {
            if let Some(quoted) = self.try_parse_quote() {
                value.push_str(&quoted);
                continue;
            }

            if let Some(ch) = self.try_parse_unquoted(nesting_level) {
                value.push(ch);
                continue;
            }

            break;
        }

        Element::Literal {
            value,
            location: Location::new(start, self.tracker.position()),
        }
    }

    fn try_parse_unquoted(&mut self, nesting_level: usize) -> Option<char> {
        if self.is_eof() {
            return None;
        }

        let ch = self.current();
        if ch == '{' || (ch == '}' && nesting_level > 0) {
            return None;
        }

        self.bump();
        Some(ch)
    }

    /// An apostrophe only starts quoted text when it immediately precedes a
    /// character that needs quoting.
    fn try_parse_quote(&mut self) -> Option<String> {
        if self.is_eof() || self.current() != '\'' {
            return None;
        }

        match self.peek() {
            Some('\'') => {
                self.bump();
                self.bump();
                return Some("'".to_string());
            }
            Some('{') | Some('}') => {}
            _ => return None,
        }

        self.bump(); // apostrophe
        let mut quoted = String::new();
        quoted.push(self.current());
        self.bump();

        while !self.is_eof() {
            let ch = self.current();
            if ch == '\'' {
                if self.peek() == Some('\'') {
                    quoted.push('\'');
                    self.bump();
                } else {
                    // optional closing apostrophe
                    self.bump();
                    break;
                }
            } else {
                quoted.push(ch);
            }
            self.bump();
        }

        Some(quoted)
    }

    fn parse_identifier(&mut self) -> String {
        let mut identifier = String::new();
        while !self.is_eof() && is_identifier_char(self.current()) {
            identifier.push(self.current());
            self.bump();
        }
        identifier
    }

    fn error(&self, kind: ErrorKind, start: Position) -> ParseError {
        ParseError::new(
            kind,
            self.message.clone(),
            Location::new(start, self.tracker.position()),
        )
    }

    fn is_eof(&self) -> bool {
        self.index >= self.chars.len()
    }

    fn bump(&mut self) {
        if self.is_eof() {
            return;
        }
        let ch = self.current();
        self.tracker.advance(ch);
        self.index += 1;
    }

    fn bump_space(&mut self) {
        while !self.is_eof() && is_template_whitespace(self.current()) {
            self.bump();
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.index + 1).copied()
    }

    fn current(&self) -> char {
        match self.chars.get(self.index) {
            Some(ch) => *ch,
            None => panic!(
                "parser position {} is out of bound for input of {} code points",
                self.index,
                self.chars.len()
            ),
        }
    }
}

/// Parse `message` with a fresh parser
pub fn parse(message: &str, properties: &Properties) -> ParseResult {
    MessageParser::new().parse(message, properties)
}

/// Parse a tagged template with a fresh parser
pub fn parse_template<S: AsRef<str>>(parts: &[S], values: &[Value]) -> ParseResult {
    MessageParser::new().parse_template(parts, values)
}

fn splice_template<S: AsRef<str>>(parts: &[S], values: &[Value]) -> String {
    let mut message = String::new();
    for (i, part) in parts.iter().enumerate() {
        message.push_str(part.as_ref());
        if let Some(value) = values.get(i) {
            message.push_str(&coerce_value(value));
        }
    }
    message
}

/// Whitespace skipped around argument names
fn is_template_whitespace(c: char) -> bool {
    matches!(
        c,
        '\u{0009}'..='\u{000D}'
            | '\u{0020}'
            | '\u{0085}'
            | '\u{200E}'..='\u{200F}'
            | '\u{2028}'
            | '\u{2029}'
    )
}

fn is_identifier_char(c: char) -> bool {
    !c.is_whitespace() && !is_pattern_syntax(c)
}

/// Unicode `Pattern_Syntax`, reserved for future grammar extensions
///
/// The property is immutable across Unicode versions.
fn is_pattern_syntax(c: char) -> bool {
    matches!(
        c,
        '\u{0021}'..='\u{002F}'
            | '\u{003A}'..='\u{0040}'
            | '\u{005B}'..='\u{005E}'
            | '\u{0060}'
            | '\u{007B}'..='\u{007E}'
            | '\u{00A1}'..='\u{00A7}'
            | '\u{00A9}'
            | '\u{00AB}'..='\u{00AC}'
            | '\u{00AE}'
            | '\u{00B0}'..='\u{00B1}'
            | '\u{00B6}'
            | '\u{00BB}'
            | '\u{00BF}'
            | '\u{00D7}'
            | '\u{00F7}'
            | '\u{2010}'..='\u{2027}'
            | '\u{2030}'..='\u{203E}'
            | '\u{2041}'..='\u{2053}'
            | '\u{2055}'..='\u{205E}'
            | '\u{2190}'..='\u{245F}'
            | '\u{2500}'..='\u{2775}'
            | '\u{2794}'..='\u{2BFF}'
            | '\u{2E00}'..='\u{2E7F}'
            | '\u{3001}'..='\u{3003}'
            | '\u{3008}'..='\u{3020}'
            | '\u{3030}'
            | '\u{FD3E}'..='\u{FD3F}'
            | '\u{FE45}'..='\u{FE46}'
    )
}
