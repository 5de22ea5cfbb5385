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

//! Template parse error types

use crate::element::Element;
use crate::position::Location;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Result type alias for parse operations
pub type ParseResult<T = Vec<Element>> = Result<T, ParseError>;

/// What went wrong while parsing an argument
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Argument is unclosed (e.g. `{0`)
    ExpectArgumentClosingBrace,
    /// Argument is empty (e.g. `{}`)
    EmptyArgument,
    /// Argument is malformed (e.g. `{foo!}`)
    MalformedArgument,
}

impl ErrorKind {
    /// Stable snake_case name
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::ExpectArgumentClosingBrace => "expect_argument_closing_brace",
            ErrorKind::EmptyArgument => "empty_argument",
            ErrorKind::MalformedArgument => "malformed_argument",
        }
    }

    fn describe(self) -> &'static str {
        match self {
            ErrorKind::ExpectArgumentClosingBrace => "expected a closing brace for argument",
            ErrorKind::EmptyArgument => "argument is empty",
            ErrorKind::MalformedArgument => "argument is malformed",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// Recoverable template error
///
/// Returned as a value; malformed templates never panic.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("{kind} at {location}")]
pub struct ParseError {
    /// The kind of error
    pub kind: ErrorKind,
    /// The full template the error occurred in
    pub message: String,
    /// Span from the opening brace to where parsing stopped
    pub location: Location,
}

impl ParseError {
    /// Create a parse error
    pub fn new(kind: ErrorKind, message: impl Into<String>, location: Location) -> Self {
        ParseError {
            kind,
            message: message.into(),
            location,
        }
    }

    /// Check if this is an unclosed argument error
    pub fn is_unclosed(&self) -> bool {
        self.kind == ErrorKind::ExpectArgumentClosingBrace
    }

    /// Check if this is an empty argument error
    pub fn is_empty_argument(&self) -> bool {
        self.kind == ErrorKind::EmptyArgument
    }

    /// Check if this is a malformed argument error
    pub fn is_malformed(&self) -> bool {
        self.kind == ErrorKind::MalformedArgument
    }
}
