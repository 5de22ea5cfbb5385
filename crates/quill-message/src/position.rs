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

//! Source positions for template diagnostics
//!
//! Offsets are counted in UTF-16 code units so they line up with editors and
//! JavaScript tooling; lines and columns are counted in Unicode code points.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A point in a template string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Offset in UTF-16 code units
    pub offset: usize,
    /// 1-based line number
    pub line: usize,
    /// 1-based column, in code points
    pub column: usize,
}

impl Position {
    /// Position of the first character of any input
    pub const START: Position = Position {
        offset: 0,
        line: 1,
        column: 1,
    };
}

impl Default for Position {
    fn default() -> Self {
        Position::START
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Half-open span between two positions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Location {
    /// Where the span starts
    pub start: Position,
    /// Where the span ends (exclusive)
    pub end: Position,
}

impl Location {
    /// Create a location from two positions
    pub fn new(start: Position, end: Position) -> Self {
        Location { start, end }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Running cursor over a template
///
/// The tracker only knows how to advance past one code point at a time; the
/// parser owns the input and feeds it characters.
#[derive(Debug, Clone, Default)]
pub struct PositionTracker {
    position: Position,
}

impl PositionTracker {
    /// Create a tracker at [`Position::START`]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the current position
    pub fn position(&self) -> Position {
        self.position
    }

    /// Current offset in UTF-16 code units
    pub fn offset(&self) -> usize {
        self.position.offset
    }

    /// Advance past `ch`
    pub fn advance(&mut self, ch: char) {
        if ch == '\n' {
            self.position.line += 1;
            self.position.column = 1;
            self.position.offset += 1;
        } else {
            self.position.column += 1;
            // Astral code points occupy a surrogate pair in UTF-16
            self.position.offset += ch.len_utf16();
        }
    }

    /// Rewind to [`Position::START`]
    pub fn reset(&mut self) {
        self.position = Position::START;
    }
}
