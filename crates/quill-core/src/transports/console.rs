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

//! Terminal transport
//!
//! Writes one line per record:
//!
//! ```text
//! 14:03:07.412 [app] INF http·server listening on 8080
//! ```
//!
//! Styling uses the `console` crate: the level tag is colored per level and
//! substituted argument values are highlighted.

use crate::error::{TransportError, TransportResult};
use crate::level::LogLevel;
use crate::record::LogRecord;
use crate::transport::{format_time, Transport, TransportState};
use console::{style, StyledObject};
use quill_message::MessagePiece;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

/// Standard stream a console transport writes to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsoleTarget {
    /// Standard error
    #[default]
    Stderr,
    /// Standard output
    Stdout,
}

enum Sink {
    Stream(ConsoleTarget),
    Writer(Mutex<Box<dyn Write + Send>>),
}

/// Custom segment builder replacing the default line layout
pub type SegmentFormatter = Box<dyn Fn(&LogRecord) -> Vec<String> + Send + Sync>;

/// Transport printing human readable lines
pub struct ConsoleTransport {
    state: TransportState,
    sink: Sink,
    colors: bool,
    segments: Option<SegmentFormatter>,
}

impl ConsoleTransport {
    /// Console transport writing to stderr
    pub fn new<S: Into<String>>(id: S) -> Self {
        Self::with_target(id, ConsoleTarget::Stderr)
    }

    /// Console transport writing to `target`, colored when the stream is a
    /// color-capable terminal
    pub fn with_target<S: Into<String>>(id: S, target: ConsoleTarget) -> Self {
        let colors = match target {
            ConsoleTarget::Stderr => console::colors_enabled_stderr(),
            ConsoleTarget::Stdout => console::colors_enabled(),
        };
        ConsoleTransport {
            state: TransportState::new(id),
            sink: Sink::Stream(target),
            colors,
            segments: None,
        }
    }

    /// Console transport writing to an arbitrary writer, uncolored
    pub fn with_writer<S, W>(id: S, writer: W) -> Self
    where
        S: Into<String>,
        W: Write + Send + 'static,
    {
        ConsoleTransport {
            state: TransportState::new(id),
            sink: Sink::Writer(Mutex::new(Box::new(writer))),
            colors: false,
            segments: None,
        }
    }

    /// Force colors on or off
    pub fn with_colors(mut self, colors: bool) -> Self {
        self.colors = colors;
        self
    }

    /// Replace the line layout; segments are joined with single spaces
    pub fn with_formatter<F>(mut self, formatter: F) -> Self
    where
        F: Fn(&LogRecord) -> Vec<String> + Send + Sync + 'static,
    {
        self.segments = Some(Box::new(formatter));
        self
    }

    /// Whether output is styled
    pub fn colors(&self) -> bool {
        self.colors
    }

    /// Render `record` as a single line without a trailing newline
    pub fn render(&self, record: &LogRecord) -> String {
        self.formatter(record).join(" ")
    }

    fn styled_segments(&self, record: &LogRecord) -> Vec<String> {
        let level = record.level();
        let time = format_time(record.timestamp());

        let mut segments = vec![self.paint(style(time.as_str()).dim())];
        if !record.prefix().is_empty() {
            segments.push(self.paint(style(record.prefix()).bold()));
        }
        segments.push(self.paint(level_style(level, level.short_name())));
        if !record.category().is_empty() {
            let category = record.category().join("·");
            segments.push(self.paint(style(category.as_str()).cyan()));
        }

        let mut message = String::new();
        for piece in record.message() {
            match piece {
                MessagePiece::Literal(text) => message.push_str(text),
                MessagePiece::Argument(text) => {
                    message.push_str(&self.paint(style(text.as_str()).magenta()))
                }
            }
        }
        segments.push(message);
        segments
    }

    fn paint<D: fmt::Display>(&self, styled: StyledObject<D>) -> String {
        styled.force_styling(self.colors).to_string()
    }

    fn write_line(&self, line: &str) -> io::Result<()> {
        match &self.sink {
            Sink::Stream(ConsoleTarget::Stderr) => writeln!(io::stderr().lock(), "{}", line),
            Sink::Stream(ConsoleTarget::Stdout) => writeln!(io::stdout().lock(), "{}", line),
            Sink::Writer(writer) => {
                let mut writer = writer.lock().unwrap_or_else(PoisonError::into_inner);
                writeln!(writer, "{}", line)?;
                writer.flush()
            }
        }
    }
}

fn level_style(level: LogLevel, tag: &str) -> StyledObject<&str> {
    let styled = style(tag);
    match level {
        LogLevel::Trace => styled.dim(),
        LogLevel::Debug => styled.blue(),
        LogLevel::Info => styled.green(),
        LogLevel::Warn => styled.yellow(),
        LogLevel::Error => styled.red(),
        LogLevel::Fatal => styled.white().on_red().bold(),
    }
}

impl Transport for ConsoleTransport {
    fn state(&self) -> &TransportState {
        &self.state
    }

    fn formatter(&self, record: &LogRecord) -> Vec<String> {
        match &self.segments {
            Some(format) => format(record),
            None => self.styled_segments(record),
        }
    }

    fn send(&self, record: &LogRecord) -> TransportResult {
        let line = self.render(record);
        self.write_line(&line).map_err(|err| {
            if err.kind() == io::ErrorKind::BrokenPipe {
                TransportError::rejected(self.id(), "output stream closed")
            } else {
                TransportError::Io(err)
            }
        })
    }
}

impl fmt::Debug for ConsoleTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sink = match &self.sink {
            Sink::Stream(ConsoleTarget::Stderr) => "stderr",
            Sink::Stream(ConsoleTarget::Stdout) => "stdout",
            Sink::Writer(_) => "writer",
        };
        f.debug_struct("ConsoleTransport")
            .field("state", &self.state)
            .field("sink", &sink)
            .field("colors", &self.colors)
            .field("custom_formatter", &self.segments.is_some())
            .finish()
    }
}
