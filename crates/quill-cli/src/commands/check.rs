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

use crate::output;
use crate::GlobalOptions;
use anyhow::{bail, Result};
use clap::Parser;
use quill_message::{parse, ParseError, Properties};

/// Validate a message template
#[derive(Parser, Debug)]
pub struct CheckCmd {
    /// Template to check
    #[arg(value_name = "TEMPLATE")]
    pub template: String,
}

impl CheckCmd {
    pub fn execute(&self, globals: &GlobalOptions) -> Result<()> {
        match parse(&self.template, &Properties::new()) {
            Ok(elements) => {
                if !globals.quiet {
                    output::success(&format!(
                        "template is valid ({} element{})",
                        elements.len(),
                        if elements.len() == 1 { "" } else { "s" }
                    ));
                }
                Ok(())
            }
            Err(err) => {
                report_parse_error(&self.template, &err);
                bail!("template is invalid");
            }
        }
    }
}

/// Print the error kind, position and a caret under the span
pub fn report_parse_error(template: &str, err: &ParseError) {
    output::error(&err.kind.to_string());
    output::detail("kind", err.kind.as_str());
    output::detail("at", &err.location.start.to_string());
    if let Some((line, marker)) = caret_line(template, err) {
        output::snippet(line, &marker);
    }
}

/// Source line holding the error start and a marker under the span
///
/// Spans running past the end of the line are marked up to the line end.
pub fn caret_line<'a>(template: &'a str, err: &ParseError) -> Option<(&'a str, String)> {
    let start = err.location.start;
    let end = err.location.end;
    let line = template.split('\n').nth(start.line.checked_sub(1)?)?;
    let line_len = line.chars().count();

    let from = start.column.saturating_sub(1).min(line_len);
    let to = if end.line == start.line {
        end.column.saturating_sub(1).min(line_len)
    } else {
        line_len
    };
    let width = to.saturating_sub(from).max(1);

    Some((line, format!("{}{}", " ".repeat(from), "^".repeat(width))))
}
