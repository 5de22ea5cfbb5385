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

//! Shared output formatting for CLI commands.
//!
//! ```ignore
//! output::success("template is valid");
//! output::detail("kind", "empty_argument");
//! ```

use console::style;

/// Print a success line to stdout.
pub fn success(msg: &str) {
    println!("{} {}", style("✓").green().bold(), msg);
}

/// Print an error line to stderr.
pub fn error(msg: &str) {
    eprintln!("{} {}", style("error:").red().bold(), msg);
}

/// Print an indented key-value line to stderr.
pub fn detail(key: &str, value: &str) {
    eprintln!("  {}: {}", key, style(value).cyan());
}

/// Print a source line with a caret marker under it to stderr.
pub fn snippet(line: &str, marker: &str) {
    eprintln!("  {} {}", style("|").dim(), line);
    eprintln!("  {} {}", style("|").dim(), style(marker).red().bold());
}
