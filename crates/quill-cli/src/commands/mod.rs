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

// Command modules for the quill CLI
pub mod check;
pub mod emit;
pub mod render;

pub use check::CheckCmd;
pub use emit::EmitCmd;
pub use render::RenderCmd;

use quill_message::Properties;
use serde_json::Value;

/// Parse a `key=value` property argument
///
/// The value is read as JSON when it parses, otherwise kept as a string, so
/// `port=8080` is a number and `name=ann` a string.
pub fn parse_property(arg: &str) -> Result<(String, Value), String> {
    let (key, raw) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{}'", arg))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("property key is empty in '{}'", arg));
    }
    let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
    Ok((key.to_string(), value))
}

/// Collect parsed properties, later keys overriding earlier ones
pub fn collect_properties(pairs: &[(String, Value)]) -> Properties {
    pairs.iter().cloned().collect()
}
