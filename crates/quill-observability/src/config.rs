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

//! Configuration for Quill's own diagnostics.
//!
//! The engine reports transport failures, template parse failures and
//! lifecycle events through `tracing`. This module describes how those
//! events are rendered and filtered.

use crate::error::DiagnosticsError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Environment variable holding the diagnostics filter
pub const DIAGNOSTICS_ENV: &str = "QUILL_DIAGNOSTICS";

/// Filter used when nothing else is configured
pub const DEFAULT_FILTER: &str = "warn";

/// Output format for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticsFormat {
    /// Multi-line human-readable output
    Pretty,

    /// Single-line format
    #[default]
    Compact,

    /// JSON lines for machines
    Json,
}

impl FromStr for DiagnosticsFormat {
    type Err = DiagnosticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pretty" => Ok(DiagnosticsFormat::Pretty),
            "compact" => Ok(DiagnosticsFormat::Compact),
            "json" => Ok(DiagnosticsFormat::Json),
            _ => Err(DiagnosticsError::UnknownFormat(s.to_string())),
        }
    }
}

impl fmt::Display for DiagnosticsFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DiagnosticsFormat::Pretty => "pretty",
            DiagnosticsFormat::Compact => "compact",
            DiagnosticsFormat::Json => "json",
        })
    }
}

/// Diagnostics output destination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticsOutput {
    /// Write to standard error
    #[default]
    Stderr,

    /// Write to standard output
    Stdout,
}

impl FromStr for DiagnosticsOutput {
    type Err = DiagnosticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "stderr" => Ok(DiagnosticsOutput::Stderr),
            "stdout" => Ok(DiagnosticsOutput::Stdout),
            _ => Err(DiagnosticsError::UnknownOutput(s.to_string())),
        }
    }
}

/// Configuration for diagnostics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticsConfig {
    /// Output format
    pub format: DiagnosticsFormat,

    /// Filter directive (e.g. "warn", "quill_core=debug").
    /// If None, determined from the environment
    pub filter: Option<String>,

    /// Whether to use ANSI colors (ignored for JSON)
    pub ansi: bool,

    /// Whether to include timestamps
    pub timestamps: bool,

    /// Whether to include target module names
    pub targets: bool,

    /// Output destination
    pub output: DiagnosticsOutput,
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        DiagnosticsConfig {
            format: DiagnosticsFormat::Compact,
            filter: None,
            ansi: true,
            timestamps: true,
            targets: true,
            output: DiagnosticsOutput::Stderr,
        }
    }
}

impl DiagnosticsConfig {
    /// Create a new default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the output format
    pub fn with_format(mut self, format: DiagnosticsFormat) -> Self {
        self.format = format;
        self
    }

    /// Set the filter directive
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    /// Enable or disable ANSI colors
    pub fn with_ansi(mut self, ansi: bool) -> Self {
        self.ansi = ansi;
        self
    }

    /// Enable or disable timestamps
    pub fn with_timestamps(mut self, timestamps: bool) -> Self {
        self.timestamps = timestamps;
        self
    }

    /// Enable or disable target module names
    pub fn with_targets(mut self, targets: bool) -> Self {
        self.targets = targets;
        self
    }

    /// Set the output destination
    pub fn with_output(mut self, output: DiagnosticsOutput) -> Self {
        self.output = output;
        self
    }

    /// Effective filter: explicit, then `QUILL_DIAGNOSTICS`, then
    /// `RUST_LOG`, then `warn`
    pub fn effective_filter(&self) -> String {
        self.filter
            .clone()
            .or_else(|| non_empty_env(DIAGNOSTICS_ENV))
            .or_else(|| non_empty_env("RUST_LOG"))
            .unwrap_or_else(|| DEFAULT_FILTER.to_string())
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_format_parsing() {
        assert_eq!("pretty".parse::<DiagnosticsFormat>().unwrap(), DiagnosticsFormat::Pretty);
        assert_eq!("JSON".parse::<DiagnosticsFormat>().unwrap(), DiagnosticsFormat::Json);
        assert!("xml".parse::<DiagnosticsFormat>().is_err());
    }

    #[test]
    fn test_output_parsing() {
        assert_eq!("stdout".parse::<DiagnosticsOutput>().unwrap(), DiagnosticsOutput::Stdout);
        assert!("file".parse::<DiagnosticsOutput>().is_err());
    }

    #[test]
    fn test_config_builder() {
        let config = DiagnosticsConfig::new()
            .with_format(DiagnosticsFormat::Json)
            .with_filter("debug")
            .with_ansi(false)
            .with_timestamps(false);

        assert_eq!(config.format, DiagnosticsFormat::Json);
        assert_eq!(config.filter.as_deref(), Some("debug"));
        assert!(!config.ansi);
        assert!(!config.timestamps);
    }

    #[test]
    fn test_explicit_filter_wins() {
        let config = DiagnosticsConfig::new().with_filter("quill_core=trace");
        assert_eq!(config.effective_filter(), "quill_core=trace");
    }

    #[test]
    fn test_format_serde() {
        let format: DiagnosticsFormat = serde_json::from_str("\"pretty\"").unwrap();
        assert_eq!(format, DiagnosticsFormat::Pretty);
        assert_eq!(DiagnosticsFormat::Json.to_string(), "json");
    }
}
