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

//! Diagnostics setup errors

use thiserror::Error;

/// Result type alias for diagnostics setup
pub type DiagnosticsResult<T> = Result<T, DiagnosticsError>;

/// Errors that can occur while configuring diagnostics
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticsError {
    /// The filter directive could not be parsed
    #[error("invalid diagnostics filter '{filter}': {reason}")]
    InvalidFilter {
        /// The rejected directive
        filter: String,
        /// Parser message
        reason: String,
    },

    /// Unknown output format name
    #[error("unknown diagnostics format '{0}' (expected pretty, compact or json)")]
    UnknownFormat(String),

    /// Unknown output stream name
    #[error("unknown diagnostics output '{0}' (expected stderr or stdout)")]
    UnknownOutput(String),

    /// A global subscriber was installed earlier
    #[error("a global diagnostics subscriber is already installed")]
    AlreadyInitialized,
}

impl DiagnosticsError {
    /// Create an InvalidFilter error
    pub fn invalid_filter<F: Into<String>, R: ToString>(filter: F, reason: R) -> Self {
        DiagnosticsError::InvalidFilter {
            filter: filter.into(),
            reason: reason.to_string(),
        }
    }

    /// Check if this is an AlreadyInitialized error
    pub fn is_already_initialized(&self) -> bool {
        matches!(self, DiagnosticsError::AlreadyInitialized)
    }
}
