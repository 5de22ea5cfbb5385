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

//! Core error types

use std::io;
use thiserror::Error;

/// Result type alias for transport operations
pub type TransportResult<T = ()> = Result<T, TransportError>;

/// Errors a transport can report while delivering a record
#[derive(Error, Debug)]
pub enum TransportError {
    /// The transport refused the record
    #[error("transport '{id}' rejected record: {reason}")]
    Rejected {
        /// Id of the failing transport
        id: String,
        /// Human readable reason
        reason: String,
    },

    /// Writing to the underlying sink failed
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Transparent error delegation for wrapped error types
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TransportError {
    /// Create a Rejected error for transport `id`
    pub fn rejected<I: Into<String>, R: Into<String>>(id: I, reason: R) -> Self {
        TransportError::Rejected {
            id: id.into(),
            reason: reason.into(),
        }
    }

    /// Create a generic error from any error type that can convert to anyhow::Error
    pub fn other<E: Into<anyhow::Error>>(error: E) -> Self {
        TransportError::Other(error.into())
    }

    /// Check if this is a Rejected error
    pub fn is_rejected(&self) -> bool {
        matches!(self, TransportError::Rejected { .. })
    }

    /// Check if this is an I/O error
    pub fn is_io(&self) -> bool {
        matches!(self, TransportError::Io(_))
    }
}

/// A level name that is not part of the level set
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown log level '{name}' (expected trace, debug, info, warn, error, fatal or off)")]
pub struct LevelError {
    /// The rejected input
    pub name: String,
}

impl LevelError {
    /// Create a level error for `name`
    pub fn new<S: Into<String>>(name: S) -> Self {
        LevelError { name: name.into() }
    }
}
