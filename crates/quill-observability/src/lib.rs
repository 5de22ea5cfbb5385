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

//! Quill Observability Module
//!
//! Configures the `tracing` pipeline that carries Quill's own diagnostics
//! and bridges log records into it.
//!
//! # Features
//!
//! - **Multiple Output Formats**: pretty, compact and JSON
//! - **Environment-based Filtering**: `QUILL_DIAGNOSTICS`, then `RUST_LOG`
//! - **Tracing Bridge**: [`TracingTransport`] re-emits records as events
//! - **Macros**: `log_info!(logger, "template", key = value)` and friends
//!
//! # Example
//!
//! ```ignore
//! use quill_observability::{init_diagnostics, DiagnosticsConfig, DiagnosticsFormat};
//!
//! init_diagnostics(&DiagnosticsConfig::new().with_format(DiagnosticsFormat::Json))?;
//! tracing::warn!("diagnostics ready");
//! ```

pub mod bridge;
pub mod config;
pub mod error;
pub mod initialization;
pub mod macros;

pub use bridge::{tracing_level, TracingTransport};
pub use config::{
    DiagnosticsConfig, DiagnosticsFormat, DiagnosticsOutput, DEFAULT_FILTER, DIAGNOSTICS_ENV,
};
pub use error::{DiagnosticsError, DiagnosticsResult};
pub use initialization::{build_dispatch, init_diagnostics, init_diagnostics_with, validate_filter};

/// Re-exported so the logging macros resolve without a direct dependency
pub use quill_core::properties;

/// Tracing re-exports for convenience
pub use tracing::Level;
