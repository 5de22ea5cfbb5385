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

//! Diagnostics initialization and setup.
//!
//! Builds a `tracing` subscriber from a [`DiagnosticsConfig`] and installs it
//! globally, or hands it back as a [`Dispatch`] for scoped use.

use crate::config::{DiagnosticsConfig, DiagnosticsFormat, DiagnosticsOutput};
use crate::error::{DiagnosticsError, DiagnosticsResult};
use std::io;
use tracing::Dispatch;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{fmt, EnvFilter, Registry};

/// Initialize diagnostics with the specified format and optional filter.
///
/// # Example
///
/// ```ignore
/// use quill_observability::{init_diagnostics_with, DiagnosticsFormat};
///
/// init_diagnostics_with(DiagnosticsFormat::Compact, Some("quill_core=debug")).unwrap();
/// ```
pub fn init_diagnostics_with(
    format: DiagnosticsFormat,
    filter: Option<&str>,
) -> DiagnosticsResult<()> {
    let mut config = DiagnosticsConfig::new().with_format(format);
    if let Some(filter) = filter {
        config = config.with_filter(filter);
    }
    init_diagnostics(&config)
}

/// Install the diagnostics subscriber globally.
///
/// # Errors
///
/// Returns [`DiagnosticsError::AlreadyInitialized`] when a global subscriber
/// exists, and [`DiagnosticsError::InvalidFilter`] for a bad filter.
pub fn init_diagnostics(config: &DiagnosticsConfig) -> DiagnosticsResult<()> {
    let dispatch = build_dispatch(config)?;
    tracing::dispatcher::set_global_default(dispatch)
        .map_err(|_| DiagnosticsError::AlreadyInitialized)
}

/// Build the diagnostics subscriber without installing it.
pub fn build_dispatch(config: &DiagnosticsConfig) -> DiagnosticsResult<Dispatch> {
    let env_filter = build_env_filter(config)?;
    let registry = Registry::default().with(env_filter);
    let writer = get_writer(config.output);

    let dispatch = match (config.format, config.timestamps) {
        (DiagnosticsFormat::Pretty, true) => Dispatch::new(
            registry.with(
                fmt::layer()
                    .with_writer(writer)
                    .with_target(config.targets)
                    .with_ansi(config.ansi)
                    .pretty(),
            ),
        ),
        (DiagnosticsFormat::Pretty, false) => Dispatch::new(
            registry.with(
                fmt::layer()
                    .with_writer(writer)
                    .with_target(config.targets)
                    .with_ansi(config.ansi)
                    .pretty()
                    .without_time(),
            ),
        ),
        (DiagnosticsFormat::Compact, true) => Dispatch::new(
            registry.with(
                fmt::layer()
                    .with_writer(writer)
                    .with_target(config.targets)
                    .with_ansi(config.ansi)
                    .compact(),
            ),
        ),
        (DiagnosticsFormat::Compact, false) => Dispatch::new(
            registry.with(
                fmt::layer()
                    .with_writer(writer)
                    .with_target(config.targets)
                    .with_ansi(config.ansi)
                    .compact()
                    .without_time(),
            ),
        ),
        (DiagnosticsFormat::Json, true) => Dispatch::new(
            registry.with(
                fmt::layer()
                    .with_writer(writer)
                    .json()
                    .with_target(config.targets),
            ),
        ),
        (DiagnosticsFormat::Json, false) => Dispatch::new(
            registry.with(
                fmt::layer()
                    .with_writer(writer)
                    .json()
                    .with_target(config.targets)
                    .without_time(),
            ),
        ),
    };

    Ok(dispatch)
}

/// Check that `filter` is a valid filter directive
pub fn validate_filter(filter: &str) -> DiagnosticsResult<()> {
    EnvFilter::try_new(filter)
        .map(|_| ())
        .map_err(|e| DiagnosticsError::invalid_filter(filter, e))
}

/// Get the writer for the specified output
fn get_writer(output: DiagnosticsOutput) -> fn() -> Box<dyn io::Write + Send> {
    match output {
        DiagnosticsOutput::Stderr => || Box::new(io::stderr()),
        DiagnosticsOutput::Stdout => || Box::new(io::stdout()),
    }
}

/// Build an environment filter for the given configuration
fn build_env_filter(config: &DiagnosticsConfig) -> DiagnosticsResult<EnvFilter> {
    let filter = config.effective_filter();
    EnvFilter::try_new(&filter).map_err(|e| DiagnosticsError::invalid_filter(filter, e))
}
