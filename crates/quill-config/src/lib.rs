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

//! Configuration for Quill loggers
//!
//! Loads a [`QuillConfig`] from TOML, YAML or JSON, validates it and turns
//! it into a ready [`quill_core::Logger`].
//!
//! # Features
//!
//! - Format detected from the file extension
//! - Environment overrides with the `QUILL_` prefix
//! - Validation of level names, transport ids and diagnostics filters
//!
//! # Example
//!
//! ```no_run
//! use quill_config::ConfigLoader;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ConfigLoader::new().load_with_overrides("quill.toml")?;
//!     let logger = config.build_logger()?;
//!     logger.info("configured").ok();
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod loader;
pub mod schema;
pub mod validation;

pub use error::{ConfigError, ConfigResult};
pub use loader::{
    apply_env_overrides, apply_overrides_from, ConfigFormat, ConfigLoader, ENV_CATEGORY,
    ENV_DIAGNOSTICS_FILTER, ENV_DIAGNOSTICS_FORMAT, ENV_ENABLED, ENV_LOG_LEVEL, ENV_PREFIX,
};
pub use schema::*;
pub use validation::Validator;
