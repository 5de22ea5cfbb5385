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

//! Configuration error types

use quill_observability::DiagnosticsError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur while loading or applying configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Reading the file failed
    #[error("IO error reading configuration file: {0}")]
    IoError(#[from] std::io::Error),

    /// TOML syntax or shape error
    #[error("Failed to parse TOML configuration: {0}")]
    TomlParseError(#[from] toml::de::Error),

    /// YAML syntax or shape error
    #[error("Failed to parse YAML configuration: {0}")]
    YamlParseError(#[from] serde_yaml::Error),

    /// JSON syntax or shape error
    #[error("Failed to parse JSON configuration: {0}")]
    JsonParseError(#[from] serde_json::Error),

    /// File extension is not toml, yaml, yml or json
    #[error("Unsupported configuration format: {0}. Supported formats: toml, yaml, json")]
    UnsupportedFormat(String),

    /// The file does not exist
    #[error("Configuration file not found at path: {}", .0.display())]
    FileNotFound(PathBuf),

    /// The path has no extension to detect a format from
    #[error("Invalid configuration path: {}", .0.display())]
    InvalidPath(PathBuf),

    /// An override variable held an unusable value
    #[error("Environment variable parsing error: {variable_name}={value}. {reason}")]
    EnvVarParsingError {
        /// Variable name
        variable_name: String,
        /// Rejected value
        value: String,
        /// What was expected
        reason: String,
    },

    /// A field holds an invalid value
    #[error("Invalid configuration value for field '{field}': {reason}")]
    InvalidValue {
        /// Dotted field path
        field: String,
        /// What is wrong with it
        reason: String,
    },

    /// A required field is empty
    #[error("Missing required configuration field: {0}")]
    MissingRequired(String),

    /// Two settings contradict each other
    #[error("Conflicting configuration values: {0}")]
    ConflictingValues(String),

    /// Diagnostics settings were rejected
    #[error("Invalid diagnostics settings: {0}")]
    Diagnostics(#[from] DiagnosticsError),
}

impl ConfigError {
    /// Create an EnvVarParsingError
    pub fn env_var_parsing_error(
        variable_name: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        ConfigError::EnvVarParsingError {
            variable_name: variable_name.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an InvalidValue error
    pub fn invalid_value(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ConfigError::InvalidValue {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Check if this is a validation failure rather than an I/O or parse error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ConfigError::InvalidValue { .. }
                | ConfigError::MissingRequired(_)
                | ConfigError::ConflictingValues(_)
                | ConfigError::Diagnostics(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_value_message() {
        let err = ConfigError::invalid_value("logger.lowest_level", "unknown level 'loud'");
        assert!(err.is_validation());
        assert_eq!(
            err.to_string(),
            "Invalid configuration value for field 'logger.lowest_level': unknown level 'loud'"
        );
    }

    #[test]
    fn test_env_var_message() {
        let err =
            ConfigError::env_var_parsing_error("QUILL_ENABLED", "maybe", "expected a boolean");
        assert!(!err.is_validation());
        assert!(err.to_string().contains("QUILL_ENABLED=maybe"));
    }
}
