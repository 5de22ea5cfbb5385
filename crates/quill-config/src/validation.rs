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

//! Configuration validation

use crate::error::{ConfigError, ConfigResult};
use crate::schema::{
    DiagnosticsSettings, LoggerSettings, QuillConfig, TransportKind, TransportSettings,
};
use std::collections::HashSet;

/// Validator for configuration settings
pub trait Validator {
    /// Check the settings, returning the first problem found
    fn validate(&self) -> ConfigResult<()>;
}

impl Validator for QuillConfig {
    fn validate(&self) -> ConfigResult<()> {
        self.logger.validate()?;

        let mut seen = HashSet::new();
        for transport in &self.transports {
            transport.validate()?;
            let Some(id) = transport.explicit_id() else {
                continue;
            };
            if !seen.insert(id) {
                return Err(ConfigError::ConflictingValues(format!(
                    "transport id '{}' is used more than once",
                    id
                )));
            }
        }

        self.diagnostics.validate()
    }
}

impl Validator for LoggerSettings {
    fn validate(&self) -> ConfigResult<()> {
        self.threshold()?;

        if self.category.iter().any(|segment| segment.trim().is_empty()) {
            return Err(ConfigError::invalid_value(
                "logger.category",
                "category segments must not be empty",
            ));
        }

        Ok(())
    }
}

impl Validator for TransportSettings {
    fn validate(&self) -> ConfigResult<()> {
        if self.id.chars().any(char::is_whitespace) {
            return Err(ConfigError::invalid_value(
                "transports.id",
                format!("'{}' must not contain whitespace", self.id),
            ));
        }

        match (self.kind, self.capacity) {
            (TransportKind::Memory, Some(0)) => Err(ConfigError::invalid_value(
                "transports.capacity",
                "capacity must be greater than 0",
            )),
            (TransportKind::Memory, _) | (_, None) => Ok(()),
            (kind, Some(_)) => Err(ConfigError::ConflictingValues(format!(
                "capacity only applies to memory transports, not {}",
                kind.as_str()
            ))),
        }
    }
}

impl Validator for DiagnosticsSettings {
    fn validate(&self) -> ConfigResult<()> {
        if let Some(filter) = &self.filter {
            quill_observability::validate_filter(filter)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(QuillConfig::default().validate().is_ok());
    }

    #[test]
    fn test_unknown_level_rejected() {
        let mut config = QuillConfig::default();
        config.logger.lowest_level = "verbose".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { ref field, .. }) if field == "logger.lowest_level"
        ));
    }

    #[test]
    fn test_empty_category_segment_rejected() {
        let mut config = QuillConfig::default();
        config.logger.category = vec!["http".to_string(), " ".to_string()];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let mut first = TransportSettings::new(TransportKind::Memory);
        first.id = "capture".to_string();
        let mut second = TransportSettings::new(TransportKind::Console);
        second.id = "capture".to_string();

        let config = QuillConfig {
            transports: vec![first, second],
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ConflictingValues(msg)) if msg.contains("'capture'")
        ));
    }

    #[test]
    fn test_unnamed_transports_do_not_conflict() {
        let config = QuillConfig {
            transports: vec![
                TransportSettings::new(TransportKind::Console),
                TransportSettings::new(TransportKind::Console),
            ],
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_capacity_rules() {
        let mut memory = TransportSettings::new(TransportKind::Memory);
        memory.capacity = Some(0);
        assert!(memory.validate().is_err());
        memory.capacity = Some(10);
        assert!(memory.validate().is_ok());

        let mut console = TransportSettings::new(TransportKind::Console);
        console.capacity = Some(10);
        assert!(matches!(console.validate(), Err(ConfigError::ConflictingValues(_))));
    }

    #[test]
    fn test_whitespace_id_rejected() {
        let mut transport = TransportSettings::new(TransportKind::Console);
        transport.id = "my console".to_string();
        assert!(transport.validate().is_err());
    }

    #[test]
    fn test_bad_filter_rejected() {
        let mut config = QuillConfig::default();
        config.diagnostics.filter = Some("quill_core=loud".to_string());
        assert!(matches!(config.validate(), Err(ConfigError::Diagnostics(_))));
    }
}
