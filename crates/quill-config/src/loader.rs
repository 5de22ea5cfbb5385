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

//! Configuration file loading and environment overrides

use crate::error::{ConfigError, ConfigResult};
use crate::schema::QuillConfig;
use crate::validation::Validator;
use quill_observability::DiagnosticsFormat;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Overrides `logger.lowest_level`
pub const ENV_LOG_LEVEL: &str = "QUILL_LOG_LEVEL";
/// Overrides `logger.prefix`
pub const ENV_PREFIX: &str = "QUILL_PREFIX";
/// Overrides `logger.enabled`
pub const ENV_ENABLED: &str = "QUILL_ENABLED";
/// Overrides `logger.category`, dot separated
pub const ENV_CATEGORY: &str = "QUILL_CATEGORY";
/// Overrides `diagnostics.format`
pub const ENV_DIAGNOSTICS_FORMAT: &str = "QUILL_DIAGNOSTICS_FORMAT";
/// Overrides `diagnostics.filter`
pub const ENV_DIAGNOSTICS_FILTER: &str = "QUILL_DIAGNOSTICS_FILTER";

/// Configuration format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// TOML
    Toml,
    /// YAML
    Yaml,
    /// JSON
    Json,
}

impl ConfigFormat {
    /// Detect format from file extension
    pub fn from_path<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Ok(ConfigFormat::Toml),
            Some("yaml") | Some("yml") => Ok(ConfigFormat::Yaml),
            Some("json") => Ok(ConfigFormat::Json),
            Some(ext) => Err(ConfigError::UnsupportedFormat(ext.to_string())),
            None => Err(ConfigError::InvalidPath(path.to_path_buf())),
        }
    }

    /// Get format name as string
    pub fn name(&self) -> &'static str {
        match self {
            ConfigFormat::Toml => "TOML",
            ConfigFormat::Yaml => "YAML",
            ConfigFormat::Json => "JSON",
        }
    }
}

/// Configuration loader
#[derive(Debug, Clone, Copy)]
pub struct ConfigLoader {
    validate: bool,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Create a new configuration loader
    pub fn new() -> Self {
        ConfigLoader { validate: true }
    }

    /// Create a loader without validation
    pub fn without_validation() -> Self {
        ConfigLoader { validate: false }
    }

    /// Load configuration from a file
    pub fn load_file<P: AsRef<Path>>(&self, path: P) -> ConfigResult<QuillConfig> {
        let config = self.read_file(path.as_ref())?;
        self.finish(config)
    }

    /// Load configuration from a string
    pub fn load_from_string(
        &self,
        content: &str,
        format: ConfigFormat,
    ) -> ConfigResult<QuillConfig> {
        let config = parse(content, format)?;
        self.finish(config)
    }

    /// Load a file, then apply `QUILL_*` environment overrides
    pub fn load_with_overrides<P: AsRef<Path>>(&self, path: P) -> ConfigResult<QuillConfig> {
        let mut config = self.read_file(path.as_ref())?;
        apply_env_overrides(&mut config)?;
        self.finish(config)
    }

    fn read_file(&self, path: &Path) -> ConfigResult<QuillConfig> {
        debug!(path = %path.display(), "loading configuration");

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }

        let format = ConfigFormat::from_path(path)?;
        let content = fs::read_to_string(path)?;
        parse(&content, format)
    }

    fn finish(&self, config: QuillConfig) -> ConfigResult<QuillConfig> {
        if self.validate {
            config.validate()?;
            debug!("configuration validated");
        }
        Ok(config)
    }
}

fn parse(content: &str, format: ConfigFormat) -> ConfigResult<QuillConfig> {
    let config = match format {
        ConfigFormat::Toml => toml::from_str(content)?,
        ConfigFormat::Yaml => serde_yaml::from_str(content)?,
        ConfigFormat::Json => serde_json::from_str(content)?,
    };
    debug!(format = format.name(), "configuration parsed");
    Ok(config)
}

/// Apply `QUILL_*` overrides from the process environment
pub fn apply_env_overrides(config: &mut QuillConfig) -> ConfigResult<()> {
    apply_overrides_from(config, |key| std::env::var(key).ok())
}

/// Apply `QUILL_*` overrides read through `lookup`
///
/// Empty values are ignored.
pub fn apply_overrides_from<F>(config: &mut QuillConfig, lookup: F) -> ConfigResult<()>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

    if let Some(value) = get(ENV_LOG_LEVEL) {
        quill_core::LogLevel::parse_threshold(&value).map_err(|e| {
            ConfigError::env_var_parsing_error(ENV_LOG_LEVEL, &value, e.to_string())
        })?;
        config.logger.lowest_level = value.trim().to_string();
    }
    if let Some(value) = get(ENV_PREFIX) {
        config.logger.prefix = value;
    }
    if let Some(value) = get(ENV_ENABLED) {
        config.logger.enabled = parse_bool(ENV_ENABLED, &value)?;
    }
    if let Some(value) = get(ENV_CATEGORY) {
        config.logger.category = value
            .split('.')
            .map(str::trim)
            .filter(|segment| !segment.is_empty())
            .map(String::from)
            .collect();
    }
    if let Some(value) = get(ENV_DIAGNOSTICS_FORMAT) {
        config.diagnostics.format = value.parse::<DiagnosticsFormat>().map_err(|_| {
            ConfigError::env_var_parsing_error(
                ENV_DIAGNOSTICS_FORMAT,
                &value,
                "expected pretty, compact or json",
            )
        })?;
    }
    if let Some(value) = get(ENV_DIAGNOSTICS_FILTER) {
        config.diagnostics.filter = Some(value);
    }

    Ok(())
}

/// Parse boolean from string
fn parse_bool(variable: &str, value: &str) -> ConfigResult<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::env_var_parsing_error(
            variable,
            value,
            "expected boolean (true/false, yes/no, 1/0, on/off)",
        )),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_format_detection() {
        assert_eq!(ConfigFormat::from_path("quill.toml").unwrap(), ConfigFormat::Toml);
        assert_eq!(ConfigFormat::from_path("quill.yml").unwrap(), ConfigFormat::Yaml);
        assert_eq!(ConfigFormat::from_path("quill.yaml").unwrap(), ConfigFormat::Yaml);
        assert_eq!(ConfigFormat::from_path("quill.json").unwrap(), ConfigFormat::Json);
        assert!(matches!(
            ConfigFormat::from_path("quill.ini"),
            Err(ConfigError::UnsupportedFormat(ext)) if ext == "ini"
        ));
        assert!(matches!(
            ConfigFormat::from_path("quill"),
            Err(ConfigError::InvalidPath(_))
        ));
    }

    #[test]
    fn test_parse_bool() {
        assert!(parse_bool("X", "yes").unwrap());
        assert!(parse_bool("X", "ON").unwrap());
        assert!(!parse_bool("X", "0").unwrap());
        assert!(parse_bool("X", "maybe").is_err());
    }

    #[test]
    fn test_overrides_apply() {
        let mut config = QuillConfig::default();
        apply_overrides_from(
            &mut config,
            lookup(&[
                (ENV_LOG_LEVEL, "warn"),
                (ENV_PREFIX, "[env]"),
                (ENV_ENABLED, "false"),
                (ENV_CATEGORY, "http.router"),
                (ENV_DIAGNOSTICS_FORMAT, "json"),
                (ENV_DIAGNOSTICS_FILTER, "quill_core=debug"),
            ]),
        )
        .unwrap();

        assert_eq!(config.logger.lowest_level, "warn");
        assert_eq!(config.logger.prefix, "[env]");
        assert!(!config.logger.enabled);
        assert_eq!(config.logger.category, vec!["http", "router"]);
        assert_eq!(config.diagnostics.format, DiagnosticsFormat::Json);
        assert_eq!(config.diagnostics.filter.as_deref(), Some("quill_core=debug"));
    }

    #[test]
    fn test_empty_overrides_ignored() {
        let mut config = QuillConfig::default();
        apply_overrides_from(&mut config, lookup(&[(ENV_PREFIX, "  ")])).unwrap();
        assert_eq!(config.logger.prefix, "[Logger]");
    }

    #[test]
    fn test_bad_level_override() {
        let mut config = QuillConfig::default();
        let err = apply_overrides_from(&mut config, lookup(&[(ENV_LOG_LEVEL, "loud")]))
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::EnvVarParsingError { ref variable_name, .. }
                if variable_name == ENV_LOG_LEVEL
        ));
        assert_eq!(config.logger.lowest_level, "debug");
    }

    #[test]
    fn test_bad_format_override() {
        let mut config = QuillConfig::default();
        let result =
            apply_overrides_from(&mut config, lookup(&[(ENV_DIAGNOSTICS_FORMAT, "xml")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_from_string_validates() {
        let loader = ConfigLoader::new();
        let result = loader.load_from_string(
            "[logger]\nlowest_level = \"loud\"\n",
            ConfigFormat::Toml,
        );
        assert!(result.unwrap_err().is_validation());

        let lenient = ConfigLoader::without_validation();
        let config = lenient
            .load_from_string("[logger]\nlowest_level = \"loud\"\n", ConfigFormat::Toml)
            .unwrap();
        assert_eq!(config.logger.lowest_level, "loud");
    }
}
