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

//! Configuration schema

use crate::error::{ConfigError, ConfigResult};
use quill_core::{
    ConsoleTarget, ConsoleTransport, IdGenerator, LogLevel, Logger, LoggerConfig,
    MemoryTransport, SharedTransport, Transport, UuidGenerator, DEFAULT_PREFIX,
};
use quill_observability::{
    DiagnosticsConfig, DiagnosticsFormat, DiagnosticsOutput, TracingTransport,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Top-level configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct QuillConfig {
    /// Logger settings
    pub logger: LoggerSettings,

    /// Transports, in dispatch order
    pub transports: Vec<TransportSettings>,

    /// Settings for Quill's own diagnostics
    pub diagnostics: DiagnosticsSettings,
}

impl QuillConfig {
    /// Lowest level the logger accepts, `None` when set to `off`
    pub fn lowest_level(&self) -> ConfigResult<Option<LogLevel>> {
        self.logger.threshold()
    }

    /// Instantiate every configured transport, giving unnamed ones UUID ids
    pub fn build_transports(&self) -> BuiltTransports {
        self.build_transports_with(&UuidGenerator)
    }

    /// Instantiate every configured transport, drawing missing ids from `ids`
    pub fn build_transports_with(&self, ids: &dyn IdGenerator) -> BuiltTransports {
        let mut built = BuiltTransports::default();
        for settings in &self.transports {
            let id = settings.resolve_id(ids);
            let transport: SharedTransport = match settings.kind {
                TransportKind::Console => {
                    let console = ConsoleTransport::with_target(id, settings.target);
                    match settings.color {
                        Some(color) => Arc::new(console.with_colors(color)),
                        None => Arc::new(console),
                    }
                }
                TransportKind::Memory => {
                    let memory = Arc::new(match settings.capacity {
                        Some(capacity) => MemoryTransport::with_capacity(id, capacity),
                        None => MemoryTransport::new(id),
                    });
                    built.memory.push(Arc::clone(&memory));
                    memory
                }
                TransportKind::Tracing => Arc::new(TracingTransport::new(id)),
            };
            transport.set_enabled(settings.enabled);
            built.transports.push(transport);
        }
        built
    }

    /// Logger configuration using the given transports
    pub fn logger_config(&self, transports: Vec<SharedTransport>) -> ConfigResult<LoggerConfig> {
        Ok(LoggerConfig::default()
            .with_prefix(self.logger.prefix.clone())
            .with_enabled(self.logger.enabled)
            .with_category(self.logger.category.clone())
            .with_lowest_level(self.lowest_level()?)
            .with_transports(transports))
    }

    /// Build a logger with freshly created transports
    pub fn build_logger(&self) -> ConfigResult<Logger> {
        let built = self.build_transports();
        Ok(Logger::new(self.logger_config(built.transports)?))
    }

    /// Diagnostics configuration for `quill_observability::init_diagnostics`
    pub fn diagnostics_config(&self) -> DiagnosticsConfig {
        let settings = &self.diagnostics;
        let config = DiagnosticsConfig::new()
            .with_format(settings.format)
            .with_ansi(settings.ansi)
            .with_timestamps(settings.timestamps)
            .with_targets(settings.targets)
            .with_output(settings.output);
        match &settings.filter {
            Some(filter) => config.with_filter(filter.clone()),
            None => config,
        }
    }
}

/// Transports created from configuration
#[derive(Default)]
pub struct BuiltTransports {
    /// Every transport, in configuration order
    pub transports: Vec<SharedTransport>,

    /// Typed handles to the memory transports
    pub memory: Vec<Arc<MemoryTransport>>,
}

impl BuiltTransports {
    /// Memory transport with the given id
    pub fn memory(&self, id: &str) -> Option<&Arc<MemoryTransport>> {
        self.memory.iter().find(|memory| memory.id() == id)
    }
}

/// Logger settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggerSettings {
    /// Prefix shown before every line
    pub prefix: String,

    /// Whether the logger starts enabled
    pub enabled: bool,

    /// Category path
    pub category: Vec<String>,

    /// Level name, or "off"
    pub lowest_level: String,
}

impl Default for LoggerSettings {
    fn default() -> Self {
        LoggerSettings {
            prefix: DEFAULT_PREFIX.to_string(),
            enabled: true,
            category: Vec::new(),
            lowest_level: LogLevel::Debug.as_str().to_string(),
        }
    }
}

impl LoggerSettings {
    /// Parsed `lowest_level`
    pub fn threshold(&self) -> ConfigResult<Option<LogLevel>> {
        if self.lowest_level.trim().is_empty() {
            return Err(ConfigError::MissingRequired("logger.lowest_level".to_string()));
        }
        LogLevel::parse_threshold(&self.lowest_level)
            .map_err(|e| ConfigError::invalid_value("logger.lowest_level", e.to_string()))
    }
}

/// Kind of transport
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportKind {
    /// Human readable lines on a standard stream
    #[default]
    Console,

    /// In-memory capture
    Memory,

    /// Re-emit as `tracing` events
    Tracing,
}

impl TransportKind {
    /// Lowercase name
    pub fn as_str(self) -> &'static str {
        match self {
            TransportKind::Console => "console",
            TransportKind::Memory => "memory",
            TransportKind::Tracing => "tracing",
        }
    }
}

/// One configured transport
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TransportSettings {
    /// Transport kind
    pub kind: TransportKind,

    /// Identifier; generated when empty
    pub id: String,

    /// Whether the transport starts enabled
    pub enabled: bool,

    /// Console stream
    pub target: ConsoleTarget,

    /// Force console colors on or off
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<bool>,

    /// Maximum records kept by a memory transport
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<usize>,
}

impl Default for TransportSettings {
    fn default() -> Self {
        TransportSettings {
            kind: TransportKind::Console,
            id: String::new(),
            enabled: true,
            target: ConsoleTarget::Stderr,
            color: None,
            capacity: None,
        }
    }
}

impl TransportSettings {
    /// Settings for a transport of `kind`
    pub fn new(kind: TransportKind) -> Self {
        TransportSettings {
            kind,
            ..Default::default()
        }
    }

    /// Id set in the configuration, if any
    pub fn explicit_id(&self) -> Option<&str> {
        let id = self.id.trim();
        (!id.is_empty()).then_some(id)
    }

    /// Id used when building the transport
    pub fn resolve_id(&self, ids: &dyn IdGenerator) -> String {
        ids.generate(self.explicit_id())
    }
}

/// Diagnostics settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DiagnosticsSettings {
    /// Output format
    pub format: DiagnosticsFormat,

    /// Filter directive; falls back to the environment when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,

    /// ANSI colors
    pub ansi: bool,

    /// Timestamps
    pub timestamps: bool,

    /// Target module names
    pub targets: bool,

    /// Output stream
    pub output: DiagnosticsOutput,
}

impl Default for DiagnosticsSettings {
    fn default() -> Self {
        DiagnosticsSettings {
            format: DiagnosticsFormat::Compact,
            filter: None,
            ansi: true,
            timestamps: true,
            targets: true,
            output: DiagnosticsOutput::Stderr,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use quill_core::SequentialIdGenerator;

    #[test]
    fn test_defaults() {
        let config = QuillConfig::default();
        assert_eq!(config.logger.prefix, "[Logger]");
        assert!(config.logger.enabled);
        assert_eq!(config.lowest_level().unwrap(), Some(LogLevel::Debug));
        assert!(config.transports.is_empty());
        assert_eq!(config.diagnostics.format, DiagnosticsFormat::Compact);
    }

    #[test]
    fn test_off_threshold() {
        let mut config = QuillConfig::default();
        config.logger.lowest_level = "off".to_string();
        assert_eq!(config.lowest_level().unwrap(), None);
    }

    #[test]
    fn test_unknown_threshold() {
        let mut config = QuillConfig::default();
        config.logger.lowest_level = "loud".to_string();
        let err = config.lowest_level().unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("logger.lowest_level"));
    }

    #[test]
    fn test_blank_threshold_is_missing() {
        let mut config = QuillConfig::default();
        config.logger.lowest_level = "  ".to_string();
        let err = config.lowest_level().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MissingRequired(ref field) if field == "logger.lowest_level"
        ));
        assert!(err.is_validation());
    }

    #[test]
    fn test_explicit_id_is_kept() {
        let ids = SequentialIdGenerator::new("transport");
        let mut settings = TransportSettings::new(TransportKind::Memory);
        settings.id = "audit".to_string();
        assert_eq!(settings.explicit_id(), Some("audit"));
        assert_eq!(settings.resolve_id(&ids), "audit");
        assert_eq!(ids.generate(None), "transport-1");
    }

    #[test]
    fn test_unnamed_ids_are_generated() {
        let ids = SequentialIdGenerator::new("transport");
        let mut settings = TransportSettings::new(TransportKind::Console);
        assert_eq!(settings.explicit_id(), None);
        assert_eq!(settings.resolve_id(&ids), "transport-1");
        assert_eq!(settings.resolve_id(&ids), "transport-2");

        settings.id = "  ".to_string();
        assert_eq!(settings.explicit_id(), None);
    }

    #[test]
    fn test_build_transports() {
        let mut memory = TransportSettings::new(TransportKind::Memory);
        memory.id = "capture".to_string();
        memory.capacity = Some(2);
        let mut console = TransportSettings::new(TransportKind::Console);
        console.enabled = false;
        console.color = Some(false);

        let config = QuillConfig {
            transports: vec![memory, console, TransportSettings::new(TransportKind::Tracing)],
            ..Default::default()
        };

        let built = config.build_transports_with(&SequentialIdGenerator::new("t"));
        let ids: Vec<&str> = built.transports.iter().map(|t| t.id()).collect();
        assert_eq!(ids, vec!["capture", "t-1", "t-2"]);
        assert!(built.transports[0].is_enabled());
        assert!(!built.transports[1].is_enabled());
        assert!(built.memory("capture").is_some());
        assert!(built.memory("t-1").is_none());
    }

    #[test]
    fn test_unnamed_consoles_get_distinct_uuids() {
        let config = QuillConfig {
            transports: vec![
                TransportSettings::new(TransportKind::Console),
                TransportSettings::new(TransportKind::Console),
            ],
            ..Default::default()
        };

        let built = config.build_transports();
        let first = built.transports[0].id();
        let second = built.transports[1].id();
        assert_ne!(first, second);
        assert_eq!(first.len(), 36);
    }

    #[test]
    fn test_build_logger_uses_settings() {
        let mut config = QuillConfig::default();
        config.logger.prefix = "[svc]".to_string();
        config.logger.category = vec!["http".to_string()];
        config.logger.lowest_level = "warn".to_string();

        let logger = config.build_logger().unwrap();
        assert_eq!(logger.prefix(), "[svc]");
        assert_eq!(logger.category(), &["http".to_string()]);
        assert_eq!(logger.lowest_level(), Some(LogLevel::Warn));
    }

    #[test]
    fn test_diagnostics_config() {
        let mut config = QuillConfig::default();
        config.diagnostics.format = DiagnosticsFormat::Json;
        config.diagnostics.filter = Some("quill_core=debug".to_string());
        config.diagnostics.ansi = false;

        let diagnostics = config.diagnostics_config();
        assert_eq!(diagnostics.format, DiagnosticsFormat::Json);
        assert_eq!(diagnostics.filter.as_deref(), Some("quill_core=debug"));
        assert!(!diagnostics.ansi);
    }
}
