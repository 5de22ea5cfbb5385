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

use super::{collect_properties, parse_property};
use crate::GlobalOptions;
use anyhow::{Context, Result};
use clap::Parser;
use quill_config::{
    apply_env_overrides, ConfigLoader, QuillConfig, TransportKind, TransportSettings, Validator,
};
use quill_core::LogLevel;
use serde_json::Value;
use std::path::PathBuf;
use tracing::debug;

/// Log one message through a configured logger
#[derive(Parser, Debug)]
pub struct EmitCmd {
    /// Template to log
    #[arg(value_name = "TEMPLATE")]
    pub template: String,

    /// Property attached to the record (repeatable)
    #[arg(short = 'p', long = "property", value_name = "KEY=VALUE", value_parser = parse_property)]
    pub properties: Vec<(String, Value)>,

    /// Level to log at
    #[arg(short, long, value_name = "LEVEL", default_value = "info")]
    pub level: LogLevel,

    /// Configuration file (TOML, YAML or JSON)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Dot-separated category appended to the configured one
    #[arg(long, value_name = "CATEGORY")]
    pub category: Option<String>,
}

impl EmitCmd {
    pub fn execute(&self, globals: &GlobalOptions) -> Result<()> {
        let config = self.load_config()?;
        globals.init_diagnostics(config.diagnostics_config())?;

        let mut logger = config
            .build_logger()
            .context("failed to build logger from configuration")?;
        if let Some(category) = &self.category {
            for segment in category.split('.').filter(|s| !s.is_empty()) {
                logger = logger.child(segment);
            }
        }

        debug!(
            level = %self.level,
            transports = logger.transports().len(),
            "emitting log record"
        );

        let properties = collect_properties(&self.properties);
        logger
            .log(self.level, (self.template.clone(), properties))
            .context("failed to deliver log record")?;
        Ok(())
    }

    fn load_config(&self) -> Result<QuillConfig> {
        match &self.config {
            Some(path) => ConfigLoader::new()
                .load_with_overrides(path)
                .with_context(|| format!("failed to load configuration from {}", path.display())),
            None => {
                let mut config = QuillConfig {
                    transports: vec![TransportSettings::new(TransportKind::Console)],
                    ..Default::default()
                };
                apply_env_overrides(&mut config)?;
                config.validate()?;
                Ok(config)
            }
        }
    }
}
