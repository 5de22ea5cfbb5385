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

use super::{check::report_parse_error, collect_properties, parse_property};
use anyhow::{bail, Context, Result};
use clap::Parser;
use quill_message::{parse, print_to_array, print_to_string};
use serde_json::Value;

/// Parse a template and print the result
#[derive(Parser, Debug)]
pub struct RenderCmd {
    /// Template to render
    #[arg(value_name = "TEMPLATE")]
    pub template: String,

    /// Property used for substitution (repeatable)
    #[arg(short = 'p', long = "property", value_name = "KEY=VALUE", value_parser = parse_property)]
    pub properties: Vec<(String, Value)>,

    /// Print the tagged piece list as JSON
    #[arg(long)]
    pub pieces: bool,
}

impl RenderCmd {
    pub fn execute(&self) -> Result<()> {
        let properties = collect_properties(&self.properties);
        let elements = match parse(&self.template, &properties) {
            Ok(elements) => elements,
            Err(err) => {
                report_parse_error(&self.template, &err);
                bail!("failed to render template");
            }
        };

        if self.pieces {
            let pieces = print_to_array(&elements);
            let json =
                serde_json::to_string_pretty(&pieces).context("failed to serialize pieces")?;
            println!("{}", json);
        } else {
            println!("{}", print_to_string(&elements));
        }
        Ok(())
    }
}
