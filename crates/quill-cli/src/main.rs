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

mod commands;
mod output;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use commands::*;
use quill_observability::DiagnosticsConfig;
use std::io;

#[derive(Parser)]
#[command(name = "quill")]
#[command(version, about = "Render, check and emit structured log message templates")]
#[command(propagate_version = true)]
#[command(author = "Quill Contributors")]
#[command(arg_required_else_help = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose diagnostics
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress diagnostics and status output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Colored output
    #[arg(
        long,
        global = true,
        value_name = "WHEN",
        value_enum,
        default_value_t = ColorChoice::Auto
    )]
    color: ColorChoice,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a template and print the result
    Render(RenderCmd),

    /// Validate a template
    Check(CheckCmd),

    /// Log one message through a configured logger
    Emit(EmitCmd),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// When to color output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ColorChoice {
    Auto,
    Always,
    Never,
}

/// Flags shared by every command
#[derive(Debug, Clone, Copy)]
pub struct GlobalOptions {
    /// `--verbose`
    pub verbose: bool,
    /// `--quiet`
    pub quiet: bool,
}

impl GlobalOptions {
    /// Install the diagnostics subscriber unless `--quiet` was given
    pub fn init_diagnostics(&self, config: DiagnosticsConfig) -> Result<()> {
        if self.quiet {
            return Ok(());
        }
        let config = if self.verbose {
            config.with_filter("debug")
        } else {
            config
        };
        let ansi = config.ansi && console::colors_enabled_stderr();
        let config = config.with_ansi(ansi);

        match quill_observability::init_diagnostics(&config) {
            Err(err) if !err.is_already_initialized() => {
                Err(err).context("invalid diagnostics settings")
            }
            _ => Ok(()),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.color {
        ColorChoice::Never => {
            console::set_colors_enabled(false);
            console::set_colors_enabled_stderr(false);
        }
        ColorChoice::Always => {
            console::set_colors_enabled(true);
            console::set_colors_enabled_stderr(true);
        }
        ColorChoice::Auto => {}
    }

    let globals = GlobalOptions {
        verbose: cli.verbose,
        quiet: cli.quiet,
    };

    let result = match cli.command {
        Commands::Render(cmd) => globals
            .init_diagnostics(DiagnosticsConfig::new())
            .and_then(|()| cmd.execute()),
        Commands::Check(cmd) => globals
            .init_diagnostics(DiagnosticsConfig::new())
            .and_then(|()| cmd.execute(&globals)),
        Commands::Emit(cmd) => cmd.execute(&globals),
        Commands::Completions { shell } => {
            generate_completions(shell);
            Ok(())
        }
    };

    if let Err(e) = result {
        output::error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}

fn generate_completions(shell: Shell) {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "quill", &mut io::stdout());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_emit_arguments() {
        let cli = Cli::try_parse_from([
            "quill", "emit", "hi {name}", "-p", "name=ann", "--level", "warn", "--quiet",
        ]);
        let cli = match cli {
            Ok(cli) => cli,
            Err(err) => panic!("emit arguments rejected: {}", err),
        };
        assert!(cli.quiet);
        match cli.command {
            Commands::Emit(cmd) => {
                assert_eq!(cmd.level, quill_core::LogLevel::Warn);
                assert_eq!(cmd.properties.len(), 1);
            }
            _ => panic!("expected emit"),
        }
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        assert!(Cli::try_parse_from(["quill", "--verbose", "--quiet", "check", "x"]).is_err());
    }
}
