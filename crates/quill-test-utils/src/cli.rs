// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2025 Quill Contributors

//! CLI command helpers for testing the quill binary.
//!
//! Provides convenient wrappers around assert_cmd.

use assert_cmd::Command;

/// Creates a new quill Command for testing.
///
/// Colors are disabled so output can be matched literally.
///
/// # Example
/// ```ignore
/// use quill_test_utils::quill;
///
/// quill()
///     .args(["render", "Hello, {name}!", "-p", "name=World"])
///     .assert()
///     .success();
/// ```
#[allow(deprecated)] // cargo_bin is deprecated but still works for our use case
pub fn quill() -> Command {
    let mut cmd = Command::cargo_bin("quill").expect("quill binary not found");
    cmd.env("NO_COLOR", "1")
        .env_remove("QUILL_LOG_LEVEL")
        .env_remove("QUILL_PREFIX")
        .env_remove("QUILL_ENABLED")
        .env_remove("QUILL_CATEGORY")
        .env_remove("QUILL_DIAGNOSTICS")
        .env_remove("QUILL_DIAGNOSTICS_FORMAT")
        .env_remove("QUILL_DIAGNOSTICS_FILTER")
        .env_remove("RUST_LOG");
    cmd
}

/// Fluent API wrapper for common quill command patterns.
pub struct QuillCommand {
    cmd: Command,
}

impl QuillCommand {
    /// Create a new QuillCommand.
    pub fn new() -> Self {
        Self { cmd: quill() }
    }

    /// Add an argument to the command.
    pub fn arg(mut self, arg: &str) -> Self {
        self.cmd.arg(arg);
        self
    }

    /// Add multiple arguments to the command.
    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    /// Add a `-p key=value` property argument.
    pub fn property(mut self, key: &str, value: &str) -> Self {
        self.cmd.arg("-p").arg(format!("{}={}", key, value));
        self
    }

    /// Set an environment variable for the command.
    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.cmd.env(key, value);
        self
    }

    /// Execute the command and assert success.
    pub fn run_success(mut self) -> assert_cmd::assert::Assert {
        self.cmd.assert().success()
    }

    /// Execute the command and assert failure.
    pub fn run_failure(mut self) -> assert_cmd::assert::Assert {
        self.cmd.assert().failure()
    }

    /// Get the underlying Command for custom assertions.
    pub fn into_inner(self) -> Command {
        self.cmd
    }
}

impl Default for QuillCommand {
    fn default() -> Self {
        Self::new()
    }
}
