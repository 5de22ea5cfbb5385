// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2025 Quill Contributors

//! Tests for `quill emit` and shell completions.

use predicates::prelude::*;
use quill_test_utils::fixtures::STDOUT_TOML;
use quill_test_utils::{quill, QuillCommand, TestConfig};

#[test]
fn test_emit_default_logger_writes_stderr() {
    quill()
        .args(["emit", "careful {what}", "-p", "what=ice", "--level", "warn"])
        .assert()
        .success()
        .stderr(predicate::str::contains("[Logger] WRN careful ice"));
}

#[test]
fn test_emit_with_config_file() {
    let dir = TestConfig::new();
    let path = dir.write("quill.toml", STDOUT_TOML);

    quill()
        .args(["emit", "hello {user}", "-p", "user=ann", "--config"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("[cli] INF cli hello ann"));
}

#[test]
fn test_emit_category_extends_config() {
    let dir = TestConfig::new();
    let path = dir.write("quill.toml", STDOUT_TOML);

    quill()
        .args(["emit", "routed", "--category", "http.router", "--config"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("cli·http·router routed"));
}

#[test]
fn test_emit_below_threshold_is_silent() {
    let dir = TestConfig::new();
    let path = dir.write("quill.toml", STDOUT_TOML);

    quill()
        .args(["emit", "noise", "--level", "trace", "--config"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_emit_env_overrides() {
    QuillCommand::new()
        .args(&["emit", "started"])
        .env("QUILL_PREFIX", "[env]")
        .run_success()
        .stderr(predicate::str::contains("[env] INF started"));

    QuillCommand::new()
        .args(&["emit", "careful", "--level", "warn"])
        .env("QUILL_LOG_LEVEL", "error")
        .run_success()
        .stderr(predicate::str::contains("careful").not());
}

#[test]
fn test_emit_invalid_env_override_fails() {
    QuillCommand::new()
        .args(&["emit", "x"])
        .env("QUILL_ENABLED", "maybe")
        .run_failure()
        .stderr(predicate::str::contains("QUILL_ENABLED=maybe"));
}

#[test]
fn test_emit_unknown_level() {
    quill()
        .args(["emit", "x", "--level", "loud"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown log level 'loud'"));
}

#[test]
fn test_emit_missing_config() {
    let dir = TestConfig::new();
    quill()
        .args(["emit", "x", "--config"])
        .arg(dir.path().join("absent.toml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load configuration"));
}

#[test]
fn test_completions_bash() {
    quill()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("quill"));
}
