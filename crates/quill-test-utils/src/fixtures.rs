// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2025 Quill Contributors

//! Config file fixtures.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Minimal TOML config with a memory transport.
pub const MEMORY_TOML: &str = r#"
[logger]
prefix = "[test]"
lowest_level = "info"

[[transports]]
kind = "memory"
id = "memory"
"#;

/// Console config writing to stdout without colors.
pub const STDOUT_TOML: &str = r#"
[logger]
prefix = "[cli]"
lowest_level = "debug"
category = ["cli"]

[[transports]]
kind = "console"
id = "stdout"
target = "stdout"
color = false
"#;

/// YAML equivalent of [`MEMORY_TOML`].
pub const MEMORY_YAML: &str = r#"
logger:
  prefix: "[test]"
  lowest_level: info
transports:
  - kind: memory
    id: memory
"#;

/// JSON equivalent of [`MEMORY_TOML`].
pub const MEMORY_JSON: &str = r#"{
  "logger": { "prefix": "[test]", "lowest_level": "info" },
  "transports": [ { "kind": "memory", "id": "memory" } ]
}"#;

/// Temporary directory holding config files.
pub struct TestConfig {
    dir: TempDir,
}

impl TestConfig {
    /// Create an empty temporary directory.
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("failed to create temp dir"),
        }
    }

    /// Directory path.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write `contents` to `name` and return the full path.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, contents).expect("failed to write config fixture");
        path
    }
}

impl Default for TestConfig {
    fn default() -> Self {
        Self::new()
    }
}
