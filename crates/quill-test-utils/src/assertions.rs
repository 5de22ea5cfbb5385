// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2025 Quill Contributors

//! Custom test assertions for Quill tests.

use quill_core::{LogLevel, MemoryTransport};
use quill_message::{format_message, parse, ErrorKind, Properties};

/// Assert that a memory transport captured exactly these messages.
pub fn assert_messages(memory: &MemoryTransport, expected: &[&str]) {
    let messages = memory.messages();
    assert_eq!(
        messages, expected,
        "transport '{}' captured unexpected messages",
        quill_core::Transport::id(memory)
    );
}

/// Assert that a memory transport captured exactly these levels.
pub fn assert_levels(memory: &MemoryTransport, expected: &[LogLevel]) {
    let levels: Vec<LogLevel> = memory.records().iter().map(|r| r.level).collect();
    assert_eq!(levels, expected, "unexpected captured levels");
}

/// Assert that a template renders to `expected`.
pub fn assert_renders(template: &str, properties: &Properties, expected: &str) {
    match format_message(template, properties) {
        Ok(rendered) => {
            assert_eq!(rendered, expected, "template {:?} rendered differently", template)
        }
        Err(err) => panic!("template {:?} failed to parse: {}", template, err),
    }
}

/// Assert that a template fails with `kind`.
pub fn assert_parse_error(template: &str, kind: ErrorKind) {
    match parse(template, &Properties::new()) {
        Ok(elements) => panic!(
            "template {:?} parsed into {} elements, expected {:?}",
            template,
            elements.len(),
            kind
        ),
        Err(err) => assert_eq!(err.kind, kind, "template {:?} failed differently", template),
    }
}

/// Assert that a quill command succeeds.
#[macro_export]
macro_rules! assert_quill_success {
    ($($arg:expr),+ $(,)?) => {
        $crate::quill()
            $(.arg($arg))+
            .assert()
            .success()
    };
}

/// Assert that a quill command fails.
#[macro_export]
macro_rules! assert_quill_failure {
    ($($arg:expr),+ $(,)?) => {
        $crate::quill()
            $(.arg($arg))+
            .assert()
            .failure()
    };
}

/// Assert that a quill command output contains a specific string.
#[macro_export]
macro_rules! assert_quill_output_contains {
    ($expected:expr, $($arg:expr),+ $(,)?) => {
        $crate::quill()
            $(.arg($arg))+
            .assert()
            .success()
            .stdout(predicates::prelude::predicate::str::contains($expected))
    };
}
