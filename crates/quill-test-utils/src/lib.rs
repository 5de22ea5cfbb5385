// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2025 Quill Contributors

//! # Quill Test Utilities
//!
//! Shared test utilities for Quill crates providing:
//! - CLI command helpers for testing the `quill` binary
//! - Transports that fail on demand or write into shared buffers
//! - A subscriber recorder keeping what a logger notified
//! - Config file fixtures
//! - Custom assertions for common test patterns

pub mod assertions;
pub mod cli;
pub mod fixtures;
pub mod recorder;
pub mod transports;

// Re-export commonly used items at crate root
pub use assertions::*;
pub use cli::{quill, QuillCommand};
pub use fixtures::TestConfig;
pub use recorder::{NotifiedEvent, SubscriberRecorder};
pub use transports::{FailingTransport, SharedBuffer};
