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

//! Identifier generation for subscriptions and transports

use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

/// Source of unique identifiers
pub trait IdGenerator {
    /// Return `explicit` unchanged when given, otherwise a fresh unique id
    fn generate(&self, explicit: Option<&str>) -> String;
}

/// Random UUID v4 identifiers
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn generate(&self, explicit: Option<&str>) -> String {
        match explicit {
            Some(id) => id.to_string(),
            None => Uuid::new_v4().to_string(),
        }
    }
}

/// Deterministic `prefix-N` identifiers, mostly for tests
#[derive(Debug)]
pub struct SequentialIdGenerator {
    prefix: String,
    next: AtomicU64,
}

impl SequentialIdGenerator {
    /// Create a generator producing `prefix-1`, `prefix-2`, ...
    pub fn new<S: Into<String>>(prefix: S) -> Self {
        SequentialIdGenerator {
            prefix: prefix.into(),
            next: AtomicU64::new(1),
        }
    }
}

impl Default for SequentialIdGenerator {
    fn default() -> Self {
        Self::new("")
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn generate(&self, explicit: Option<&str>) -> String {
        if let Some(id) = explicit {
            return id.to_string();
        }
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        if self.prefix.is_empty() {
            n.to_string()
        } else {
            format!("{}-{}", self.prefix, n)
        }
    }
}
