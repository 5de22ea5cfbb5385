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

//! Scoped ambient properties
//!
//! [`ContextManager::run_with_context`] makes a [`LogContext`] visible to
//! every log call made while the closure runs. Scopes nest: the active scope
//! is the innermost one, and leaving it restores the enclosing scope.
//!
//! ```rust
//! use quill_core::ContextManager;
//! use serde_json::json;
//!
//! let manager = ContextManager::new();
//! let mut outer = ContextManager::create_empty_context();
//! outer.insert("request".to_string(), json!("r-1"));
//!
//! manager.run_with_context(outer, || {
//!     manager.run_with_context(ContextManager::create_empty_context(), || {
//!         assert_eq!(manager.get("request"), None);
//!     });
//!     assert_eq!(manager.get("request"), Some(json!("r-1")));
//! });
//! assert_eq!(manager.get("request"), None);
//! ```

use quill_message::Properties;
use serde_json::Value;
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

/// Properties attached to one scope
pub type LogContext = Properties;

/// Handle to a scoped context registry
///
/// Cloning is cheap; clones share the same registry. The manager is
/// single-threaded (`!Send`).
#[derive(Clone, Default)]
pub struct ContextManager {
    inner: Rc<ContextState>,
}

#[derive(Default)]
struct ContextState {
    next_id: Cell<u64>,
    registry: RefCell<BTreeMap<u64, LogContext>>,
    active: RefCell<Vec<u64>>,
}

impl ContextManager {
    /// Create a manager with no active scope
    pub fn new() -> Self {
        Self::default()
    }

    /// A fresh empty context
    pub fn create_empty_context() -> LogContext {
        LogContext::new()
    }

    /// Run `f` with `context` as the active scope
    ///
    /// The scope is removed when `f` returns or unwinds.
    pub fn run_with_context<R>(&self, context: LogContext, f: impl FnOnce() -> R) -> R {
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);

        self.inner.registry.borrow_mut().insert(id, context);
        self.inner.active.borrow_mut().push(id);
        tracing::trace!(scope = id, depth = self.depth(), "entered log context");

        let _guard = ScopeGuard {
            state: &self.inner,
            id,
        };
        f()
    }

    /// Look up `key` in the active scope
    pub fn get(&self, key: &str) -> Option<Value> {
        let id = self.active_id()?;
        self.inner.registry.borrow().get(&id)?.get(key).cloned()
    }

    /// Set `key` in the active scope; does nothing outside any scope
    pub fn set<K: Into<String>, V: Into<Value>>(&self, key: K, value: V) {
        let Some(id) = self.active_id() else {
            return;
        };
        if let Some(context) = self.inner.registry.borrow_mut().get_mut(&id) {
            context.insert(key.into(), value.into());
        }
    }

    /// Snapshot of the active scope
    pub fn get_store(&self) -> Option<LogContext> {
        let id = self.active_id()?;
        self.inner.registry.borrow().get(&id).cloned()
    }

    /// Snapshot of every live scope keyed by id, outermost first
    pub fn contexts(&self) -> BTreeMap<u64, LogContext> {
        self.inner.registry.borrow().clone()
    }

    /// Number of nested scopes currently entered
    pub fn depth(&self) -> usize {
        self.inner.active.borrow().len()
    }

    /// Whether any scope is active
    pub fn is_active(&self) -> bool {
        self.depth() > 0
    }

    /// Active scope overlaid with `properties`; explicit keys win
    pub fn merged(&self, properties: Properties) -> Properties {
        let mut merged = self.get_store().unwrap_or_default();
        merged.extend(properties);
        merged
    }

    fn active_id(&self) -> Option<u64> {
        self.inner.active.borrow().last().copied()
    }
}

impl fmt::Debug for ContextManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContextManager")
            .field("depth", &self.depth())
            .field("contexts", &self.inner.registry.borrow())
            .finish()
    }
}

struct ScopeGuard<'a> {
    state: &'a ContextState,
    id: u64,
}

impl Drop for ScopeGuard<'_> {
    fn drop(&mut self) {
        let mut active = self.state.active.borrow_mut();
        if active.last() == Some(&self.id) {
            active.pop();
        } else {
            active.retain(|id| *id != self.id);
        }
        drop(active);
        self.state.registry.borrow_mut().remove(&self.id);
        tracing::trace!(scope = self.id, "left log context");
    }
}
