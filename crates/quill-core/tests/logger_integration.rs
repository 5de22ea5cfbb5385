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

#![allow(clippy::unwrap_used)]
//! Logger behaviour through the public API

use quill_core::{
    properties, ContextManager, ConsoleTransport, LogLevel, Logger, LoggerConfig, MemoryTransport,
    MessageSource, RawMessage, SharedTransport, TransportError,
};
use quill_test_utils::{
    assert_levels, assert_messages, FailingTransport, SharedBuffer, SubscriberRecorder,
};
use serde_json::json;
use std::cell::RefCell;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::rc::Rc;
use std::sync::Arc;

fn memory_logger(lowest: Option<LogLevel>) -> (Logger, Arc<MemoryTransport>) {
    let memory = Arc::new(MemoryTransport::new("memory"));
    let logger = Logger::new(
        LoggerConfig::default()
            .with_lowest_level(lowest)
            .with_transport(Arc::clone(&memory) as SharedTransport),
    );
    (logger, memory)
}

#[test]
fn test_hello_world() {
    let (logger, memory) = memory_logger(Some(LogLevel::Debug));
    logger
        .info(("Hello, {name}!", properties! { name = "World" }))
        .unwrap();
    assert_messages(&memory, &["Hello, World!"]);
}

#[test]
fn test_level_gating_still_notifies_subscribers() {
    let (logger, memory) = memory_logger(Some(LogLevel::Warn));
    let recorder = SubscriberRecorder::new();
    recorder.attach(&logger);

    logger.debug("debug").unwrap();
    logger.info("info").unwrap();
    logger.warn("warn").unwrap();
    logger.error("error").unwrap();

    assert_levels(&memory, &[LogLevel::Warn, LogLevel::Error]);
    assert_eq!(
        recorder.levels(),
        vec![LogLevel::Debug, LogLevel::Info, LogLevel::Warn, LogLevel::Error]
    );
}

#[test]
fn test_capturing_subscriber_sees_resolved_records() {
    let logger = Logger::new(
        LoggerConfig::default()
            .with_category(["http"])
            .with_lowest_level(Some(LogLevel::Error)),
    );
    let recorder = SubscriberRecorder::capturing();
    recorder.attach(&logger);

    logger
        .info(("GET {path}", properties! { path = "/health" }))
        .unwrap();

    let events = recorder.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].level, LogLevel::Info);
    assert_eq!(events[0].category, vec!["http"]);
    assert!(events[0].snapshot.is_some());
    assert_eq!(recorder.messages(), vec!["GET /health"]);
}

#[test]
fn test_subscriber_order_and_unsubscribe() {
    let (logger, _memory) = memory_logger(Some(LogLevel::Debug));
    let calls = Rc::new(RefCell::new(Vec::new()));

    let subscribe = |name: &'static str| {
        let calls = Rc::clone(&calls);
        logger.on_log(move |_, _| calls.borrow_mut().push(name))
    };
    let _a = subscribe("A");
    let b = subscribe("B");
    let _c = subscribe("C");

    logger.info("first").unwrap();
    assert_eq!(*calls.borrow(), vec!["A", "B", "C"]);

    calls.borrow_mut().clear();
    b.unsubscribe();
    b.unsubscribe();
    logger.info("second").unwrap();
    assert_eq!(*calls.borrow(), vec!["A", "C"]);
}

#[test]
fn test_lazy_callback_panics_only_on_access() {
    let (logger, _memory) = memory_logger(None);
    let recorder = SubscriberRecorder::new();
    recorder.attach(&logger);

    let reads = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&reads);
    logger.on_log(move |_, record| {
        let outcome = catch_unwind(AssertUnwindSafe(|| record.text()));
        sink.borrow_mut().push(outcome.is_err());
    });

    // Muted, so no transport forces the record; the call itself must not fail
    logger.info(MessageSource::lazy(|_tag| Vec::new())).unwrap();

    assert_eq!(recorder.count(), 1);
    assert_eq!(*reads.borrow(), vec![true]);
}

#[test]
fn test_lazy_callback_with_tag() {
    let (logger, memory) = memory_logger(Some(LogLevel::Debug));
    logger
        .info(MessageSource::lazy(|tag| tag.format(&["loaded ", " rows"], &[json!(12)])))
        .unwrap();

    let record = memory.last().unwrap();
    assert_eq!(record.text, "loaded 12 rows");
    assert!(matches!(record.raw_message, RawMessage::Template(_)));
}

#[test]
fn test_nested_context_restores_outer() {
    let (logger, memory) = memory_logger(Some(LogLevel::Debug));
    let manager = logger.context();

    manager.run_with_context(properties! { scope = "outer" }, || {
        manager.run_with_context(properties! { scope = "inner" }, || {
            logger.info("in {scope}").unwrap();
        });
        logger.info("back in {scope}").unwrap();
    });
    logger.info("no {scope}").unwrap();

    assert_messages(&memory, &["in inner", "back in outer", "no scope"]);
}

#[test]
fn test_explicit_properties_override_context() {
    let (logger, memory) = memory_logger(Some(LogLevel::Debug));
    logger.context().run_with_context(properties! { user = "ambient", request = "r-9" }, || {
        logger
            .info(("{user} {request}", properties! { user = "explicit" }))
            .unwrap();
    });

    let record = memory.last().unwrap();
    assert_eq!(record.text, "explicit r-9");
    assert_eq!(record.properties["request"], json!("r-9"));
}

#[test]
fn test_context_set_inside_scope_is_visible() {
    let (logger, memory) = memory_logger(Some(LogLevel::Debug));
    logger
        .context()
        .run_with_context(ContextManager::create_empty_context(), || {
            logger.context().set("job", 7);
            logger.info("job {job}").unwrap();
        });
    assert_messages(&memory, &["job 7"]);
}

#[test]
fn test_transport_failures_reported_and_first_returned() {
    let first = Arc::new(FailingTransport::with_reason("first", "disk full"));
    let memory = Arc::new(MemoryTransport::new("memory"));
    let second = Arc::new(FailingTransport::new("second"));
    let logger = Logger::new(LoggerConfig::default().with_transports([
        Arc::clone(&first) as SharedTransport,
        Arc::clone(&memory) as SharedTransport,
        Arc::clone(&second) as SharedTransport,
    ]));
    let recorder = SubscriberRecorder::new();
    recorder.attach(&logger);

    let err = logger.error("boom").unwrap_err();
    match err {
        TransportError::Rejected { id, reason } => {
            assert_eq!(id, "first");
            assert_eq!(reason, "disk full");
        }
        other => panic!("unexpected error: {}", other),
    }
    assert_eq!(first.attempts(), 1);
    assert_eq!(second.attempts(), 1);
    assert_eq!(memory.len(), 1);
    assert_eq!(recorder.count(), 1);
}

#[test]
fn test_parse_failure_logs_empty_message() {
    let (logger, memory) = memory_logger(Some(LogLevel::Debug));
    logger.warn("unclosed {arg").unwrap();
    assert_messages(&memory, &[""]);
}

#[test]
fn test_deferred_properties_resolve_when_sent() {
    let (logger, memory) = memory_logger(Some(LogLevel::Debug));
    let calls = Rc::new(RefCell::new(0));
    let counter = Rc::clone(&calls);
    logger
        .info(MessageSource::deferred("took {ms}ms", move || {
            *counter.borrow_mut() += 1;
            properties! { ms = 42 }
        }))
        .unwrap();

    assert_messages(&memory, &["took 42ms"]);
    assert_eq!(*calls.borrow(), 1);
}

#[test]
fn test_deferred_properties_untouched_when_muted() {
    let (logger, _memory) = memory_logger(None);
    let calls = Rc::new(RefCell::new(0));
    let counter = Rc::clone(&calls);
    logger
        .info(MessageSource::deferred("{x}", move || {
            *counter.borrow_mut() += 1;
            properties! { x = 1 }
        }))
        .unwrap();
    assert_eq!(*calls.borrow(), 0);
}

#[test]
fn test_console_transport_output() {
    let buffer = SharedBuffer::new();
    let logger = Logger::new(
        LoggerConfig::default()
            .with_prefix("[svc]")
            .with_category(["http"])
            .with_transport(Arc::new(ConsoleTransport::with_writer("console", buffer.clone()))),
    );

    logger.child("router").warn(("route {path} missing", properties! { path = "/x" })).unwrap();

    let lines = buffer.lines();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].ends_with("[svc] WRN http·router route /x missing"));
}

#[test]
fn test_shared_transport_across_loggers() {
    let memory = Arc::new(MemoryTransport::new("shared"));
    let a = Logger::new(
        LoggerConfig::default()
            .with_prefix("[a]")
            .with_transport(Arc::clone(&memory) as SharedTransport),
    );
    let b = Logger::new(
        LoggerConfig::default()
            .with_prefix("[b]")
            .with_transport(Arc::clone(&memory) as SharedTransport),
    );

    a.info("from a").unwrap();
    b.info("from b").unwrap();

    let prefixes: Vec<String> = memory.records().into_iter().map(|r| r.prefix).collect();
    assert_eq!(prefixes, vec!["[a]", "[b]"]);
}
