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

//! Quill logger engine
//!
//! This crate turns log calls into structured records and delivers them:
//! - **Logger**: accepts text templates, tagged templates and lazy callbacks,
//!   gates on a lowest level and fans out to transports
//! - **Context**: scoped ambient properties merged into every record
//! - **Subscriptions**: synchronous listeners notified for every record
//! - **Transports**: console and in-memory sinks behind one trait
//!
//! # Quick Start
//!
//! ```rust
//! use quill_core::{properties, ConsoleTransport, Logger, LoggerConfig};
//! use std::sync::Arc;
//!
//! let logger = Logger::new(
//!     LoggerConfig::default()
//!         .with_prefix("[app]")
//!         .with_transport(Arc::new(ConsoleTransport::new("console"))),
//! );
//!
//! logger.info(("listening on {port}", properties! { port = 8080 })).ok();
//!
//! let http = logger.child("http");
//! http.warn("slow request").ok();
//! ```

pub mod context;
pub mod error;
pub mod id;
pub mod level;
pub mod logger;
pub mod macros;
pub mod message;
pub mod record;
pub mod subscription;
pub mod transport;
pub mod transports;

pub use context::{ContextManager, LogContext};
pub use error::{LevelError, TransportError, TransportResult};
pub use id::{IdGenerator, SequentialIdGenerator, UuidGenerator};
pub use level::LogLevel;
pub use logger::{Logger, LoggerConfig, DEFAULT_PREFIX};
pub use message::{MessageSource, PropertySource, TemplateTag};
pub use record::{LogRecord, RawMessage, RecordHeader, RecordSnapshot, TemplateParts};
pub use subscription::{LogCallback, Subscription, SubscriptionRegistry};
pub use transport::{SharedTransport, Transport, TransportManager, TransportState};
pub use transports::{ConsoleTarget, ConsoleTransport, MemoryTransport, SegmentFormatter};

pub use quill_message::{MessagePiece, Properties};
