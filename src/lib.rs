//! # Darwin-MFC API
//!
//! Backend for the Darwin-MFC platform: a REST API over a fixed set of record
//! collections, with lifecycle hooks that run around every write.
//!
//! ## Features
//!
//! - **Typed collections**: `users`, `forum_posts`, `forum_replies`,
//!   `clinical_cases`, `sync_log`
//! - **Record hooks**: username normalisation, forum reply counting,
//!   PII screening of clinical cases, audit logging
//! - **Pluggable storage**: any `RecordStore`; an in-memory store ships by default
//! - **Permissive CORS** on every response, preflight short-circuited
//! - **Event bus**: optional broadcast of committed mutations
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use darwin::prelude::*;
//!
//! ServerBuilder::new()
//!     .with_store(InMemoryRecordStore::new())
//!     .with_hooks(default_hooks())
//!     .serve("127.0.0.1:8090")
//!     .await?;
//! ```

pub mod config;
pub mod core;
pub mod hooks;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    pub use crate::core::{
        ApiError, Collection, EventBus, EventEnvelope, HookContext, HookRegistry, Record,
        RecordError, RecordEvent, RecordHook, RecordStore, ValidationError,
    };

    pub use crate::hooks::{AuditLogger, PiiScreen, ReplyCounter, UsernameNormalizer, default_hooks};

    pub use crate::storage::InMemoryRecordStore;

    pub use crate::config::AppConfig;

    pub use crate::server::{RestExposure, ServerBuilder, ServerHost};

    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use serde_json::{Map, Value};
    pub use uuid::Uuid;
}
