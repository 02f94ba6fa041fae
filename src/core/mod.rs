//! Core types: records, collections, storage and hook traits, errors

pub mod collection;
pub mod error;
pub mod events;
pub mod hooks;
pub mod record;
pub mod store;

pub use collection::{Collection, UnknownCollection};
pub use error::{ApiError, ErrorResponse, RecordError, StorageError, ValidationError};
pub use events::{EventBus, EventEnvelope, RecordEvent};
pub use hooks::{HookContext, HookRegistry, RecordHook};
pub use record::Record;
pub use store::RecordStore;
