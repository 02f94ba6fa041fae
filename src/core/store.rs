//! Storage trait for records

use crate::core::{Collection, Record};
use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

/// Service trait for persisting records
///
/// Implementations own durability and concurrency control. The rest of the
/// crate is agnostic to the backend and only talks to this trait.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Persist a new record
    async fn create(&self, record: Record) -> Result<Record>;

    /// Get a record by collection and ID
    async fn get(&self, collection: Collection, id: &Uuid) -> Result<Option<Record>>;

    /// List every record of a collection, oldest first
    async fn list(&self, collection: Collection) -> Result<Vec<Record>>;

    /// Replace an existing record
    ///
    /// Fails if the record does not exist.
    async fn update(&self, record: Record) -> Result<Record>;

    /// Delete a record, returning whether it existed
    async fn delete(&self, collection: Collection, id: &Uuid) -> Result<bool>;
}
