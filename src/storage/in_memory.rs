//! In-memory implementation of RecordStore for testing and development

use crate::core::{Collection, Record, RecordStore};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

type Key = (Collection, Uuid);

/// In-memory record store
///
/// Uses RwLock for thread-safe access. Locks are never held across an await.
#[derive(Clone, Default)]
pub struct InMemoryRecordStore {
    records: Arc<RwLock<HashMap<Key, Record>>>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn create(&self, record: Record) -> Result<Record> {
        let mut records = self
            .records
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        let key = (record.collection, record.id);
        if records.contains_key(&key) {
            return Err(anyhow!(
                "Record {} already exists in {}",
                record.id,
                record.collection
            ));
        }
        records.insert(key, record.clone());

        Ok(record)
    }

    async fn get(&self, collection: Collection, id: &Uuid) -> Result<Option<Record>> {
        let records = self
            .records
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(records.get(&(collection, *id)).cloned())
    }

    async fn list(&self, collection: Collection) -> Result<Vec<Record>> {
        let records = self
            .records
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        let mut items: Vec<Record> = records
            .values()
            .filter(|record| record.collection == collection)
            .cloned()
            .collect();
        items.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));

        Ok(items)
    }

    async fn update(&self, record: Record) -> Result<Record> {
        let mut records = self
            .records
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        let slot = records
            .get_mut(&(record.collection, record.id))
            .ok_or_else(|| anyhow!("Record {} not found in {}", record.id, record.collection))?;
        *slot = record.clone();

        Ok(record)
    }

    async fn delete(&self, collection: Collection, id: &Uuid) -> Result<bool> {
        let mut records = self
            .records
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        Ok(records.remove(&(collection, *id)).is_some())
    }
}
