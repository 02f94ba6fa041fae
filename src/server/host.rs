//! Server host owning storage, hooks and the event bus
//!
//! The host is transport-agnostic: HTTP handlers call into it, and it runs the
//! hook pipeline around every store write. Handlers never talk to the store
//! directly for mutations.

use crate::core::{
    ApiError, Collection, EventBus, HookContext, HookRegistry, Record, RecordError, RecordEvent,
    RecordHook, RecordStore,
};
use serde_json::{Map, Value};
use std::sync::Arc;
use uuid::Uuid;

/// Host context containing all service state
pub struct ServerHost {
    pub store: Arc<dyn RecordStore>,

    pub hooks: HookRegistry,

    /// When present, committed mutations are broadcast here
    pub event_bus: Option<Arc<EventBus>>,
}

impl ServerHost {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            store,
            hooks: HookRegistry::new(),
            event_bus: None,
        }
    }

    pub fn with_hook(mut self, hook: Arc<dyn RecordHook>) -> Self {
        self.hooks.register(hook);
        self
    }

    pub fn with_event_bus(mut self, event_bus: EventBus) -> Self {
        self.event_bus = Some(Arc::new(event_bus));
        self
    }

    pub fn event_bus(&self) -> Option<&Arc<EventBus>> {
        self.event_bus.as_ref()
    }

    fn context(&self) -> HookContext {
        HookContext::new(self.store.clone())
    }

    fn publish(&self, event: RecordEvent) {
        if let Some(bus) = &self.event_bus {
            bus.publish(event);
        }
    }

    /// Create a record, running before- and after-create hooks
    ///
    /// A before-hook rejection aborts the write; nothing is persisted.
    pub async fn create_record(
        &self,
        collection: Collection,
        fields: Map<String, Value>,
    ) -> Result<Record, ApiError> {
        let ctx = self.context();
        let mut record = Record::new(collection, fields);

        self.hooks.run_before_create(&ctx, &mut record).await?;

        let record = self.store.create(record).await?;
        tracing::debug!(collection = %collection, record_id = %record.id, "record stored");

        self.publish(RecordEvent::Created {
            record: record.clone(),
        });
        self.hooks.run_after_create(&ctx, &record).await;

        Ok(record)
    }

    /// Apply a partial update, running before- and after-update hooks
    pub async fn update_record(
        &self,
        collection: Collection,
        id: Uuid,
        patch: Map<String, Value>,
    ) -> Result<Record, ApiError> {
        let ctx = self.context();
        let mut record = self.get_record(collection, id).await?;
        record.merge(patch);

        self.hooks.run_before_update(&ctx, &mut record).await?;

        let record = self.store.update(record).await?;

        self.publish(RecordEvent::Updated {
            record: record.clone(),
        });
        self.hooks.run_after_update(&ctx, &record).await;

        Ok(record)
    }

    pub async fn get_record(&self, collection: Collection, id: Uuid) -> Result<Record, ApiError> {
        self.store
            .get(collection, &id)
            .await?
            .ok_or_else(|| RecordError::NotFound { collection, id }.into())
    }

    pub async fn list_records(&self, collection: Collection) -> Result<Vec<Record>, ApiError> {
        Ok(self.store.list(collection).await?)
    }

    pub async fn delete_record(&self, collection: Collection, id: Uuid) -> Result<(), ApiError> {
        if !self.store.delete(collection, &id).await? {
            return Err(RecordError::NotFound { collection, id }.into());
        }
        self.publish(RecordEvent::Deleted {
            collection,
            record_id: id,
        });
        Ok(())
    }
}
