//! Broadcast of committed record mutations
//!
//! The host publishes a [`RecordEvent`] after every successful create, update
//! or delete. Subscribers (tests, future realtime exposures) receive them
//! through a `tokio::sync::broadcast` channel.
//!
//! ```rust,ignore
//! let bus = EventBus::new(1024);
//! let mut rx = bus.subscribe();
//!
//! bus.publish(RecordEvent::Deleted {
//!     collection: Collection::ForumPosts,
//!     record_id: Uuid::new_v4(),
//! });
//!
//! let envelope = rx.recv().await?;
//! ```

use crate::core::{Collection, Record};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use uuid::Uuid;

/// A committed mutation on a record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum RecordEvent {
    Created { record: Record },
    Updated { record: Record },
    Deleted { collection: Collection, record_id: Uuid },
}

impl RecordEvent {
    pub fn collection(&self) -> Collection {
        match self {
            RecordEvent::Created { record } | RecordEvent::Updated { record } => record.collection,
            RecordEvent::Deleted { collection, .. } => *collection,
        }
    }

    pub fn record_id(&self) -> Uuid {
        match self {
            RecordEvent::Created { record } | RecordEvent::Updated { record } => record.id,
            RecordEvent::Deleted { record_id, .. } => *record_id,
        }
    }

    /// Action name (created, updated, deleted)
    pub fn action(&self) -> &'static str {
        match self {
            RecordEvent::Created { .. } => "created",
            RecordEvent::Updated { .. } => "updated",
            RecordEvent::Deleted { .. } => "deleted",
        }
    }
}

/// Envelope wrapping an event with metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEnvelope {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub event: RecordEvent,
}

impl EventEnvelope {
    pub fn new(event: RecordEvent) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            event,
        }
    }
}

/// Broadcast-based event bus
///
/// Cheap to clone. Slow receivers get `Lagged` once the capacity is exceeded.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<EventEnvelope>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all subscribers
    ///
    /// Never fails. Returns the number of receivers that will see the event.
    pub fn publish(&self, event: RecordEvent) -> usize {
        // send() only errs when nobody is listening
        self.sender.send(EventEnvelope::new(event)).unwrap_or(0)
    }

    /// Subscribe to events published from now on
    pub fn subscribe(&self) -> broadcast::Receiver<EventEnvelope> {
        self.sender.subscribe()
    }

    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(1024)
    }
}
