//! Record lifecycle hooks
//!
//! A [`RecordHook`] reacts to creates and updates on one collection (or all of
//! them). Before-hooks can mutate the pending record or reject the write.
//! After-hooks only observe: the write has already been committed, so they
//! have no way to fail the request.
//!
//! ```text
//! create_record ──▶ before_create* ──▶ store.create ──▶ after_create*
//! update_record ──▶ before_update* ──▶ store.update ──▶ after_update*
//! ```

use crate::core::{ApiError, Collection, Record, RecordStore};
use async_trait::async_trait;
use std::sync::Arc;

/// Handle passed to every hook invocation
///
/// Hooks reach storage through this context rather than through global state.
/// Writes made through `store` go straight to the backend and do not re-enter
/// the hook pipeline.
#[derive(Clone)]
pub struct HookContext {
    pub store: Arc<dyn RecordStore>,
}

impl HookContext {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }
}

/// A callback bound to record lifecycle events
///
/// Every method has a no-op default so hooks only implement what they need.
#[async_trait]
pub trait RecordHook: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// Collection this hook is bound to, `None` for all collections
    fn collection(&self) -> Option<Collection>;

    async fn before_create(
        &self,
        _ctx: &HookContext,
        _record: &mut Record,
    ) -> Result<(), ApiError> {
        Ok(())
    }

    async fn after_create(&self, _ctx: &HookContext, _record: &Record) {}

    async fn before_update(
        &self,
        _ctx: &HookContext,
        _record: &mut Record,
    ) -> Result<(), ApiError> {
        Ok(())
    }

    async fn after_update(&self, _ctx: &HookContext, _record: &Record) {}

    fn applies_to(&self, collection: Collection) -> bool {
        self.collection().is_none_or(|c| c == collection)
    }
}

/// Ordered set of registered hooks
#[derive(Clone, Default)]
pub struct HookRegistry {
    hooks: Vec<Arc<dyn RecordHook>>,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a hook; hooks run in registration order
    pub fn register(&mut self, hook: Arc<dyn RecordHook>) {
        tracing::debug!(
            hook = hook.name(),
            collection = hook.collection().map(|c| c.as_str()).unwrap_or("*"),
            "registered record hook"
        );
        self.hooks.push(hook);
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Names of registered hooks, in order
    pub fn names(&self) -> Vec<&str> {
        self.hooks.iter().map(|h| h.name()).collect()
    }

    fn matching(&self, collection: Collection) -> impl Iterator<Item = &Arc<dyn RecordHook>> {
        self.hooks.iter().filter(move |h| h.applies_to(collection))
    }

    /// Run before-create hooks, stopping at the first rejection
    pub async fn run_before_create(
        &self,
        ctx: &HookContext,
        record: &mut Record,
    ) -> Result<(), ApiError> {
        for hook in self.matching(record.collection) {
            hook.before_create(ctx, record).await?;
        }
        Ok(())
    }

    pub async fn run_after_create(&self, ctx: &HookContext, record: &Record) {
        for hook in self.matching(record.collection) {
            hook.after_create(ctx, record).await;
        }
    }

    /// Run before-update hooks, stopping at the first rejection
    pub async fn run_before_update(
        &self,
        ctx: &HookContext,
        record: &mut Record,
    ) -> Result<(), ApiError> {
        for hook in self.matching(record.collection) {
            hook.before_update(ctx, record).await?;
        }
        Ok(())
    }

    pub async fn run_after_update(&self, ctx: &HookContext, record: &Record) {
        for hook in self.matching(record.collection) {
            hook.after_update(ctx, record).await;
        }
    }
}
