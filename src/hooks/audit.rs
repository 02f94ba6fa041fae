//! Audit trail of record writes on the `audit` log target

use crate::core::{Collection, HookContext, Record, RecordHook};
use async_trait::async_trait;

/// Log target for audit lines
pub const AUDIT_TARGET: &str = "audit";

/// After-create and after-update hook on every collection
///
/// Creates in `sync_log` are not logged; updates are logged everywhere.
pub struct AuditLogger;

#[async_trait]
impl RecordHook for AuditLogger {
    fn name(&self) -> &str {
        "audit_logger"
    }

    fn collection(&self) -> Option<Collection> {
        None
    }

    async fn after_create(&self, _ctx: &HookContext, record: &Record) {
        if record.collection == Collection::SyncLog {
            return;
        }
        tracing::info!(
            target: AUDIT_TARGET,
            collection = %record.collection,
            record_id = %record.id,
            "record created"
        );
    }

    async fn after_update(&self, _ctx: &HookContext, record: &Record) {
        tracing::info!(
            target: AUDIT_TARGET,
            collection = %record.collection,
            record_id = %record.id,
            "record updated"
        );
    }
}
