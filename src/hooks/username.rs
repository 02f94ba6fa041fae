//! Lowercases usernames before a user is stored

use crate::core::{ApiError, Collection, HookContext, Record, RecordHook};
use async_trait::async_trait;
use serde_json::Value;

pub const USERNAME_FIELD: &str = "username";

/// Before-create hook on `users`
///
/// Only string usernames are rewritten. A missing, null or non-string
/// `username` is stored as given.
pub struct UsernameNormalizer;

#[async_trait]
impl RecordHook for UsernameNormalizer {
    fn name(&self) -> &str {
        "username_normalizer"
    }

    fn collection(&self) -> Option<Collection> {
        Some(Collection::Users)
    }

    async fn before_create(
        &self,
        _ctx: &HookContext,
        record: &mut Record,
    ) -> Result<(), ApiError> {
        if let Some(Value::String(username)) = record.get(USERNAME_FIELD) {
            let lowered = username.to_lowercase();
            record.set(USERNAME_FIELD, lowered);
        }
        Ok(())
    }
}
