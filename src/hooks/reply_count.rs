//! Keeps `forum_posts.reply_count` in step with new replies
//!
//! The update is best-effort: lookup and save failures are logged and dropped,
//! and the read-modify-write is not atomic. Concurrent replies to the same post
//! can lose increments.

use crate::core::{Collection, HookContext, Record, RecordHook};
use async_trait::async_trait;
use uuid::Uuid;

pub const POST_ID_FIELD: &str = "post_id";
pub const REPLY_COUNT_FIELD: &str = "reply_count";

/// After-create hook on `forum_replies`
pub struct ReplyCounter;

#[async_trait]
impl RecordHook for ReplyCounter {
    fn name(&self) -> &str {
        "reply_counter"
    }

    fn collection(&self) -> Option<Collection> {
        Some(Collection::ForumReplies)
    }

    async fn after_create(&self, ctx: &HookContext, reply: &Record) {
        let post_id = reply.get_string(POST_ID_FIELD);
        if post_id.is_empty() {
            return;
        }

        let Ok(id) = Uuid::parse_str(&post_id) else {
            tracing::warn!(
                reply_id = %reply.id,
                post_id = %post_id,
                "reply references a malformed post id"
            );
            return;
        };

        let mut post = match ctx.store.get(Collection::ForumPosts, &id).await {
            Ok(Some(post)) => post,
            Ok(None) => {
                tracing::warn!(
                    reply_id = %reply.id,
                    post_id = %post_id,
                    "reply references a missing post"
                );
                return;
            }
            Err(e) => {
                tracing::warn!(
                    reply_id = %reply.id,
                    post_id = %post_id,
                    error = %e,
                    "failed to load post"
                );
                return;
            }
        };

        let current = post.get_int(REPLY_COUNT_FIELD);
        let Some(count) = current.checked_add(1) else {
            tracing::warn!(post_id = %post_id, reply_count = current, "reply count at maximum");
            return;
        };
        post.set(REPLY_COUNT_FIELD, count);
        post.touch();

        match ctx.store.update(post).await {
            Ok(_) => {
                tracing::debug!(post_id = %post_id, reply_count = count, "incremented reply count")
            }
            Err(e) => {
                tracing::warn!(post_id = %post_id, error = %e, "failed to save reply count")
            }
        }
    }
}
