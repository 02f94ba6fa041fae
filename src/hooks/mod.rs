//! Record hooks shipped with the service
//!
//! | hook                   | collection       | event         |
//! |------------------------|------------------|---------------|
//! | [`UsernameNormalizer`] | `users`          | before create |
//! | [`PiiScreen`]          | `clinical_cases` | before create |
//! | [`ReplyCounter`]       | `forum_replies`  | after create  |
//! | [`AuditLogger`]        | all              | after create, after update |

pub mod audit;
pub mod pii;
pub mod reply_count;
pub mod username;

pub use audit::AuditLogger;
pub use pii::PiiScreen;
pub use reply_count::ReplyCounter;
pub use username::UsernameNormalizer;

use crate::core::RecordHook;
use std::sync::Arc;

/// The standard hook set, in the order it should be registered
pub fn default_hooks() -> Vec<Arc<dyn RecordHook>> {
    vec![
        Arc::new(UsernameNormalizer),
        Arc::new(PiiScreen),
        Arc::new(ReplyCounter),
        Arc::new(AuditLogger),
    ]
}
