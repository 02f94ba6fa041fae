//! The closed set of record collections served by the API

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A named group of records
///
/// Collections are fixed at compile time. Anything arriving over the wire is
/// parsed into this enum at the HTTP boundary, so hooks and storage never see
/// an unknown collection name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    Users,
    ForumPosts,
    ForumReplies,
    ClinicalCases,
    SyncLog,
}

impl Collection {
    /// Every collection, in declaration order
    pub const ALL: [Collection; 5] = [
        Collection::Users,
        Collection::ForumPosts,
        Collection::ForumReplies,
        Collection::ClinicalCases,
        Collection::SyncLog,
    ];

    /// Wire name used in URLs and logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Users => "users",
            Collection::ForumPosts => "forum_posts",
            Collection::ForumReplies => "forum_replies",
            Collection::ClinicalCases => "clinical_cases",
            Collection::SyncLog => "sync_log",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string does not name a known collection
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown collection '{0}'")]
pub struct UnknownCollection(pub String);

impl FromStr for Collection {
    type Err = UnknownCollection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Collection::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownCollection(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_every_wire_name() {
        for collection in Collection::ALL {
            let parsed: Collection = collection.as_str().parse().unwrap();
            assert_eq!(parsed, collection);
        }
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert!("Users".parse::<Collection>().is_err());
        assert!("forum-posts".parse::<Collection>().is_err());
    }

    #[test]
    fn test_unknown_collection_message() {
        let err = "invoices".parse::<Collection>().unwrap_err();
        assert_eq!(err.to_string(), "unknown collection 'invoices'");
    }

    #[test]
    fn test_serde_uses_wire_names() {
        let json = serde_json::to_string(&Collection::ClinicalCases).unwrap();
        assert_eq!(json, "\"clinical_cases\"");

        let back: Collection = serde_json::from_str("\"sync_log\"").unwrap();
        assert_eq!(back, Collection::SyncLog);
    }
}
