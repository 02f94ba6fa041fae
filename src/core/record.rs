//! Generic record type stored in every collection

use crate::core::collection::Collection;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Keys owned by the record itself; they never live in `fields`.
pub const RESERVED_KEYS: [&str; 4] = ["id", "collection", "created_at", "updated_at"];

/// A single stored record
///
/// Records carry no schema. `fields` is an open JSON object and the typed
/// accessors below coerce values the way hooks expect to read them.
/// Serialized flat: metadata keys and fields share one JSON object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: Uuid,
    pub collection: Collection,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Record {
    /// Create a new record with a fresh id and timestamps
    ///
    /// Reserved keys present in `fields` are dropped.
    pub fn new(collection: Collection, fields: Map<String, Value>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            collection,
            created_at: now,
            updated_at: now,
            fields: without_reserved(fields),
        }
    }

    /// Raw access to a field
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Whether the field is present (even if null)
    pub fn has(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Read a field as text
    ///
    /// Strings are returned as-is, numbers and booleans are rendered,
    /// everything else (including a missing field) reads as `""`.
    pub fn get_string(&self, field: &str) -> String {
        match self.fields.get(field) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::Bool(b)) => b.to_string(),
            _ => String::new(),
        }
    }

    /// Read a field as an integer
    ///
    /// Floats are truncated, numeric strings are parsed, booleans map to 1/0.
    /// Anything else reads as 0.
    pub fn get_int(&self, field: &str) -> i64 {
        match self.fields.get(field) {
            Some(Value::Number(n)) => n
                .as_i64()
                .or_else(|| n.as_f64().map(|f| f as i64))
                .unwrap_or(0),
            Some(Value::String(s)) => {
                let s = s.trim();
                s.parse::<i64>()
                    .ok()
                    .or_else(|| s.parse::<f64>().ok().map(|f| f as i64))
                    .unwrap_or(0)
            }
            Some(Value::Bool(b)) => i64::from(*b),
            _ => 0,
        }
    }

    /// Set a field, replacing any previous value
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(field.into(), value.into());
    }

    /// Merge a partial update into the fields and bump `updated_at`
    pub fn merge(&mut self, patch: Map<String, Value>) {
        for (key, value) in without_reserved(patch) {
            self.fields.insert(key, value);
        }
        self.touch();
    }

    /// Refresh `updated_at`
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

fn without_reserved(mut fields: Map<String, Value>) -> Map<String, Value> {
    for key in RESERVED_KEYS {
        fields.remove(key);
    }
    fields
}
