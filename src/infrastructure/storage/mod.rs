//! Persistence backends for the content repository
//!
//! A backend stores opaque JSON records per collection. Translating records
//! to and from domain entities is the repository's job, not the store's.
//!
//! Two implementations:
//! - `LocalStore`: key-value JSON files (or memory), seeded with defaults
//! - `SurrealStore`: SurrealDB through the `any` engine (ws://, http://, mem://, rocksdb://)

pub mod local;
pub mod migrations;
pub mod surreal;

use std::cmp::Ordering;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use thiserror::Error;

use crate::domain::models::CollectionKind;

pub use local::LocalStore;
pub use surreal::SurrealStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("query failed: {0}")]
    Query(String),

    #[error("record has no `{0}` field")]
    MissingField(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Sort instruction for `select_all`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderBy {
    pub field: &'static str,
    pub descending: bool,
}

impl OrderBy {
    pub const fn asc(field: &'static str) -> Self {
        Self { field, descending: false }
    }

    pub const fn desc(field: &'static str) -> Self {
        Self { field, descending: true }
    }
}

/// Narrow CRUD contract every backend offers, per collection
#[async_trait]
pub trait ContentStore: Send + Sync {
    fn backend_name(&self) -> &'static str;

    /// All records; `order` sorts stably, ties keep insertion order
    /// (reversed for descending sorts so the latest insert comes first)
    async fn select_all(&self, collection: CollectionKind, order: Option<OrderBy>) -> StoreResult<Vec<Value>>;

    /// Replace the record whose `conflict_key` field matches, or insert it
    async fn upsert(&self, collection: CollectionKind, conflict_key: &str, record: Value) -> StoreResult<()>;

    async fn insert(&self, collection: CollectionKind, record: Value) -> StoreResult<()>;

    /// Delete by id; unknown ids are not an error
    async fn delete(&self, collection: CollectionKind, id: &str) -> StoreResult<()>;

    /// Atomically swap the whole collection for `records`
    async fn replace_all(&self, collection: CollectionKind, records: Vec<Value>) -> StoreResult<()>;
}

/// String value of `field` in a JSON record
pub(crate) fn field_str<'a>(record: &'a Value, field: &str) -> Option<&'a str> {
    record.get(field).and_then(Value::as_str)
}

pub(crate) fn require_str(record: &Value, field: &str) -> StoreResult<String> {
    field_str(record, field)
        .map(str::to_string)
        .ok_or_else(|| StoreError::MissingField(field.to_string()))
}

fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::String(x)), Some(Value::String(y))) => {
            // RFC 3339 strings with different fractional precision don't sort lexically
            match (x.parse::<DateTime<Utc>>(), y.parse::<DateTime<Utc>>()) {
                (Ok(dx), Ok(dy)) => dx.cmp(&dy),
                _ => x.cmp(y),
            }
        }
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        _ => Ordering::Equal,
    }
}

/// Stable in-process sort shared by every backend.
/// `records` must be in insertion order.
pub(crate) fn sort_records(records: &mut Vec<Value>, order: Option<OrderBy>) {
    let Some(order) = order else {
        return;
    };
    if order.descending {
        records.reverse();
        records.sort_by(|a, b| compare_values(b.get(order.field), a.get(order.field)));
    } else {
        records.sort_by(|a, b| compare_values(a.get(order.field), b.get(order.field)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sort_ascending_is_stable() {
        let mut records = vec![
            json!({"id": "b", "display_order": 2}),
            json!({"id": "a1", "display_order": 1}),
            json!({"id": "a2", "display_order": 1}),
        ];
        sort_records(&mut records, Some(OrderBy::asc("display_order")));
        let ids: Vec<_> = records.iter().map(|r| r["id"].as_str().unwrap()).collect();
        assert_eq!(ids, vec!["a1", "a2", "b"]);
    }

    #[test]
    fn test_sort_descending_puts_latest_insert_first_on_ties() {
        let mut records = vec![
            json!({"id": "old", "created_at": "2024-01-01T00:00:00Z"}),
            json!({"id": "tie1", "created_at": "2024-01-02T00:00:00Z"}),
            json!({"id": "tie2", "created_at": "2024-01-02T00:00:00Z"}),
        ];
        sort_records(&mut records, Some(OrderBy::desc("created_at")));
        let ids: Vec<_> = records.iter().map(|r| r["id"].as_str().unwrap()).collect();
        assert_eq!(ids, vec!["tie2", "tie1", "old"]);
    }

    #[test]
    fn test_timestamps_compare_chronologically() {
        let mut records = vec![
            json!({"id": "later", "created_at": "2024-01-01T00:00:00.5Z"}),
            json!({"id": "earlier", "created_at": "2024-01-01T00:00:00Z"}),
        ];
        sort_records(&mut records, Some(OrderBy::asc("created_at")));
        assert_eq!(records[0]["id"], "earlier");
    }
}
