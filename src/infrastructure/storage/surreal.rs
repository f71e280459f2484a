//! SurrealDB content store
//!
//! Connects through the `any` engine, so the same code serves a remote server
//! (`ws://`, `http://`), an embedded RocksDB directory (`rocksdb://`) and the
//! in-memory engine used by tests (`mem://`).
//!
//! Rows are `{uid, key, seq, body}` where `body` is the record's JSON text and
//! `seq` preserves insertion order.

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use surrealdb::engine::any::{connect, Any};
use surrealdb::opt::auth::Root;
use surrealdb::Surreal;

use super::migrations::run_migrations;
use super::{field_str, require_str, sort_records, ContentStore, OrderBy, StoreError, StoreResult};
use crate::domain::models::CollectionKind;

/// Stored row shape shared by every content table
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredRow {
    uid: String,
    key: Option<String>,
    seq: i64,
    body: String,
}

impl StoredRow {
    fn from_record(record: &Value, seq: i64) -> StoreResult<Self> {
        Ok(Self {
            uid: require_str(record, "id")?,
            key: field_str(record, "key").map(str::to_string),
            seq,
            body: serde_json::to_string(record)?,
        })
    }

    fn into_record(self) -> StoreResult<Value> {
        Ok(serde_json::from_str(&self.body)?)
    }
}

/// Username/password for a remote root sign-in
#[derive(Debug, Clone)]
pub struct SurrealCredentials {
    pub username: String,
    pub password: String,
}

pub struct SurrealStore {
    db: Surreal<Any>,
    next_seq: AtomicI64,
}

fn query_err(context: &str, e: surrealdb::Error) -> StoreError {
    StoreError::Query(format!("{}: {}", context, e))
}

/// Row column an upsert matches on
fn conflict_column(conflict_key: &str) -> StoreResult<&'static str> {
    match conflict_key {
        "id" => Ok("uid"),
        "key" => Ok("key"),
        other => Err(StoreError::Query(format!("unsupported conflict key `{}`", other))),
    }
}

impl SurrealStore {
    /// Connect, sign in when credentials are given, select ns/db and migrate
    pub async fn connect(
        endpoint: &str,
        namespace: &str,
        database: &str,
        credentials: Option<&SurrealCredentials>,
    ) -> StoreResult<Self> {
        tracing::info!("Connecting to SurrealDB at {}", endpoint);

        let db = connect(endpoint)
            .await
            .map_err(|e| StoreError::Unavailable(format!("Failed to connect to SurrealDB: {}", e)))?;

        if let Some(credentials) = credentials {
            db.signin(Root {
                username: &credentials.username,
                password: &credentials.password,
            })
            .await
            .map_err(|e| StoreError::Unavailable(format!("Failed to sign in: {}", e)))?;
        }

        db.use_ns(namespace)
            .use_db(database)
            .await
            .map_err(|e| StoreError::Unavailable(format!("Failed to select namespace/database: {}", e)))?;

        run_migrations(&db).await?;

        tracing::info!("SurrealDB content store ready");

        Ok(Self {
            db,
            next_seq: AtomicI64::new(Utc::now().timestamp_micros()),
        })
    }

    /// Fresh in-memory database
    pub async fn in_memory() -> StoreResult<Self> {
        Self::connect("mem://", "naya", "cms", None).await
    }

    fn take_seq(&self, count: i64) -> i64 {
        self.next_seq.fetch_add(count.max(1), Ordering::SeqCst)
    }

    /// Overwrite the row matching `column = conflict`. Existing rows keep their
    /// seq so insertion order survives updates. Returns whether a row matched.
    async fn update_row(
        &self,
        collection: CollectionKind,
        column: &str,
        conflict: &str,
        row: &StoredRow,
    ) -> StoreResult<bool> {
        let table = collection.table_name();
        let updated: Vec<String> = self
            .db
            .query(format!(
                "UPDATE {table} SET uid = $uid, key = $key, body = $body WHERE {column} = $conflict RETURN VALUE uid"
            ))
            .bind(("uid", row.uid.clone()))
            .bind(("key", row.key.clone()))
            .bind(("body", row.body.clone()))
            .bind(("conflict", conflict.to_string()))
            .await
            .map_err(|e| query_err(&format!("Failed to upsert {} record", table), e))?
            .take(0)
            .map_err(|e| query_err(&format!("Failed to get {} upsert result", table), e))?;
        Ok(!updated.is_empty())
    }

    async fn create_row(&self, collection: CollectionKind, row: StoredRow) -> StoreResult<()> {
        let table = collection.table_name();
        self.db
            .query(format!("CREATE {table} CONTENT $row RETURN NONE"))
            .bind(("row", row))
            .await
            .and_then(|response| response.check())
            .map_err(|e| query_err(&format!("Failed to create {} record", table), e))?;
        Ok(())
    }
}

#[async_trait]
impl ContentStore for SurrealStore {
    fn backend_name(&self) -> &'static str {
        "surrealdb"
    }

    async fn select_all(&self, collection: CollectionKind, order: Option<OrderBy>) -> StoreResult<Vec<Value>> {
        let table = collection.table_name();
        let rows: Vec<StoredRow> = self
            .db
            .query(format!("SELECT uid, key, seq, body FROM {table} ORDER BY seq ASC"))
            .await
            .map_err(|e| query_err(&format!("Failed to query {}", table), e))?
            .take(0)
            .map_err(|e| query_err(&format!("Failed to read {} rows", table), e))?;

        let mut records = rows
            .into_iter()
            .map(StoredRow::into_record)
            .collect::<StoreResult<Vec<_>>>()?;
        sort_records(&mut records, order);
        Ok(records)
    }

    async fn upsert(&self, collection: CollectionKind, conflict_key: &str, record: Value) -> StoreResult<()> {
        let column = conflict_column(conflict_key)?;
        let conflict_value = require_str(&record, conflict_key)?;
        let row = StoredRow::from_record(&record, self.take_seq(1))?;

        if self.update_row(collection, column, &conflict_value, &row).await? {
            return Ok(());
        }

        match self.create_row(collection, row.clone()).await {
            Ok(()) => Ok(()),
            // A concurrent writer created the row first; the unique index
            // rejected ours, so apply this write as an update instead
            Err(create_err) => {
                if self.update_row(collection, column, &conflict_value, &row).await? {
                    Ok(())
                } else {
                    Err(create_err)
                }
            }
        }
    }

    async fn insert(&self, collection: CollectionKind, record: Value) -> StoreResult<()> {
        let row = StoredRow::from_record(&record, self.take_seq(1))?;
        self.create_row(collection, row).await
    }

    async fn delete(&self, collection: CollectionKind, id: &str) -> StoreResult<()> {
        let table = collection.table_name();
        self.db
            .query(format!("DELETE {table} WHERE uid = $uid"))
            .bind(("uid", id.to_string()))
            .await
            .and_then(|response| response.check())
            .map_err(|e| query_err(&format!("Failed to delete {} record", table), e))?;
        Ok(())
    }

    async fn replace_all(&self, collection: CollectionKind, records: Vec<Value>) -> StoreResult<()> {
        let table = collection.table_name();
        let base = self.take_seq(records.len() as i64);
        let rows = records
            .iter()
            .enumerate()
            .map(|(index, record)| StoredRow::from_record(record, base + index as i64))
            .collect::<StoreResult<Vec<_>>>()?;

        let sql = if rows.is_empty() {
            format!("BEGIN TRANSACTION; DELETE {table}; COMMIT TRANSACTION;")
        } else {
            format!("BEGIN TRANSACTION; DELETE {table}; INSERT INTO {table} $rows; COMMIT TRANSACTION;")
        };

        self.db
            .query(sql)
            .bind(("rows", rows))
            .await
            .and_then(|response| response.check())
            .map_err(|e| query_err(&format!("Failed to replace {} records", table), e))?;
        Ok(())
    }
}
