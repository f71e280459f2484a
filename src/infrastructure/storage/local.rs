//! Local key-value store
//!
//! One JSON array per collection, kept in memory and optionally written through
//! to `<dir>/<storage_key>.json`. Collections with no entry yet are seeded on
//! open; a collection that exists but is empty stays empty.
//!
//! Writers are serialized per store: the in-memory change, the snapshot and
//! the file write/rename all happen under one `tokio::sync::Mutex`, so the
//! file on disk always matches some in-memory state.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;
use tokio::sync::Mutex;
use uuid::Uuid;

use super::{field_str, require_str, sort_records, ContentStore, OrderBy, StoreError, StoreResult};
use crate::domain::models::CollectionKind;

pub struct LocalStore {
    collections: DashMap<CollectionKind, Vec<Value>>,
    dir: Option<PathBuf>,
    write_lock: Mutex<()>,
}

impl LocalStore {
    /// Memory-only store seeded by `seed`
    pub fn in_memory(seed: impl Fn(CollectionKind) -> Vec<Value>) -> Self {
        let collections = DashMap::new();
        for collection in CollectionKind::ALL {
            collections.insert(collection, seed(collection));
        }
        Self {
            collections,
            dir: None,
            write_lock: Mutex::new(()),
        }
    }

    /// Open (or create) a file-backed store under `dir`
    pub async fn open(
        dir: impl Into<PathBuf>,
        seed: impl Fn(CollectionKind) -> Vec<Value>,
    ) -> StoreResult<Self> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir).await?;

        let store = Self {
            collections: DashMap::new(),
            dir: Some(dir.clone()),
            write_lock: Mutex::new(()),
        };

        for collection in CollectionKind::ALL {
            let path = collection_path(&dir, collection);
            match tokio::fs::read(&path).await {
                Ok(bytes) => {
                    let records: Vec<Value> = serde_json::from_slice(&bytes)?;
                    store.collections.insert(collection, records);
                }
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    let records = seed(collection);
                    store.persist(collection, &records).await?;
                    store.collections.insert(collection, records);
                }
                Err(e) => return Err(StoreError::Io(e)),
            }
        }

        tracing::info!("Local content store opened at {:?}", dir);
        Ok(store)
    }

    pub fn dir(&self) -> Option<&Path> {
        self.dir.as_deref()
    }

    /// Apply `change` and write through, holding the store's write lock for
    /// both. The DashMap guard is released before any await.
    async fn mutate<F>(&self, collection: CollectionKind, change: F) -> StoreResult<()>
    where
        F: FnOnce(&mut Vec<Value>) -> StoreResult<()>,
    {
        let _writer = self.write_lock.lock().await;
        let records = {
            let mut entry = self.collections.entry(collection).or_default();
            change(entry.value_mut())?;
            entry.value().clone()
        };
        self.persist(collection, &records).await
    }

    /// Caller must hold `write_lock` (or be the only writer, as in `open`)
    async fn persist(&self, collection: CollectionKind, records: &[Value]) -> StoreResult<()> {
        let Some(dir) = &self.dir else {
            return Ok(());
        };

        let bytes = serde_json::to_vec_pretty(records)?;
        let path = collection_path(dir, collection);
        let tmp = dir.join(format!(".{}.{}.tmp", collection.storage_key(), Uuid::new_v4()));
        tokio::fs::write(&tmp, bytes).await?;
        if let Err(e) = tokio::fs::rename(&tmp, &path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(StoreError::Io(e));
        }
        Ok(())
    }
}

fn collection_path(dir: &Path, collection: CollectionKind) -> PathBuf {
    dir.join(format!("{}.json", collection.storage_key()))
}

#[async_trait]
impl ContentStore for LocalStore {
    fn backend_name(&self) -> &'static str {
        if self.dir.is_some() { "local-file" } else { "local-memory" }
    }

    async fn select_all(&self, collection: CollectionKind, order: Option<OrderBy>) -> StoreResult<Vec<Value>> {
        let mut records = self
            .collections
            .get(&collection)
            .map(|entry| entry.value().clone())
            .unwrap_or_default();
        sort_records(&mut records, order);
        Ok(records)
    }

    async fn upsert(&self, collection: CollectionKind, conflict_key: &str, record: Value) -> StoreResult<()> {
        let conflict_value = require_str(&record, conflict_key)?;
        self.mutate(collection, move |records| {
            match records
                .iter()
                .position(|r| field_str(r, conflict_key) == Some(conflict_value.as_str()))
            {
                Some(index) => records[index] = record,
                None => records.push(record),
            }
            Ok(())
        })
        .await
    }

    async fn insert(&self, collection: CollectionKind, record: Value) -> StoreResult<()> {
        require_str(&record, "id")?;
        self.mutate(collection, move |records| {
            records.push(record);
            Ok(())
        })
        .await
    }

    async fn delete(&self, collection: CollectionKind, id: &str) -> StoreResult<()> {
        self.mutate(collection, |records| {
            records.retain(|r| field_str(r, "id") != Some(id));
            Ok(())
        })
        .await
    }

    async fn replace_all(&self, collection: CollectionKind, records: Vec<Value>) -> StoreResult<()> {
        for record in &records {
            require_str(record, "id")?;
        }
        self.mutate(collection, move |existing| {
            *existing = records;
            Ok(())
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn seed(collection: CollectionKind) -> Vec<Value> {
        match collection {
            CollectionKind::Services => vec![json!({"id": "s1", "display_order": 1})],
            _ => Vec::new(),
        }
    }

    fn temp_dir() -> PathBuf {
        std::env::temp_dir().join(format!("naya-local-store-{}", uuid::Uuid::new_v4()))
    }

    #[tokio::test]
    async fn test_in_memory_is_seeded() {
        let store = LocalStore::in_memory(seed);
        let services = store.select_all(CollectionKind::Services, None).await.unwrap();
        assert_eq!(services.len(), 1);
        assert_eq!(store.backend_name(), "local-memory");
    }

    #[tokio::test]
    async fn test_upsert_by_conflict_key() {
        let store = LocalStore::in_memory(seed);
        store
            .upsert(CollectionKind::Snippets, "key", json!({"id": "1", "key": "hero.title", "value": "A"}))
            .await
            .unwrap();
        store
            .upsert(CollectionKind::Snippets, "key", json!({"id": "1", "key": "hero.title", "value": "B"}))
            .await
            .unwrap();

        let snippets = store.select_all(CollectionKind::Snippets, None).await.unwrap();
        assert_eq!(snippets.len(), 1);
        assert_eq!(snippets[0]["value"], "B");
    }

    #[tokio::test]
    async fn test_upsert_without_conflict_field_fails() {
        let store = LocalStore::in_memory(seed);
        let result = store
            .upsert(CollectionKind::Snippets, "key", json!({"id": "1"}))
            .await;
        assert!(matches!(result, Err(StoreError::MissingField(_))));
    }

    #[tokio::test]
    async fn test_delete_unknown_is_noop() {
        let store = LocalStore::in_memory(seed);
        store.delete(CollectionKind::Services, "missing").await.unwrap();
        assert_eq!(store.select_all(CollectionKind::Services, None).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_file_store_survives_reopen() {
        let dir = temp_dir();
        {
            let store = LocalStore::open(&dir, seed).await.unwrap();
            store.replace_all(CollectionKind::Services, Vec::new()).await.unwrap();
            store
                .insert(CollectionKind::Submissions, json!({"id": "f1", "name": "Ram"}))
                .await
                .unwrap();
        }

        let reopened = LocalStore::open(&dir, seed).await.unwrap();
        // Emptied collections stay empty rather than being re-seeded
        assert!(reopened.select_all(CollectionKind::Services, None).await.unwrap().is_empty());
        let forms = reopened.select_all(CollectionKind::Submissions, None).await.unwrap();
        assert_eq!(forms.len(), 1);
        assert_eq!(reopened.backend_name(), "local-file");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn test_concurrent_inserts_keep_file_consistent() {
        let dir = temp_dir();
        let store = std::sync::Arc::new(LocalStore::open(&dir, seed).await.unwrap());

        let writers = (0..64).map(|i| {
            let store = store.clone();
            tokio::spawn(async move {
                store
                    .insert(CollectionKind::Submissions, json!({"id": format!("f{}", i), "name": "Ram"}))
                    .await
            })
        });
        for result in futures::future::join_all(writers).await {
            result.unwrap().unwrap();
        }
        assert_eq!(store.select_all(CollectionKind::Submissions, None).await.unwrap().len(), 64);

        let reopened = LocalStore::open(&dir, seed).await.unwrap();
        let forms = reopened.select_all(CollectionKind::Submissions, None).await.unwrap();
        assert_eq!(forms.len(), 64);

        let leftovers = std::fs::read_dir(&dir)
            .unwrap()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_name().to_string_lossy().ends_with(".tmp"))
            .count();
        assert_eq!(leftovers, 0);

        let _ = std::fs::remove_dir_all(&dir);
    }
}
