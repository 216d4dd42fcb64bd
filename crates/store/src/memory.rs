//! In-memory store adapters
//!
//! `MemoryObjectStore` and `MemoryMetadataStore` back the ephemeral vault
//! and the whole test suite. Both are cheap to clone-share behind an `Arc`
//! and synchronize only through their own interior locks; the stores are
//! the synchronization point for concurrent reads.

use async_trait::async_trait;
use dashmap::DashMap;
use parking_lot::RwLock;
use runvault_core::{MetadataStore, ObjectStore, Result, RunId, RunRow};
use std::collections::HashMap;

/// One stored blob: payload bytes plus the content type recorded at put time.
#[derive(Debug, Clone)]
struct StoredObject {
    bytes: Vec<u8>,
    content_type: String,
}

/// In-memory object store keyed by (bucket, key).
#[derive(Debug, Default)]
pub struct MemoryObjectStore {
    objects: DashMap<(String, String), StoredObject>,
}

impl MemoryObjectStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a blob exists under `bucket`/`key`
    pub fn contains(&self, bucket: &str, key: &str) -> bool {
        self.objects
            .contains_key(&(bucket.to_string(), key.to_string()))
    }

    /// Delete a blob out-of-band, bypassing the protocol.
    ///
    /// This is the seam an external reconciliation sweep (or a tampering
    /// test) uses; nothing in the write/read path calls it. Returns whether
    /// a blob was removed.
    pub fn remove(&self, bucket: &str, key: &str) -> bool {
        self.objects
            .remove(&(bucket.to_string(), key.to_string()))
            .is_some()
    }

    /// Content type recorded for a blob, if present
    pub fn content_type(&self, bucket: &str, key: &str) -> Option<String> {
        self.objects
            .get(&(bucket.to_string(), key.to_string()))
            .map(|o| o.content_type.clone())
    }

    /// Number of stored blobs across all buckets
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the store holds no blobs
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn put(
        &self,
        bucket: &str,
        key: &str,
        payload: Vec<u8>,
        content_type: &str,
    ) -> Result<()> {
        // Last write wins on key collision; globally unique ids make
        // collisions an accepted risk, not a guarded path.
        self.objects.insert(
            (bucket.to_string(), key.to_string()),
            StoredObject {
                bytes: payload,
                content_type: content_type.to_string(),
            },
        );
        Ok(())
    }

    async fn get(&self, bucket: &str, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self
            .objects
            .get(&(bucket.to_string(), key.to_string()))
            .map(|o| o.bytes.clone()))
    }
}

/// In-memory relational store for run rows.
///
/// `insert_batch` applies the whole batch under a single write guard, the
/// in-memory analogue of one atomic bulk statement: a concurrent `fetch`
/// observes either none or all of the batch.
#[derive(Debug, Default)]
pub struct MemoryMetadataStore {
    rows: RwLock<HashMap<RunId, RunRow>>,
}

impl MemoryMetadataStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a row exists for `id`
    pub fn contains(&self, id: RunId) -> bool {
        self.rows.read().contains_key(&id)
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.read().len()
    }

    /// Whether the store holds no rows
    pub fn is_empty(&self) -> bool {
        self.rows.read().is_empty()
    }
}

#[async_trait]
impl MetadataStore for MemoryMetadataStore {
    async fn insert_batch(&self, rows: Vec<RunRow>) -> Result<()> {
        let mut guard = self.rows.write();
        for row in rows {
            guard.insert(row.id, row);
        }
        Ok(())
    }

    async fn fetch(&self, id: RunId) -> Result<Option<RunRow>> {
        Ok(self.rows.read().get(&id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use runvault_core::{locator, object_key, TraceId};

    fn make_test_row(bucket: &str) -> RunRow {
        let id = RunId::new();
        RunRow::new(id, TraceId::new(), "test-run", locator(bucket, id))
    }

    #[tokio::test]
    async fn test_object_store_put_get_roundtrip() {
        let store = MemoryObjectStore::new();
        store
            .put("runs", "runs/a.json", b"{\"x\":1}".to_vec(), "application/json")
            .await
            .unwrap();

        let bytes = store.get("runs", "runs/a.json").await.unwrap();
        assert_eq!(bytes, Some(b"{\"x\":1}".to_vec()));
        assert_eq!(
            store.content_type("runs", "runs/a.json"),
            Some("application/json".to_string())
        );
    }

    #[tokio::test]
    async fn test_object_store_get_missing_is_none() {
        let store = MemoryObjectStore::new();
        assert_eq!(store.get("runs", "runs/missing.json").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_object_store_buckets_are_isolated() {
        let store = MemoryObjectStore::new();
        store
            .put("a", "runs/x.json", b"aa".to_vec(), "application/json")
            .await
            .unwrap();

        assert!(store.contains("a", "runs/x.json"));
        assert!(!store.contains("b", "runs/x.json"));
        assert_eq!(store.get("b", "runs/x.json").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_object_store_remove_out_of_band() {
        let store = MemoryObjectStore::new();
        let key = object_key(RunId::new());
        store
            .put("runs", &key, b"payload".to_vec(), "application/json")
            .await
            .unwrap();

        assert!(store.remove("runs", &key));
        assert!(!store.remove("runs", &key));
        assert_eq!(store.get("runs", &key).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_object_store_last_write_wins() {
        let store = MemoryObjectStore::new();
        store
            .put("runs", "runs/x.json", b"old".to_vec(), "application/json")
            .await
            .unwrap();
        store
            .put("runs", "runs/x.json", b"new".to_vec(), "application/json")
            .await
            .unwrap();

        assert_eq!(
            store.get("runs", "runs/x.json").await.unwrap(),
            Some(b"new".to_vec())
        );
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_metadata_store_insert_and_fetch() {
        let store = MemoryMetadataStore::new();
        let row = make_test_row("runs");
        let id = row.id;

        store.insert_batch(vec![row.clone()]).await.unwrap();

        let fetched = store.fetch(id).await.unwrap();
        assert_eq!(fetched, Some(row));
    }

    #[tokio::test]
    async fn test_metadata_store_fetch_missing_is_none() {
        let store = MemoryMetadataStore::new();
        assert_eq!(store.fetch(RunId::new()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_metadata_store_batch_inserts_all_rows() {
        let store = MemoryMetadataStore::new();
        let rows: Vec<RunRow> = (0..3).map(|_| make_test_row("runs")).collect();
        let ids: Vec<RunId> = rows.iter().map(|r| r.id).collect();

        store.insert_batch(rows).await.unwrap();

        assert_eq!(store.len(), 3);
        for id in ids {
            assert!(store.contains(id));
        }
    }
}
