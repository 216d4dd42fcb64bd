//! Fault-injection and call-recording store wrappers
//!
//! Test doubles for the protocol suites: failing stores simulate an
//! unavailable backend (or one specific blob write going bad mid-batch),
//! recording stores count adapter calls so tests can assert that a code
//! path issued zero calls.

use async_trait::async_trait;
use parking_lot::RwLock;
use runvault_core::{Error, MetadataStore, ObjectStore, Result, RunId, RunRow, StoreKind};
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::memory::MemoryObjectStore;

/// Object store that fails selected `put` calls.
///
/// With no configured keys every put fails; otherwise only puts for the
/// configured keys fail. Successful puts and all gets are forwarded to the
/// wrapped memory store, so a test can still observe which blobs landed
/// before the injected failure (the orphans).
#[derive(Debug, Default)]
pub struct FailingObjectStore {
    inner: MemoryObjectStore,
    fail_keys: RwLock<Option<HashSet<String>>>,
}

impl FailingObjectStore {
    /// Fail every put
    pub fn fail_all() -> Self {
        Self {
            inner: MemoryObjectStore::new(),
            fail_keys: RwLock::new(None),
        }
    }

    /// Fail only puts for the given object keys
    pub fn fail_keys(keys: impl IntoIterator<Item = String>) -> Self {
        Self {
            inner: MemoryObjectStore::new(),
            fail_keys: RwLock::new(Some(keys.into_iter().collect())),
        }
    }

    /// The wrapped store holding the puts that succeeded
    pub fn inner(&self) -> &MemoryObjectStore {
        &self.inner
    }

    fn should_fail(&self, key: &str) -> bool {
        match &*self.fail_keys.read() {
            None => true,
            Some(keys) => keys.contains(key),
        }
    }
}

#[async_trait]
impl ObjectStore for FailingObjectStore {
    async fn put(
        &self,
        bucket: &str,
        key: &str,
        payload: Vec<u8>,
        content_type: &str,
    ) -> Result<()> {
        if self.should_fail(key) {
            return Err(Error::StoreUnavailable {
                store: StoreKind::Object,
                reason: format!("injected put failure for {}", key),
            });
        }
        self.inner.put(bucket, key, payload, content_type).await
    }

    async fn get(&self, bucket: &str, key: &str) -> Result<Option<Vec<u8>>> {
        self.inner.get(bucket, key).await
    }
}

/// Metadata store whose `insert_batch` always fails.
///
/// Simulates the bulk insert being interrupted: the statement is atomic, so
/// a failure leaves no row behind and `fetch` keeps answering from the
/// pre-failure state.
#[derive(Debug, Default)]
pub struct FailingMetadataStore {
    inner: crate::memory::MemoryMetadataStore,
}

impl FailingMetadataStore {
    /// Create a store that rejects every batch
    pub fn new() -> Self {
        Self::default()
    }

    /// The wrapped store (never receives a row from `insert_batch`)
    pub fn inner(&self) -> &crate::memory::MemoryMetadataStore {
        &self.inner
    }
}

#[async_trait]
impl MetadataStore for FailingMetadataStore {
    async fn insert_batch(&self, _rows: Vec<RunRow>) -> Result<()> {
        Err(Error::StoreUnavailable {
            store: StoreKind::Metadata,
            reason: "injected bulk insert failure".to_string(),
        })
    }

    async fn fetch(&self, id: RunId) -> Result<Option<RunRow>> {
        self.inner.fetch(id).await
    }
}

/// Object store wrapper counting adapter calls.
#[derive(Debug)]
pub struct RecordingObjectStore<S> {
    inner: S,
    puts: AtomicUsize,
    gets: AtomicUsize,
}

impl<S> RecordingObjectStore<S> {
    /// Wrap a store
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            puts: AtomicUsize::new(0),
            gets: AtomicUsize::new(0),
        }
    }

    /// Number of `put` calls issued so far
    pub fn put_count(&self) -> usize {
        self.puts.load(Ordering::SeqCst)
    }

    /// Number of `get` calls issued so far
    pub fn get_count(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
    }

    /// The wrapped store
    pub fn inner(&self) -> &S {
        &self.inner
    }
}

#[async_trait]
impl<S: ObjectStore> ObjectStore for RecordingObjectStore<S> {
    async fn put(
        &self,
        bucket: &str,
        key: &str,
        payload: Vec<u8>,
        content_type: &str,
    ) -> Result<()> {
        self.puts.fetch_add(1, Ordering::SeqCst);
        self.inner.put(bucket, key, payload, content_type).await
    }

    async fn get(&self, bucket: &str, key: &str) -> Result<Option<Vec<u8>>> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        self.inner.get(bucket, key).await
    }
}

/// Metadata store wrapper counting adapter calls.
#[derive(Debug)]
pub struct RecordingMetadataStore<S> {
    inner: S,
    inserts: AtomicUsize,
    fetches: AtomicUsize,
}

impl<S> RecordingMetadataStore<S> {
    /// Wrap a store
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            inserts: AtomicUsize::new(0),
            fetches: AtomicUsize::new(0),
        }
    }

    /// Number of `insert_batch` calls issued so far
    pub fn insert_count(&self) -> usize {
        self.inserts.load(Ordering::SeqCst)
    }

    /// Number of `fetch` calls issued so far
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    /// The wrapped store
    pub fn inner(&self) -> &S {
        &self.inner
    }
}

#[async_trait]
impl<S: MetadataStore> MetadataStore for RecordingMetadataStore<S> {
    async fn insert_batch(&self, rows: Vec<RunRow>) -> Result<()> {
        self.inserts.fetch_add(1, Ordering::SeqCst);
        self.inner.insert_batch(rows).await
    }

    async fn fetch(&self, id: RunId) -> Result<Option<RunRow>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.inner.fetch(id).await
    }
}
