//! Store contracts for the dual-store protocol
//!
//! The writer and reader consume the two stores only through these traits,
//! which keeps the protocol testable and lets the surrounding layer bind
//! real backends (S3, Postgres) without touching the core.
//!
//! Thread safety: implementations must be `Send + Sync`; the engine holds
//! them as `Arc<dyn ...>` and issues concurrent calls.

use crate::error::Result;
use crate::types::{RunId, RunRow};
use async_trait::async_trait;

/// Durable blob storage keyed by (bucket, key).
///
/// The adapter has no knowledge of run semantics: payloads are opaque bytes
/// and errors are opaque transport/store failures surfaced as
/// [`Error::StoreUnavailable`](crate::error::Error::StoreUnavailable).
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Durably write a blob under `bucket`/`key`.
    ///
    /// The bucket is pre-provisioned by external startup logic, not here.
    async fn put(&self, bucket: &str, key: &str, payload: Vec<u8>, content_type: &str)
        -> Result<()>;

    /// Fetch a blob. `Ok(None)` is the store-level not-found signal;
    /// transport failures are `Err`.
    async fn get(&self, bucket: &str, key: &str) -> Result<Option<Vec<u8>>>;
}

/// Relational storage for run metadata rows.
///
/// The adapter has no knowledge of payload bytes; it holds the indexable
/// fields plus the locator pointer.
#[async_trait]
pub trait MetadataStore: Send + Sync {
    /// Insert a batch of rows as a single atomic statement: either all rows
    /// become visible together or none do.
    async fn insert_batch(&self, rows: Vec<RunRow>) -> Result<()>;

    /// Point-query one row by run id. `Ok(None)` means no row exists.
    async fn fetch(&self, id: RunId) -> Result<Option<RunRow>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Both traits must stay object-safe; the engine holds Arc<dyn ...>.
    fn _accepts_dyn_object_store(_store: std::sync::Arc<dyn ObjectStore>) {}
    fn _accepts_dyn_metadata_store(_store: std::sync::Arc<dyn MetadataStore>) {}
}
