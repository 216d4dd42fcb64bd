//! Batch-create protocol
//!
//! A batch is persisted in two phases with a join barrier between them:
//!
//! 1. Every run's blob is encoded and put concurrently; the writer waits
//!    for all puts (or the first failure) before touching the relational
//!    store.
//! 2. Once every blob is confirmed durable, the rows for the whole batch go
//!    in as one atomic bulk insert.
//!
//! The ordering is the correctness argument: a visible row always points at
//! a blob that already exists. The cost is paid in the failure direction —
//! a put failure aborts the batch and leaves already-written blobs as
//! orphans, and a failed bulk insert orphans every blob in the batch.
//! Orphans are tolerated and never cleaned up here.

use std::sync::Arc;

use futures::future::try_join_all;
use runvault_core::{locator, Error, MetadataStore, ObjectStore, Result, Run, RunId, RunRow};
use tracing::{debug, warn};

use crate::codec::{RunCodec, CONTENT_TYPE};
use crate::config::StoreConfig;

/// Orchestrator for the two-phase batch create.
pub struct RunWriter {
    objects: Arc<dyn ObjectStore>,
    metadata: Arc<dyn MetadataStore>,
    codec: RunCodec,
    config: StoreConfig,
}

impl RunWriter {
    /// Create a writer over the given stores.
    ///
    /// The config is assumed validated (see [`StoreConfig::validate`]);
    /// the vault constructor checks it once at the boundary.
    pub fn new(
        objects: Arc<dyn ObjectStore>,
        metadata: Arc<dyn MetadataStore>,
        config: StoreConfig,
    ) -> Self {
        Self {
            objects,
            metadata,
            codec: RunCodec,
            config,
        }
    }

    /// The bucket this writer places blobs in
    pub fn bucket(&self) -> &str {
        &self.config.bucket
    }

    /// Persist a batch of runs and return their ids in input order.
    ///
    /// Runs arriving without an id are assigned one. The batch is rejected
    /// before any store call if it is empty or contains a run with an empty
    /// name.
    ///
    /// Failure semantics:
    /// - any blob put failing aborts the batch with
    ///   [`Error::PartialBatchFailure`]; the bulk insert is never attempted
    ///   and blobs already written stay behind as orphans
    /// - a bulk insert failure surfaces the store error unchanged; every
    ///   blob in the batch is then an orphan
    ///
    /// Dropping the returned future before the bulk insert cancels the
    /// remaining puts; a cancelled batch can leave orphaned blobs but never
    /// a row pointing at an unconfirmed blob.
    pub async fn create(&self, batch: Vec<Run>) -> Result<Vec<RunId>> {
        if batch.is_empty() {
            return Err(Error::InvalidArgument {
                reason: "batch must contain at least one run".to_string(),
            });
        }
        for run in &batch {
            run.validate()?;
        }

        let runs: Vec<(RunId, Run)> = batch
            .into_iter()
            .map(|run| {
                let id = run.id.unwrap_or_else(RunId::new);
                (id, run)
            })
            .collect();

        debug!(
            target: "runvault::write",
            batch = runs.len(),
            bucket = %self.config.bucket,
            "Writing run blobs"
        );

        // Phase one: fan out all blob puts and join on the barrier. The
        // first failure aborts the whole batch before any insert.
        let puts = runs.iter().map(|(id, run)| {
            let id = *id;
            async move {
                let (key, payload) = self.codec.encode(id, run)?;
                self.objects
                    .put(&self.config.bucket, &key, payload, CONTENT_TYPE)
                    .await
                    .map_err(|e| Error::PartialBatchFailure {
                        run: id,
                        source: Box::new(e),
                    })
            }
        });
        if let Err(e) = try_join_all(puts).await {
            warn!(
                target: "runvault::write",
                error = %e,
                "Blob write failed; batch aborted before insert"
            );
            return Err(e);
        }

        // Phase two: every blob is confirmed durable, flip visibility with
        // one atomic bulk insert.
        let rows: Vec<RunRow> = runs
            .iter()
            .map(|(id, run)| {
                RunRow::new(
                    *id,
                    run.trace_id,
                    run.name.clone(),
                    locator(&self.config.bucket, *id),
                )
            })
            .collect();
        if let Err(e) = self.metadata.insert_batch(rows).await {
            warn!(
                target: "runvault::write",
                batch = runs.len(),
                error = %e,
                "Bulk insert failed; blobs already written remain orphaned"
            );
            return Err(e);
        }

        debug!(target: "runvault::write", batch = runs.len(), "Batch committed");
        Ok(runs.into_iter().map(|(id, _)| id).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use runvault_core::{object_key, TraceId};
    use runvault_store::{MemoryMetadataStore, MemoryObjectStore};

    fn make_test_writer() -> (Arc<MemoryObjectStore>, Arc<MemoryMetadataStore>, RunWriter) {
        let objects = Arc::new(MemoryObjectStore::new());
        let metadata = Arc::new(MemoryMetadataStore::new());
        let writer = RunWriter::new(
            objects.clone(),
            metadata.clone(),
            StoreConfig::default(),
        );
        (objects, metadata, writer)
    }

    #[tokio::test]
    async fn test_create_writes_blob_and_row() {
        let (objects, metadata, writer) = make_test_writer();
        let run = Run::new(TraceId::new(), "ingest");

        let ids = writer.create(vec![run]).await.unwrap();
        assert_eq!(ids.len(), 1);

        let key = object_key(ids[0]);
        assert!(objects.contains("runs", &key));
        assert_eq!(
            objects.content_type("runs", &key),
            Some(CONTENT_TYPE.to_string())
        );
        assert!(metadata.contains(ids[0]));
    }

    #[tokio::test]
    async fn test_create_preserves_caller_assigned_id() {
        let (_, _, writer) = make_test_writer();
        let id = RunId::new();
        let run = Run::with_id(id, TraceId::new(), "ingest");

        let ids = writer.create(vec![run]).await.unwrap();
        assert_eq!(ids, vec![id]);
    }

    #[tokio::test]
    async fn test_create_rejects_empty_batch() {
        let (_, _, writer) = make_test_writer();
        let result = writer.create(vec![]).await;
        assert!(matches!(result, Err(Error::InvalidArgument { .. })));
    }

    #[tokio::test]
    async fn test_create_rejects_empty_name_before_any_write() {
        let (objects, metadata, writer) = make_test_writer();
        let good = Run::new(TraceId::new(), "ok");
        let bad = Run::new(TraceId::new(), "");

        let result = writer.create(vec![good, bad]).await;

        assert!(matches!(result, Err(Error::InvalidArgument { .. })));
        assert!(objects.is_empty());
        assert!(metadata.is_empty());
    }

    #[tokio::test]
    async fn test_row_locator_points_at_blob() {
        let (_, metadata, writer) = make_test_writer();
        let run = Run::new(TraceId::new(), "ingest");

        let ids = writer.create(vec![run]).await.unwrap();

        let row = metadata.fetch(ids[0]).await.unwrap().unwrap();
        assert_eq!(row.locator, locator("runs", ids[0]));
        assert_eq!(row.name, "ingest");
    }
}
