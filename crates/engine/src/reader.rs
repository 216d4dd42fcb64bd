//! Get-by-id protocol
//!
//! Retrieval is the write protocol run backwards: the relational row is
//! looked up first, and only a present row justifies the blob fetch. A
//! missing row is a plain [`Error::NotFound`] and the object store is never
//! consulted for it. A present row whose blob is gone is
//! [`Error::Inconsistent`] — that combination cannot arise from the write
//! protocol and signals tampering or an upstream bug, so it is never
//! reported as an empty payload.

use std::sync::Arc;

use runvault_core::{parse_locator, Error, MetadataStore, ObjectStore, Result, RunId};
use tracing::{debug, warn};

/// Orchestrator for the two-step retrieval.
pub struct RunReader {
    objects: Arc<dyn ObjectStore>,
    metadata: Arc<dyn MetadataStore>,
}

impl RunReader {
    /// Create a reader over the given stores
    pub fn new(objects: Arc<dyn ObjectStore>, metadata: Arc<dyn MetadataStore>) -> Self {
        Self { objects, metadata }
    }

    /// Fetch the raw payload bytes for a run.
    ///
    /// The bytes are returned exactly as written; decoding is the caller's
    /// responsibility.
    pub async fn get(&self, id: RunId) -> Result<Vec<u8>> {
        let row = match self.metadata.fetch(id).await? {
            Some(row) => row,
            None => {
                debug!(target: "runvault::read", run = %id, "No row for run");
                return Err(Error::NotFound { run: id });
            }
        };

        // The row's recorded locator, not the writer's current config,
        // says where the blob lives.
        let Some((bucket, key)) = parse_locator(&row.locator) else {
            warn!(
                target: "runvault::read",
                run = %id,
                locator = %row.locator,
                "Row carries unparseable locator"
            );
            return Err(Error::Inconsistent {
                run: id,
                locator: row.locator.clone(),
            });
        };

        match self.objects.get(bucket, key).await? {
            Some(bytes) => Ok(bytes),
            None => {
                warn!(
                    target: "runvault::read",
                    run = %id,
                    locator = %row.locator,
                    "Row present but blob missing"
                );
                Err(Error::Inconsistent {
                    run: id,
                    locator: row.locator.clone(),
                })
            }
        }
    }
}
