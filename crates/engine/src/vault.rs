//! High-level facade pairing a writer and reader
//!
//! [`RunVault`] wires a [`RunWriter`] and [`RunReader`] over one shared pair
//! of stores. `in_memory()` gives an ephemeral vault for tests and
//! embedding; a service layer binds real adapters through [`RunVault::new`].
//!
//! # Example
//!
//! ```
//! use runvault_engine::RunVault;
//! use runvault_core::{Run, TraceId};
//!
//! # async fn demo() -> runvault_core::Result<()> {
//! let vault = RunVault::in_memory();
//!
//! let ids = vault
//!     .create(vec![Run::new(TraceId::new(), "plan-step")])
//!     .await?;
//! let payload = vault.get(ids[0]).await?;
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use runvault_core::{MetadataStore, ObjectStore, Result, Run, RunId};
use runvault_store::{MemoryMetadataStore, MemoryObjectStore};

use crate::config::StoreConfig;
use crate::reader::RunReader;
use crate::writer::RunWriter;

/// Facade over the dual-store persistence protocol.
pub struct RunVault {
    writer: RunWriter,
    reader: RunReader,
}

impl RunVault {
    /// Create a vault over caller-supplied stores.
    ///
    /// Validates the config once, before any store call can happen.
    pub fn new(
        objects: Arc<dyn ObjectStore>,
        metadata: Arc<dyn MetadataStore>,
        config: StoreConfig,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            writer: RunWriter::new(objects.clone(), metadata.clone(), config),
            reader: RunReader::new(objects, metadata),
        })
    }

    /// Create an ephemeral vault over in-memory stores with the default
    /// bucket. Nothing survives drop.
    pub fn in_memory() -> Self {
        let objects: Arc<dyn ObjectStore> = Arc::new(MemoryObjectStore::new());
        let metadata: Arc<dyn MetadataStore> = Arc::new(MemoryMetadataStore::new());
        Self {
            writer: RunWriter::new(objects.clone(), metadata.clone(), StoreConfig::default()),
            reader: RunReader::new(objects, metadata),
        }
    }

    /// Persist a batch of runs; ids come back in input order.
    pub async fn create(&self, batch: Vec<Run>) -> Result<Vec<RunId>> {
        self.writer.create(batch).await
    }

    /// Fetch the raw payload bytes for a run.
    pub async fn get(&self, id: RunId) -> Result<Vec<u8>> {
        self.reader.get(id).await
    }

    /// The underlying writer
    pub fn writer(&self) -> &RunWriter {
        &self.writer
    }

    /// The underlying reader
    pub fn reader(&self) -> &RunReader {
        &self.reader
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use runvault_core::{Error, TraceId};

    #[tokio::test]
    async fn test_in_memory_roundtrip() {
        let vault = RunVault::in_memory();
        let ids = vault
            .create(vec![Run::new(TraceId::new(), "step")])
            .await
            .unwrap();

        let bytes = vault.get(ids[0]).await.unwrap();
        assert!(!bytes.is_empty());
    }

    #[tokio::test]
    async fn test_new_rejects_invalid_config() {
        let objects: Arc<dyn ObjectStore> = Arc::new(MemoryObjectStore::new());
        let metadata: Arc<dyn MetadataStore> = Arc::new(MemoryMetadataStore::new());

        let result = RunVault::new(objects, metadata, StoreConfig::new(""));
        assert!(matches!(result, Err(Error::InvalidArgument { .. })));
    }

    #[tokio::test]
    async fn test_new_uses_configured_bucket() {
        let objects = Arc::new(MemoryObjectStore::new());
        let metadata: Arc<dyn MetadataStore> = Arc::new(MemoryMetadataStore::new());
        let vault = RunVault::new(
            objects.clone(),
            metadata,
            StoreConfig::new("trace-archive"),
        )
        .unwrap();

        let ids = vault
            .create(vec![Run::new(TraceId::new(), "step")])
            .await
            .unwrap();
        assert!(objects.contains("trace-archive", &runvault_core::object_key(ids[0])));
    }
}
