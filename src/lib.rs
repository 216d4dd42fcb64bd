//! RunVault — dual-store persistence core for tracing run records
//!
//! A run record lives in two places: a relational row of indexable fields
//! (id, trace, name, payload locator) and the full JSON payload blob in an
//! object store. RunVault owns the protocol that keeps the two honest:
//! blobs are written first behind a join barrier, rows flip visibility in a
//! single atomic bulk insert, and reads distinguish "never existed" from
//! "row without blob".
//!
//! # Quick Start
//!
//! ```
//! use runvault::{Run, RunVault, TraceId};
//!
//! # async fn demo() -> runvault::Result<()> {
//! // Ephemeral vault over in-memory stores
//! let vault = RunVault::in_memory();
//!
//! // Batch create; ids come back in input order
//! let trace = TraceId::new();
//! let ids = vault
//!     .create(vec![
//!         Run::new(trace, "retrieve-context"),
//!         Run::new(trace, "generate-answer"),
//!     ])
//!     .await?;
//!
//! // Raw payload bytes; decoding is the caller's choice
//! let payload = vault.get(ids[0]).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! The engine consumes the two stores only through the [`ObjectStore`] and
//! [`MetadataStore`] traits; the in-memory adapters back tests and embedded
//! use, and a surrounding service layer binds real backends.

// Re-export the public API from the member crates
pub use runvault_core::{
    locator, object_key, parse_locator, Error, JsonMap, MetadataStore, ObjectStore, Result, Run,
    RunId, RunRow, StoreKind, TraceId,
};
pub use runvault_engine::{
    RunCodec, RunReader, RunVault, RunWriter, StoreConfig, CONTENT_TYPE, DEFAULT_BUCKET,
};
pub use runvault_store::{MemoryMetadataStore, MemoryObjectStore};
