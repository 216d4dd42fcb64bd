//! Core types and traits for RunVault
//!
//! This crate defines the foundational vocabulary used throughout the system:
//! - RunId / TraceId: identifier newtypes for runs and their traces
//! - Run: the ingested execution record (name, trace, inputs/outputs/metadata)
//! - RunRow: the relational projection of a run (indexable fields + locator)
//! - key: object-key and locator derivation (the wire contract)
//! - Error: error type hierarchy
//! - Traits: store contracts (ObjectStore, MetadataStore)

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod key;
pub mod traits;
pub mod types;

// Re-export commonly used types and traits
pub use error::{Error, Result, StoreKind};
pub use key::{locator, object_key, parse_locator};
pub use traits::{MetadataStore, ObjectStore};
pub use types::{JsonMap, Run, RunId, RunRow, TraceId};
