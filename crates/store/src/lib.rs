//! Store adapters for RunVault
//!
//! In-memory implementations of the core store traits, plus the
//! fault-injection and call-recording wrappers the protocol tests are
//! built on. Production S3/Postgres bindings live with the surrounding
//! service layer, not here; everything in the engine is written against
//! the traits only.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod memory;
pub mod testing;

pub use memory::{MemoryMetadataStore, MemoryObjectStore};
