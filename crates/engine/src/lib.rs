//! RunVault engine — the dual-store persistence protocol
//!
//! The engine orchestrates two independently-failing stores so that a
//! relational row never becomes visible before the blob it points at is
//! durable:
//!
//! - [`RunCodec`]: canonical payload encoding and the object-key contract
//! - [`RunWriter`]: batch create (blob fan-out barrier, then one bulk insert)
//! - [`RunReader`]: get-by-id (row lookup, then blob fetch)
//! - [`StoreConfig`]: the bucket seam filled by the surrounding layer
//! - [`RunVault`]: convenience facade pairing a writer and reader

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod codec;
pub mod config;
pub mod reader;
pub mod vault;
pub mod writer;

pub use codec::{RunCodec, CONTENT_TYPE};
pub use config::{StoreConfig, DEFAULT_BUCKET};
pub use reader::RunReader;
pub use vault::RunVault;
pub use writer::RunWriter;
