//! Object-key and locator derivation
//!
//! The object key and locator formats are part of the wire contract:
//! - object key: `runs/{id}.json`
//! - locator (stored in the relational row): `s3://{bucket}/runs/{id}.json`
//!
//! Both are pure functions of the run id (and bucket). The reader resolves
//! a row's recorded locator back into (bucket, key) with [`parse_locator`];
//! the row, not the writer's current config, is the source of truth for
//! where its blob lives.

use crate::types::RunId;

/// Locator scheme prefix for object-store blobs.
pub const LOCATOR_SCHEME: &str = "s3://";

/// Derive the object-store key for a run: `runs/{id}.json`
pub fn object_key(id: RunId) -> String {
    format!("runs/{}.json", id)
}

/// Derive the locator recorded in the relational row:
/// `s3://{bucket}/runs/{id}.json`
pub fn locator(bucket: &str, id: RunId) -> String {
    format!("{}{}/{}", LOCATOR_SCHEME, bucket, object_key(id))
}

/// Split a locator back into (bucket, key).
///
/// Returns None if the scheme is wrong or either component is empty.
pub fn parse_locator(locator: &str) -> Option<(&str, &str)> {
    let rest = locator.strip_prefix(LOCATOR_SCHEME)?;
    let (bucket, key) = rest.split_once('/')?;
    if bucket.is_empty() || key.is_empty() {
        return None;
    }
    Some((bucket, key))
}
