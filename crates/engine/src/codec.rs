//! Canonical run payload encoding
//!
//! The codec turns a run into its object-store form: a deterministic key
//! (`runs/{id}.json`) and a canonical JSON byte serialization of the full
//! record. There is no decode direction — the reader hands raw bytes back
//! to the caller, which owns interpretation.

use runvault_core::{object_key, Error, JsonMap, Result, Run, RunId, TraceId};
use serde::Serialize;

/// Content type recorded with every payload blob.
pub const CONTENT_TYPE: &str = "application/json";

/// The persisted form of a run: the id is always materialized, even when
/// the caller left it to the writer to assign.
#[derive(Serialize)]
struct RunDocument<'a> {
    id: RunId,
    trace_id: TraceId,
    name: &'a str,
    inputs: &'a JsonMap,
    outputs: &'a JsonMap,
    metadata: &'a JsonMap,
}

/// Encoder for run payloads.
///
/// Encoding is pure: the same (id, run) pair always produces the same key
/// and the same bytes (run mappings are ordered maps). The error path
/// exists only for serializer faults and cannot trigger for a structurally
/// valid run.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunCodec;

impl RunCodec {
    /// Encode a run under its assigned id.
    ///
    /// Returns the object key and the payload bytes to put under it.
    pub fn encode(&self, id: RunId, run: &Run) -> Result<(String, Vec<u8>)> {
        let document = RunDocument {
            id,
            trace_id: run.trace_id,
            name: &run.name,
            inputs: &run.inputs,
            outputs: &run.outputs,
            metadata: &run.metadata,
        };
        let payload = serde_json::to_vec(&document).map_err(|e| Error::Serialization {
            reason: e.to_string(),
        })?;
        Ok((object_key(id), payload))
    }
}
