//! Core types for RunVault
//!
//! This module defines the foundational types:
//! - RunId: unique identifier for a single run
//! - TraceId: identifier grouping related runs into a trace
//! - Run: the ingested execution record
//! - RunRow: the relational projection of a persisted run

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

/// Arbitrary JSON-compatible mapping carried on a run.
///
/// Key order is semantically irrelevant; the BTreeMap keeps the canonical
/// payload encoding deterministic so repeated reads of an unchanged run
/// return byte-identical bytes.
pub type JsonMap = BTreeMap<String, serde_json::Value>;

/// Unique identifier for a run
///
/// A RunId is a wrapper around a UUID v4. Ids are generated by the writer
/// when a run arrives without one and are immutable once assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunId(Uuid);

impl RunId {
    /// Create a new random RunId using UUID v4
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a RunId from a string representation
    ///
    /// Accepts standard UUID format (with or without hyphens).
    /// Returns None if the string is not a valid UUID.
    pub fn parse(s: &str) -> Option<Self> {
        Uuid::parse_str(s).ok().map(Self)
    }

    /// Get the underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier grouping runs into a logical trace
///
/// A trace is not independently modeled: the id is carried on each run and
/// never validated for existence elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TraceId(Uuid);

impl TraceId {
    /// Create a new random TraceId using UUID v4
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a TraceId from a string representation
    pub fn parse(s: &str) -> Option<Self> {
        Uuid::parse_str(s).ok().map(Self)
    }

    /// Get the underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for TraceId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One recorded execution unit
///
/// A run is constructed by the caller (the writer assigns an id if absent),
/// persisted once, and read zero or more times. There is no update or delete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Run {
    /// Run id; assigned by the writer when absent
    #[serde(default)]
    pub id: Option<RunId>,
    /// Trace this run belongs to
    pub trace_id: TraceId,
    /// Non-empty label for the run
    pub name: String,
    /// Input mapping (defaults to empty)
    #[serde(default)]
    pub inputs: JsonMap,
    /// Output mapping (defaults to empty)
    #[serde(default)]
    pub outputs: JsonMap,
    /// Metadata mapping (defaults to empty)
    #[serde(default)]
    pub metadata: JsonMap,
}

impl Run {
    /// Create a run with empty inputs/outputs/metadata and no id
    pub fn new(trace_id: TraceId, name: impl Into<String>) -> Self {
        Self {
            id: None,
            trace_id,
            name: name.into(),
            inputs: JsonMap::new(),
            outputs: JsonMap::new(),
            metadata: JsonMap::new(),
        }
    }

    /// Create a run with a caller-assigned id
    pub fn with_id(id: RunId, trace_id: TraceId, name: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            ..Self::new(trace_id, name)
        }
    }

    /// Check the run is structurally valid for ingestion
    ///
    /// The only structural requirement is a non-empty name. Validation runs
    /// before any store call is issued.
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.name.is_empty() {
            return Err(crate::error::Error::InvalidArgument {
                reason: "run name must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

/// Relational projection of a persisted run
///
/// The row carries the indexable fields plus the locator pointing at the
/// payload blob. A row must never become visible before its blob is durable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRow {
    /// Run id (primary key)
    pub id: RunId,
    /// Trace the run belongs to
    pub trace_id: TraceId,
    /// Run label
    pub name: String,
    /// Full locator of the payload blob, e.g. `s3://bucket/runs/{id}.json`
    pub locator: String,
}

impl RunRow {
    /// Create a row
    pub fn new(id: RunId, trace_id: TraceId, name: impl Into<String>, locator: String) -> Self {
        Self {
            id,
            trace_id,
            name: name.into(),
            locator,
        }
    }
}
