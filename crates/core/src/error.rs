//! Error types for RunVault
//!
//! One taxonomy covers the whole persistence protocol. Errors are structured
//! (typed fields, `thiserror` display impls) and adapter failures are carried
//! through unmodified with the distinguishing kind attached. The core never
//! retries and never reports partial success within a batch.
//!
//! # Categories
//!
//! | Category | Variants | Description |
//! |----------|----------|-------------|
//! | Validation | `InvalidArgument` | Rejected before any store call |
//! | Transport | `StoreUnavailable` | Store transport/connectivity failure |
//! | Absence | `NotFound` | No relational row for the id |
//! | Invariant | `Inconsistent` | Row exists but the blob is missing |
//! | Batch | `PartialBatchFailure` | A blob write failed; batch aborted |
//! | System | `Serialization` | Payload encoder fault |

use crate::types::RunId;
use std::fmt;
use thiserror::Error;

/// Result type alias for RunVault operations
pub type Result<T> = std::result::Result<T, Error>;

/// Which of the two stores an adapter error came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    /// The object (blob) store
    Object,
    /// The relational metadata store
    Metadata,
}

impl fmt::Display for StoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreKind::Object => write!(f, "object store"),
            StoreKind::Metadata => write!(f, "metadata store"),
        }
    }
}

/// Errors for the dual-store persistence protocol
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed input rejected before any external call
    #[error("invalid argument: {reason}")]
    InvalidArgument {
        /// What was wrong with the input
        reason: String,
    },

    /// Transport or connectivity failure against one of the stores.
    /// Not retried here; the caller owns retry policy.
    #[error("{store} unavailable: {reason}")]
    StoreUnavailable {
        /// Which store failed
        store: StoreKind,
        /// Underlying failure, as reported by the adapter
        reason: String,
    },

    /// No relational row exists for the requested id
    #[error("run not found: {run}")]
    NotFound {
        /// The requested run id
        run: RunId,
    },

    /// A relational row exists but the blob it points at is missing.
    /// Signals a prior partial-batch failure or external tampering,
    /// not legitimate absence.
    #[error("run {run} is inconsistent: row present but blob missing at {locator}")]
    Inconsistent {
        /// The affected run id
        run: RunId,
        /// The locator the row recorded
        locator: String,
    },

    /// A blob write in the batch failed; the whole batch was aborted before
    /// any relational insert. Blobs already written remain as orphans.
    #[error("batch aborted: blob write for run {run} failed: {source}")]
    PartialBatchFailure {
        /// The run whose blob write failed first
        run: RunId,
        /// The underlying failure
        #[source]
        source: Box<Error>,
    },

    /// Payload serialization fault
    #[error("serialization error: {reason}")]
    Serialization {
        /// Encoder failure detail
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_kind_display() {
        assert_eq!(StoreKind::Object.to_string(), "object store");
        assert_eq!(StoreKind::Metadata.to_string(), "metadata store");
    }

    #[test]
    fn test_invalid_argument_display() {
        let err = Error::InvalidArgument {
            reason: "empty batch".to_string(),
        };
        assert_eq!(err.to_string(), "invalid argument: empty batch");
    }

    #[test]
    fn test_store_unavailable_display() {
        let err = Error::StoreUnavailable {
            store: StoreKind::Object,
            reason: "connection refused".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("object store unavailable"));
        assert!(msg.contains("connection refused"));
    }

    #[test]
    fn test_not_found_display() {
        let run = RunId::new();
        let err = Error::NotFound { run };
        assert!(err.to_string().contains(&run.to_string()));
    }

    #[test]
    fn test_inconsistent_display() {
        let run = RunId::new();
        let err = Error::Inconsistent {
            run,
            locator: format!("s3://runs/runs/{}.json", run),
        };
        let msg = err.to_string();
        assert!(msg.contains("inconsistent"));
        assert!(msg.contains("blob missing"));
    }

    #[test]
    fn test_partial_batch_failure_carries_source() {
        let run = RunId::new();
        let err = Error::PartialBatchFailure {
            run,
            source: Box::new(Error::StoreUnavailable {
                store: StoreKind::Object,
                reason: "quota exceeded".to_string(),
            }),
        };
        let msg = err.to_string();
        assert!(msg.contains("batch aborted"));
        assert!(msg.contains("quota exceeded"));

        // The source chain exposes the adapter error unmodified
        let source = std::error::Error::source(&err).unwrap();
        assert!(source.to_string().contains("object store unavailable"));
    }

    #[test]
    fn test_error_pattern_matching() {
        let err = Error::NotFound { run: RunId::new() };
        assert!(matches!(err, Error::NotFound { .. }));
    }
}
