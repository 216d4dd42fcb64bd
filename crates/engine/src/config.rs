//! Engine configuration
//!
//! The surrounding service layer owns settings/env loading and bucket
//! provisioning; `StoreConfig` is the seam it fills when constructing the
//! engine. Validation runs once at vault construction, before the first
//! store call.

use runvault_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// Bucket used when none is configured.
pub const DEFAULT_BUCKET: &str = "runs";

/// Object-store placement for run payload blobs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Bucket all payload blobs are written to. Pre-provisioned externally.
    #[serde(default = "default_bucket")]
    pub bucket: String,
}

fn default_bucket() -> String {
    DEFAULT_BUCKET.to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            bucket: default_bucket(),
        }
    }
}

impl StoreConfig {
    /// Create a config for the given bucket
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
        }
    }

    /// Check the bucket name is usable.
    ///
    /// A '/' in the bucket would make recorded locators ambiguous to parse
    /// back into (bucket, key).
    pub fn validate(&self) -> Result<()> {
        if self.bucket.is_empty() {
            return Err(Error::InvalidArgument {
                reason: "bucket name must not be empty".to_string(),
            });
        }
        if self.bucket.contains('/') {
            return Err(Error::InvalidArgument {
                reason: format!("bucket name must not contain '/': {}", self.bucket),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bucket() {
        let config = StoreConfig::default();
        assert_eq!(config.bucket, "runs");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_bucket() {
        let config = StoreConfig::new("");
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_slash() {
        let config = StoreConfig::new("a/b");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_deserialize_defaults_bucket() {
        let config: StoreConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.bucket, DEFAULT_BUCKET);
    }
}
