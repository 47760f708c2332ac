//! Registry configuration
//!
//! The only tunable is the bucket count. The table is sized once, when the
//! first operation is indexed, and never resized.
//!
//! ```rust
//! use uactl_oper_registry::RegistryConfig;
//!
//! let config = RegistryConfig::from_toml_str("bucket_count = 1024").unwrap();
//! assert_eq!(config.bucket_count, 1024);
//!
//! assert!(RegistryConfig::from_toml_str("bucket_count = 0").is_err());
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{RegistryError, Result};

/// Bucket count used when none is configured
pub const DEFAULT_BUCKET_COUNT: usize = 4098;

/// Largest accepted bucket count
pub const MAX_BUCKET_COUNT: usize = 1 << 24;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Number of hash buckets, fixed for the lifetime of the table
    pub bucket_count: usize,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            bucket_count: DEFAULT_BUCKET_COUNT,
        }
    }
}

impl RegistryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bucket_count(mut self, bucket_count: usize) -> Self {
        self.bucket_count = bucket_count;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.bucket_count == 0 {
            return Err(RegistryError::configuration(
                "bucket_count must be greater than 0",
            ));
        }

        if self.bucket_count > MAX_BUCKET_COUNT {
            return Err(RegistryError::configuration(format!(
                "bucket_count must not exceed {}",
                MAX_BUCKET_COUNT
            )));
        }

        Ok(())
    }

    /// Parse and validate a TOML table. Missing keys take their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: RegistryConfig =
            toml::from_str(text).map_err(|e| RegistryError::configuration(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}
