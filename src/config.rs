//! Configuration for provider selection.
//!
//! Read from the environment (after `.env` has been loaded by the binary):
//!
//! | Variable              | Default               |
//! |-----------------------|-----------------------|
//! | `SCRATCHDIR_PROVIDER` | `standard`            |
//! | `SCRATCHDIR_ROOT`     | `<temp>/scratchdir`   |
//! | `SCRATCHDIR_PREFIX`   | `junit`               |

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::provider::{STANDARD_PREFIX, StandardProvider, is_plain_name};

/// Resolved provider configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Registry name of the variant to use.
    pub provider: String,
    /// Root directory for the `rooted` variant.
    pub root: PathBuf,
    /// Name prefix for the `rooted` variant.
    pub prefix: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            provider: StandardProvider::VARIANT.to_string(),
            root: std::env::temp_dir().join("scratchdir"),
            prefix: STANDARD_PREFIX.to_string(),
        }
    }
}

impl ProviderConfig {
    /// Build from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Unset or blank values fall back
    /// to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let config = Self {
            provider: get("SCRATCHDIR_PROVIDER")
                .map(|v| v.trim().to_lowercase())
                .unwrap_or(defaults.provider),
            root: get("SCRATCHDIR_ROOT")
                .map(PathBuf::from)
                .unwrap_or(defaults.root),
            prefix: get("SCRATCHDIR_PREFIX").unwrap_or(defaults.prefix),
        };
        config.validate()?;
        Ok(config)
    }

    /// Check the prefix can be used as a single path component.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.prefix.is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "SCRATCHDIR_PREFIX".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        if !is_plain_name(&self.prefix) {
            return Err(ConfigError::InvalidValue {
                key: "SCRATCHDIR_PREFIX".to_string(),
                reason: format!("'{}' is not a plain file name", self.prefix),
            });
        }
        Ok(())
    }
}
