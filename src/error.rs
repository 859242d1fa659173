//! Error types for directory providers.

use std::path::PathBuf;

/// Errors that can occur while creating directories or releasing a provider.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// The caller supplied an unusable invocation context.
    #[error("Invalid invocation context: {reason}")]
    InvalidContext { reason: String },

    /// Storage refused or failed to create the directory.
    #[error("Directory creation failed under {}: {source}", .parent.display())]
    DirectoryCreation {
        parent: PathBuf,
        source: std::io::Error,
    },

    /// `create_directory` was called after `release`.
    #[error("Provider '{variant}' has been released")]
    ClosedProvider { variant: String },

    /// Teardown of provider-held resources failed.
    #[error("Release failed for provider '{variant}': {source}")]
    Release {
        variant: String,
        source: std::io::Error,
    },

    /// No factory is registered under the requested name.
    #[error("Unknown provider variant '{name}' (available: {})", .available.join(", "))]
    UnknownVariant {
        name: String,
        available: Vec<String>,
    },

    /// The scoped work failed and so did the release that followed it.
    #[error("{primary} (release also failed: {release})")]
    ReleaseAfterFailure {
        primary: Box<ProviderError>,
        release: Box<ProviderError>,
    },
}

impl ProviderError {
    /// Whether this error stems from a programmer mistake rather than storage.
    pub fn is_usage_error(&self) -> bool {
        match self {
            ProviderError::InvalidContext { .. }
            | ProviderError::ClosedProvider { .. }
            | ProviderError::UnknownVariant { .. } => true,
            ProviderError::ReleaseAfterFailure { primary, .. } => primary.is_usage_error(),
            ProviderError::DirectoryCreation { .. } | ProviderError::Release { .. } => false,
        }
    }
}

/// Result type for provider operations.
pub type Result<T> = std::result::Result<T, ProviderError>;

/// Errors raised while resolving configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },
}
