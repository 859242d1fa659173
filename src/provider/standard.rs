//! Default provider backed by the OS temporary area.

use std::path::{Path, PathBuf};

use crate::context::InvocationContext;
use crate::error::{ProviderError, Result};
use crate::handle::{DirectoryHandle, Namespace};
use crate::provider::{DirectoryProvider, Lifecycle, ProviderState};

/// Name prefix for directories created by [`StandardProvider`]. Only there
/// to make the directories easy to spot; uniqueness comes from the OS
/// primitive.
pub const STANDARD_PREFIX: &str = "junit";

/// Creates directories under `std::env::temp_dir()`.
///
/// Holds no resources, so `release` only closes the provider. Directories
/// are left for the OS (or an external sweeper) to reclaim.
#[derive(Debug, Default)]
pub struct StandardProvider {
    lifecycle: Lifecycle,
}

impl StandardProvider {
    pub const VARIANT: &'static str = "standard";

    pub fn new() -> Self {
        Self::default()
    }

    fn temp_root() -> PathBuf {
        std::env::temp_dir()
    }

    /// Create a `junit`-prefixed directory in `parent`. Failures are
    /// reported against `parent`; there is no fallback location.
    pub(crate) fn create_in(parent: &Path) -> Result<DirectoryHandle> {
        let creation_error = |source| ProviderError::DirectoryCreation {
            parent: parent.to_path_buf(),
            source,
        };

        let mut builder = tempfile::Builder::new();
        builder.prefix(STANDARD_PREFIX);
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            builder.permissions(std::fs::Permissions::from_mode(0o700));
        }
        let dir = builder.tempdir_in(parent).map_err(creation_error)?;

        // Resolve the handle while `dir` still owns the directory, so a
        // failure here removes it on drop.
        let handle =
            DirectoryHandle::new(dir.path(), Namespace::Default).map_err(creation_error)?;
        let _ = dir.keep();
        Ok(handle)
    }
}

impl DirectoryProvider for StandardProvider {
    fn variant(&self) -> &str {
        Self::VARIANT
    }

    fn create_directory(&self, context: &InvocationContext) -> Result<DirectoryHandle> {
        self.lifecycle.ensure_ready(Self::VARIANT)?;
        context.validate()?;

        let handle = Self::create_in(&Self::temp_root())?;
        tracing::debug!(
            path = %handle.path().display(),
            context = context.label(),
            "Created standard temp directory"
        );
        Ok(handle)
    }

    fn release(&self) -> Result<()> {
        if self.lifecycle.close() {
            tracing::debug!("Standard provider released");
        }
        Ok(())
    }

    fn state(&self) -> ProviderState {
        self.lifecycle.state()
    }
}
