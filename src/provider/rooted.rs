//! Provider that creates directories under a caller-chosen root.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use uuid::Uuid;

use crate::context::InvocationContext;
use crate::error::{ProviderError, Result};
use crate::handle::{DirectoryHandle, Namespace};
use crate::provider::{
    DirectoryProvider, Lifecycle, ProviderState, STANDARD_PREFIX, is_plain_name,
};

/// Creates `<root>/<prefix><uuid>` directories.
///
/// The root is created lazily on first use; its parent must already exist.
/// If this provider created the root, `release` removes it again as long as
/// it is empty; a root still holding handed-out directories is left alone.
/// Creation is serialized per provider.
#[derive(Debug)]
pub struct RootedProvider {
    root: PathBuf,
    prefix: String,
    label: String,
    lifecycle: Lifecycle,
    /// Whether this provider created `root`. Guarded so concurrent first
    /// calls agree on ownership.
    created_root: Mutex<bool>,
}

impl RootedProvider {
    pub const VARIANT: &'static str = "rooted";

    /// Construction touches no storage.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let label = root.display().to_string();
        Self {
            root,
            prefix: STANDARD_PREFIX.to_string(),
            label,
            lifecycle: Lifecycle::new(),
            created_root: Mutex::new(false),
        }
    }

    /// Set the directory name prefix.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Set the namespace label reported on handles.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    fn creation_error(&self, source: std::io::Error) -> ProviderError {
        ProviderError::DirectoryCreation {
            parent: self.root.clone(),
            source,
        }
    }

    fn make_dir(path: &Path) -> std::io::Result<()> {
        let mut builder = std::fs::DirBuilder::new();
        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            builder.mode(0o700);
        }
        builder.create(path)
    }
}

impl DirectoryProvider for RootedProvider {
    fn variant(&self) -> &str {
        Self::VARIANT
    }

    fn create_directory(&self, context: &InvocationContext) -> Result<DirectoryHandle> {
        // Held across the closed check and both mkdirs so a concurrent
        // release cannot remove the root in between.
        let mut created_root = self
            .created_root
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        self.lifecycle.ensure_ready(Self::VARIANT)?;
        context.validate()?;

        if !is_plain_name(&self.prefix) {
            return Err(self.creation_error(std::io::Error::new(
                ErrorKind::InvalidInput,
                format!("prefix '{}' is not a plain file name", self.prefix),
            )));
        }

        // Only the root itself is created; a missing parent is an error.
        if !self.root.is_dir() {
            Self::make_dir(&self.root).map_err(|e| self.creation_error(e))?;
            *created_root = true;
            tracing::debug!(root = %self.root.display(), "Created provider root");
        }

        let name = format!("{}{}", self.prefix, Uuid::new_v4().simple());
        let path =
            std::path::absolute(self.root.join(name)).map_err(|e| self.creation_error(e))?;

        // Single atomic mkdir: it either creates the directory or leaves
        // nothing behind. An existing path is reported, not retried.
        Self::make_dir(&path).map_err(|e| self.creation_error(e))?;

        tracing::debug!(
            path = %path.display(),
            context = context.label(),
            "Created rooted temp directory"
        );

        DirectoryHandle::new(path, Namespace::Custom(self.label.clone()))
            .map_err(|e| self.creation_error(e))
    }

    fn release(&self) -> Result<()> {
        if !self.lifecycle.close() {
            return Ok(());
        }

        let created = *self
            .created_root
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if !created {
            tracing::debug!(root = %self.root.display(), "Rooted provider released");
            return Ok(());
        }

        match std::fs::remove_dir(&self.root) {
            Ok(()) => {
                tracing::debug!(root = %self.root.display(), "Removed empty provider root");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) if e.kind() == ErrorKind::DirectoryNotEmpty => {
                tracing::debug!(
                    root = %self.root.display(),
                    "Provider root still holds directories, leaving it in place"
                );
                Ok(())
            }
            Err(source) => Err(ProviderError::Release {
                variant: Self::VARIANT.to_string(),
                source,
            }),
        }
    }

    fn state(&self) -> ProviderState {
        self.lifecycle.state()
    }
}
