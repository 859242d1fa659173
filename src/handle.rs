//! Directory handles returned by providers.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Which filesystem namespace a directory belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "label", rename_all = "snake_case")]
pub enum Namespace {
    /// The host's native filesystem, inside the OS temporary area.
    Default,
    /// Anything else: a custom root, a mount, a virtual filesystem.
    Custom(String),
}

impl Namespace {
    pub fn is_default(&self) -> bool {
        matches!(self, Namespace::Default)
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Namespace::Default => write!(f, "default"),
            Namespace::Custom(label) => write!(f, "custom:{}", label),
        }
    }
}

/// A freshly created, empty directory.
///
/// The caller owns the directory once the handle is returned; dropping the
/// handle does not delete anything.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DirectoryHandle {
    path: PathBuf,
    namespace: Namespace,
}

impl DirectoryHandle {
    /// Build a handle, resolving `path` against the current directory if it
    /// is relative.
    pub fn new(path: impl Into<PathBuf>, namespace: Namespace) -> std::io::Result<Self> {
        let path = path.into();
        let path = if path.is_absolute() {
            path
        } else {
            std::path::absolute(&path)?
        };
        Ok(Self { path, namespace })
    }

    /// Absolute location of the directory.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    /// Final path component, e.g. `junit1a2b3c`.
    pub fn name(&self) -> Option<&str> {
        self.path.file_name().and_then(|n| n.to_str())
    }

    pub fn into_path(self) -> PathBuf {
        self.path
    }
}

impl AsRef<Path> for DirectoryHandle {
    fn as_ref(&self) -> &Path {
        &self.path
    }
}

impl fmt::Display for DirectoryHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.path.display(), self.namespace)
    }
}
