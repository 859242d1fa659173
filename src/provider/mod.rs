//! Directory provider contract and the built-in variants.
//!
//! A provider produces fresh, empty, uniquely named directories for an
//! invocation context and is released exactly once when the orchestrator is
//! done with it.
//!
//! ```text
//!   new() ──▶ Ready ──create_directory()──▶ Ready
//!               │
//!               └──release()──▶ Closed ──create_directory()──▶ ClosedProvider
//! ```

mod lifecycle;
mod rooted;
mod standard;

pub use lifecycle::{Lifecycle, ProviderState};
pub use rooted::RootedProvider;
pub use standard::{STANDARD_PREFIX, StandardProvider};

use std::path::{Component, Path};

use crate::context::InvocationContext;
use crate::error::Result;
use crate::handle::DirectoryHandle;

/// Trait for strategies that create temporary directories.
pub trait DirectoryProvider: Send + Sync + std::fmt::Debug {
    /// Identifier of this variant, as used by the registry.
    fn variant(&self) -> &str;

    /// Create a new directory for `context`.
    ///
    /// The returned directory did not exist before the call, is empty, and is
    /// readable and writable by the current process. Its path is distinct
    /// from every other directory handed out in this process. On failure no
    /// directory is left behind.
    fn create_directory(&self, context: &InvocationContext) -> Result<DirectoryHandle>;

    /// Free any resources this provider holds.
    ///
    /// Never deletes directories already returned. Calling it twice is a
    /// no-op for the built-in variants.
    fn release(&self) -> Result<()>;

    /// Current lifecycle state.
    fn state(&self) -> ProviderState;
}

/// Whether `name` is a single plain path component, safe to join onto a
/// root without leaving it.
pub(crate) fn is_plain_name(name: &str) -> bool {
    if name.contains(['/', '\\']) {
        return false;
    }
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}
