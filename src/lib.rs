//! Pluggable providers for ephemeral, uniquely named test directories.
//!
//! An orchestrator picks a [`DirectoryProvider`] (directly or through the
//! [`ProviderRegistry`]), asks it for directories on behalf of an
//! [`InvocationContext`], and releases it exactly once when done:
//!
//! ```no_run
//! use scratchdir::{InvocationContext, StandardProvider, with_provider};
//!
//! let ctx = InvocationContext::new("[class:FooTest]/[method:bar()]");
//! let dir = with_provider(Box::new(StandardProvider::new()), |provider| {
//!     provider.create_directory(&ctx)
//! })?;
//! println!("{}", dir.path().display());
//! # Ok::<(), scratchdir::ProviderError>(())
//! ```

pub mod cli;
pub mod config;
pub mod context;
pub mod error;
pub mod handle;
pub mod provider;
pub mod registry;
pub mod scope;

pub use config::ProviderConfig;
pub use context::InvocationContext;
pub use error::{ConfigError, ProviderError, Result};
pub use handle::{DirectoryHandle, Namespace};
pub use provider::{
    DirectoryProvider, Lifecycle, ProviderState, RootedProvider, STANDARD_PREFIX,
    StandardProvider,
};
pub use registry::{ProviderFactory, ProviderRegistry};
pub use scope::{ProviderScope, with_provider};
