//! `scratchdir create`: allocate directories through a provider.

use clap::Args;

use crate::config::ProviderConfig;
use crate::context::InvocationContext;
use crate::error::ProviderError;
use crate::handle::DirectoryHandle;
use crate::provider::DirectoryProvider;
use crate::registry::ProviderRegistry;
use crate::scope::with_provider;

#[derive(Args, Debug, Clone)]
pub struct CreateArgs {
    /// Provider variant (defaults to SCRATCHDIR_PROVIDER or "standard")
    #[arg(short, long)]
    pub provider: Option<String>,

    /// Unique id of the test unit the directories belong to
    #[arg(short, long, default_value = "cli")]
    pub context: String,

    /// Number of directories to create
    #[arg(short = 'n', long, default_value_t = 1)]
    pub count: usize,

    /// Print handles as JSON
    #[arg(long)]
    pub json: bool,
}

/// Directories created by a batch, plus the error that stopped it early.
#[derive(Debug)]
pub struct BatchOutcome {
    pub handles: Vec<DirectoryHandle>,
    pub error: Option<ProviderError>,
}

/// Create up to `count` directories with `provider`, then release it.
///
/// Handles created before a failure are kept in the outcome so the caller
/// can still account for them.
pub fn create_batch(
    provider: Box<dyn DirectoryProvider>,
    context: &InvocationContext,
    count: usize,
) -> BatchOutcome {
    let mut handles = Vec::with_capacity(count);
    let result = with_provider(provider, |p| {
        for _ in 0..count {
            handles.push(p.create_directory(context)?);
        }
        Ok(())
    });

    BatchOutcome {
        handles,
        error: result.err(),
    }
}

/// Create the requested directories inside a provider scope.
///
/// On a partial failure the paths already created are written to stderr
/// before the error is returned.
pub fn create_directories(
    args: &CreateArgs,
    config: &ProviderConfig,
) -> anyhow::Result<Vec<DirectoryHandle>> {
    let registry = ProviderRegistry::with_builtins(config);
    let variant = args.provider.as_deref().unwrap_or(&config.provider);
    let provider = registry.create(variant)?;
    let context = InvocationContext::new(args.context.clone());

    let outcome = create_batch(provider, &context, args.count);
    if let Some(err) = outcome.error {
        for handle in &outcome.handles {
            eprintln!("created before failure: {}", handle.path().display());
        }
        return Err(anyhow::Error::new(err).context(format!(
            "failed to create directories with '{}' provider ({} of {} created)",
            variant,
            outcome.handles.len(),
            args.count
        )));
    }

    tracing::info!(count = outcome.handles.len(), variant, "Created directories");
    Ok(outcome.handles)
}

/// Run the create command and print the result.
pub fn run_create_command(args: CreateArgs, config: &ProviderConfig) -> anyhow::Result<()> {
    let handles = create_directories(&args, config)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&handles)?);
    } else {
        for handle in &handles {
            println!("{}", handle.path().display());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use tempfile::TempDir;

    use super::*;
    use crate::error::Result;
    use crate::handle::Namespace;
    use crate::provider::{ProviderState, RootedProvider};

    /// Rooted provider that refuses every call after the first `limit`.
    #[derive(Debug)]
    struct LimitedProvider {
        inner: RootedProvider,
        calls: AtomicUsize,
        limit: usize,
    }

    impl DirectoryProvider for LimitedProvider {
        fn variant(&self) -> &str {
            "limited"
        }

        fn create_directory(&self, context: &InvocationContext) -> Result<DirectoryHandle> {
            if self.calls.fetch_add(1, Ordering::SeqCst) >= self.limit {
                return Err(ProviderError::DirectoryCreation {
                    parent: self.inner.root().to_path_buf(),
                    source: std::io::Error::other("quota exceeded"),
                });
            }
            self.inner.create_directory(context)
        }

        fn release(&self) -> Result<()> {
            self.inner.release()
        }

        fn state(&self) -> ProviderState {
            self.inner.state()
        }
    }

    fn args(provider: &str, count: usize) -> CreateArgs {
        CreateArgs {
            provider: Some(provider.to_string()),
            context: "[class:Cli]".to_string(),
            count,
            json: false,
        }
    }

    #[test]
    fn test_create_with_rooted_provider() {
        let dir = TempDir::new().unwrap();
        let config = ProviderConfig {
            root: dir.path().to_path_buf(),
            ..ProviderConfig::default()
        };

        let handles = create_directories(&args("rooted", 3), &config).unwrap();

        assert_eq!(handles.len(), 3);
        for handle in &handles {
            assert!(handle.path().is_dir());
            assert!(matches!(handle.namespace(), Namespace::Custom(_)));
        }
    }

    #[test]
    fn test_unknown_provider_fails() {
        let err = create_directories(&args("nfs", 1), &ProviderConfig::default()).unwrap_err();
        assert!(err.to_string().contains("nfs"));
    }

    #[test]
    fn test_zero_count_creates_nothing() {
        let dir = TempDir::new().unwrap();
        let config = ProviderConfig {
            root: dir.path().join("unused"),
            ..ProviderConfig::default()
        };

        let handles = create_directories(&args("rooted", 0), &config).unwrap();
        assert!(handles.is_empty());
        assert!(!dir.path().join("unused").exists());
    }

    #[test]
    fn test_partial_batch_keeps_created_handles() {
        let dir = TempDir::new().unwrap();
        let provider = LimitedProvider {
            inner: RootedProvider::new(dir.path()),
            calls: AtomicUsize::new(0),
            limit: 2,
        };

        let outcome = create_batch(
            Box::new(provider),
            &InvocationContext::new("[class:Cli]"),
            3,
        );

        assert_eq!(outcome.handles.len(), 2);
        assert!(matches!(
            outcome.error,
            Some(ProviderError::DirectoryCreation { .. })
        ));
        for handle in &outcome.handles {
            assert!(handle.path().is_dir());
        }
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 2);
    }

    #[test]
    fn test_partial_failure_reports_created_count() {
        let dir = TempDir::new().unwrap();
        let config = ProviderConfig {
            root: dir.path().join("missing").join("root"),
            ..ProviderConfig::default()
        };

        let err = create_directories(&args("rooted", 2), &config).unwrap_err();
        assert!(err.to_string().contains("(0 of 2 created)"));
    }
}
