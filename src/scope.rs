//! Scoped ownership of a provider so `release` runs exactly once on every
//! exit path.

use crate::context::InvocationContext;
use crate::error::{ProviderError, Result};
use crate::handle::DirectoryHandle;
use crate::provider::{DirectoryProvider, ProviderState};

/// Owns a provider and releases it on [`close`](Self::close) or drop.
///
/// Prefer `close` so a release failure reaches the caller; on drop the
/// failure can only be logged.
pub struct ProviderScope {
    provider: Box<dyn DirectoryProvider>,
    released: bool,
}

impl ProviderScope {
    pub fn new(provider: Box<dyn DirectoryProvider>) -> Self {
        Self {
            provider,
            released: false,
        }
    }

    pub fn provider(&self) -> &dyn DirectoryProvider {
        self.provider.as_ref()
    }

    pub fn create_directory(&self, context: &InvocationContext) -> Result<DirectoryHandle> {
        self.provider.create_directory(context)
    }

    pub fn state(&self) -> ProviderState {
        self.provider.state()
    }

    /// Release the provider and report the outcome.
    pub fn close(mut self) -> Result<()> {
        self.released = true;
        self.provider.release()
    }
}

impl Drop for ProviderScope {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        if let Err(e) = self.provider.release() {
            tracing::warn!(
                variant = self.provider.variant(),
                "Provider release failed during drop: {}",
                e
            );
        }
    }
}

impl std::fmt::Debug for ProviderScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderScope")
            .field("variant", &self.provider.variant())
            .field("released", &self.released)
            .finish()
    }
}

/// Run `f` with `provider`, then release it exactly once.
///
/// Directories created inside `f` stay with the caller whatever the release
/// outcome. If both `f` and the release fail, both errors are returned in
/// [`ProviderError::ReleaseAfterFailure`].
pub fn with_provider<T, F>(provider: Box<dyn DirectoryProvider>, f: F) -> Result<T>
where
    F: FnOnce(&dyn DirectoryProvider) -> Result<T>,
{
    let scope = ProviderScope::new(provider);
    let outcome = f(scope.provider());
    let released = scope.close();

    match (outcome, released) {
        (Ok(value), Ok(())) => Ok(value),
        (Ok(_), Err(release)) => Err(release),
        (Err(primary), Ok(())) => Err(primary),
        (Err(primary), Err(release)) => Err(ProviderError::ReleaseAfterFailure {
            primary: Box::new(primary),
            release: Box::new(release),
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use tempfile::TempDir;

    use super::*;
    use crate::provider::{Lifecycle, RootedProvider};

    /// Counts releases and optionally fails them.
    #[derive(Debug)]
    struct CountingProvider {
        inner: RootedProvider,
        releases: Arc<AtomicUsize>,
        fail_release: bool,
        lifecycle: Lifecycle,
    }

    impl CountingProvider {
        fn new(root: &std::path::Path, releases: Arc<AtomicUsize>, fail_release: bool) -> Self {
            Self {
                inner: RootedProvider::new(root),
                releases,
                fail_release,
                lifecycle: Lifecycle::new(),
            }
        }
    }

    impl DirectoryProvider for CountingProvider {
        fn variant(&self) -> &str {
            "counting"
        }

        fn create_directory(&self, context: &InvocationContext) -> Result<DirectoryHandle> {
            self.lifecycle.ensure_ready("counting")?;
            self.inner.create_directory(context)
        }

        fn release(&self) -> Result<()> {
            self.releases.fetch_add(1, Ordering::SeqCst);
            self.lifecycle.close();
            if self.fail_release {
                return Err(ProviderError::Release {
                    variant: "counting".to_string(),
                    source: std::io::Error::other("unmount failed"),
                });
            }
            Ok(())
        }

        fn state(&self) -> ProviderState {
            self.lifecycle.state()
        }
    }

    fn ctx() -> InvocationContext {
        InvocationContext::new("[class:Scope]")
    }

    #[test]
    fn test_with_provider_releases_once_on_success() {
        let dir = TempDir::new().unwrap();
        let releases = Arc::new(AtomicUsize::new(0));
        let provider = CountingProvider::new(dir.path(), releases.clone(), false);

        let handle = with_provider(Box::new(provider), |p| p.create_directory(&ctx())).unwrap();

        assert_eq!(releases.load(Ordering::SeqCst), 1);
        assert!(handle.path().is_dir());
    }

    #[test]
    fn test_with_provider_releases_once_on_failure() {
        let dir = TempDir::new().unwrap();
        let releases = Arc::new(AtomicUsize::new(0));
        let provider = CountingProvider::new(dir.path(), releases.clone(), false);

        let err = with_provider(Box::new(provider), |p| {
            p.create_directory(&InvocationContext::new(""))
        })
        .unwrap_err();

        assert!(matches!(err, ProviderError::InvalidContext { .. }));
        assert_eq!(releases.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_release_failure_is_reported() {
        let dir = TempDir::new().unwrap();
        let releases = Arc::new(AtomicUsize::new(0));
        let provider = CountingProvider::new(dir.path(), releases.clone(), true);

        let mut created = None;
        let err = with_provider(Box::new(provider), |p| {
            created = Some(p.create_directory(&ctx())?);
            Ok(())
        })
        .unwrap_err();

        assert!(matches!(err, ProviderError::Release { .. }));
        // Handles obtained before the failed release are untouched.
        assert!(created.unwrap().path().is_dir());
    }

    #[test]
    fn test_both_failures_are_kept() {
        let dir = TempDir::new().unwrap();
        let releases = Arc::new(AtomicUsize::new(0));
        let provider = CountingProvider::new(dir.path(), releases.clone(), true);

        let err = with_provider(Box::new(provider), |p| {
            p.create_directory(&InvocationContext::new(" "))
        })
        .unwrap_err();

        match err {
            ProviderError::ReleaseAfterFailure { primary, release } => {
                assert!(matches!(*primary, ProviderError::InvalidContext { .. }));
                assert!(matches!(*release, ProviderError::Release { .. }));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_scope_releases_on_drop() {
        let dir = TempDir::new().unwrap();
        let releases = Arc::new(AtomicUsize::new(0));

        {
            let scope = ProviderScope::new(Box::new(CountingProvider::new(
                dir.path(),
                releases.clone(),
                false,
            )));
            scope.create_directory(&ctx()).unwrap();
            assert_eq!(scope.state(), ProviderState::Ready);
        }

        assert_eq!(releases.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_close_does_not_release_again_on_drop() {
        let dir = TempDir::new().unwrap();
        let releases = Arc::new(AtomicUsize::new(0));
        let scope = ProviderScope::new(Box::new(CountingProvider::new(
            dir.path(),
            releases.clone(),
            true,
        )));

        assert!(scope.close().is_err());
        assert_eq!(releases.load(Ordering::SeqCst), 1);
    }
}
