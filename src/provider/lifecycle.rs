//! Ready/Closed state shared by every provider variant.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::{ProviderError, Result};

/// Observable lifecycle state of a provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderState {
    Ready,
    Closed,
}

impl ProviderState {
    pub fn is_closed(&self) -> bool {
        matches!(self, ProviderState::Closed)
    }
}

/// Atomic lifecycle tracker. Constructed in `Ready`; `Closed` is terminal.
#[derive(Debug, Default)]
pub struct Lifecycle {
    closed: AtomicBool,
}

impl Lifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ProviderState {
        if self.closed.load(Ordering::SeqCst) {
            ProviderState::Closed
        } else {
            ProviderState::Ready
        }
    }

    /// Fail with `ClosedProvider` once the provider has been released.
    pub fn ensure_ready(&self, variant: &str) -> Result<()> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(ProviderError::ClosedProvider {
                variant: variant.to_string(),
            });
        }
        Ok(())
    }

    /// Move to `Closed`. Returns true only for the call that made the
    /// transition.
    pub fn close(&self) -> bool {
        !self.closed.swap(true, Ordering::SeqCst)
    }
}
