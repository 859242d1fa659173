//! Invocation context handed to providers by the orchestrator.

use uuid::Uuid;

use crate::error::{ProviderError, Result};

/// Identifies the test unit a directory is being created for.
///
/// Providers read it but never mutate or retain it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationContext {
    /// Per-invocation identifier.
    pub invocation_id: Uuid,
    /// Stable identifier of the test unit (e.g. `[engine:x]/[class:Foo]/[method:bar()]`).
    pub unique_id: String,
    /// Human-readable name, if the orchestrator has one.
    pub display_name: Option<String>,
}

impl InvocationContext {
    /// Create a context for the given test unit.
    pub fn new(unique_id: impl Into<String>) -> Self {
        Self {
            invocation_id: Uuid::new_v4(),
            unique_id: unique_id.into(),
            display_name: None,
        }
    }

    /// Set the display name.
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Name to show in logs: the display name if set, otherwise the unique id.
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.unique_id)
    }

    /// Reject contexts that cannot identify a test unit.
    pub fn validate(&self) -> Result<()> {
        if self.unique_id.trim().is_empty() {
            return Err(ProviderError::InvalidContext {
                reason: "unique id is empty".to_string(),
            });
        }
        if self.invocation_id.is_nil() {
            return Err(ProviderError::InvalidContext {
                reason: "invocation id is nil".to_string(),
            });
        }
        Ok(())
    }
}
