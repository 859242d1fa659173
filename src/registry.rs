//! Registry of named provider factories.
//!
//! Variants are selected by identifier and instantiated through explicitly
//! registered zero-argument factories.

use std::collections::HashMap;
use std::sync::Arc;

use crate::config::ProviderConfig;
use crate::error::{ProviderError, Result};
use crate::provider::{DirectoryProvider, RootedProvider, StandardProvider};

/// Zero-argument constructor for a provider variant.
pub type ProviderFactory = Arc<dyn Fn() -> Box<dyn DirectoryProvider> + Send + Sync>;

/// Maps variant names to factories.
#[derive(Clone, Default)]
pub struct ProviderRegistry {
    factories: HashMap<String, ProviderFactory>,
}

impl ProviderRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the built-in `standard` and `rooted` variants.
    pub fn with_builtins(config: &ProviderConfig) -> Self {
        let mut registry = Self::new();
        registry.register(StandardProvider::VARIANT, || {
            Box::new(StandardProvider::new())
        });

        let root = config.root.clone();
        let prefix = config.prefix.clone();
        registry.register(RootedProvider::VARIANT, move || {
            Box::new(RootedProvider::new(root.clone()).with_prefix(prefix.clone()))
        });
        registry
    }

    /// Register a factory, replacing any previous one under `name`.
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn() -> Box<dyn DirectoryProvider> + Send + Sync + 'static,
    {
        let name = name.into();
        if self.factories.insert(name.clone(), Arc::new(factory)).is_some() {
            tracing::debug!("Replaced provider factory: {}", name);
        } else {
            tracing::debug!("Registered provider factory: {}", name);
        }
    }

    /// Instantiate a fresh provider of the named variant.
    pub fn create(&self, name: &str) -> Result<Box<dyn DirectoryProvider>> {
        match self.factories.get(name) {
            Some(factory) => Ok(factory()),
            None => Err(ProviderError::UnknownVariant {
                name: name.to_string(),
                available: self.variants(),
            }),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered variant names, sorted.
    pub fn variants(&self) -> Vec<String> {
        let mut names: Vec<String> = self.factories.keys().cloned().collect();
        names.sort();
        names
    }
}

impl std::fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("variants", &self.variants())
            .finish()
    }
}
