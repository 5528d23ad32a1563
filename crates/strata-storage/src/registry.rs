//! Named storage providers
//!
//! A [`ProviderRegistry`] is an explicit context object handed to the tiering
//! driver. Independent registries never share state, so separate runs (and
//! tests) cannot interfere with each other.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::object_store::ObjectStore;
use strata_core::{CoreError, CoreResult};

/// Map from provider name to its object store
#[derive(Default, Clone)]
pub struct ProviderRegistry {
    providers: BTreeMap<String, Arc<dyn ObjectStore>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a store under its descriptor's name.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::AlreadyExists` if the name is taken.
    pub fn register(&mut self, store: Arc<dyn ObjectStore>) -> CoreResult<()> {
        let name = store.descriptor().name.clone();
        if self.providers.contains_key(&name) {
            return Err(CoreError::already_exists("provider", name));
        }

        tracing::debug!(provider = %store.descriptor(), "Registered storage provider");
        self.providers.insert(name, store);
        Ok(())
    }

    /// Builder-style [`register`](Self::register).
    pub fn with(mut self, store: Arc<dyn ObjectStore>) -> CoreResult<Self> {
        self.register(store)?;
        Ok(self)
    }

    /// Look up a provider by name.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` for unknown names.
    pub fn get(&self, name: &str) -> CoreResult<Arc<dyn ObjectStore>> {
        self.providers
            .get(name)
            .cloned()
            .ok_or_else(|| CoreError::not_found("provider", name))
    }

    /// Registered provider names, sorted.
    pub fn names(&self) -> Vec<String> {
        self.providers.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object_store::MemoryObjectStore;

    #[test]
    fn test_register_and_get() {
        let registry = ProviderRegistry::new()
            .with(Arc::new(MemoryObjectStore::named("aws", "us-east-1")))
            .unwrap()
            .with(Arc::new(MemoryObjectStore::named("gcp", "us-west-1")))
            .unwrap();

        assert_eq!(registry.names(), vec!["aws", "gcp"]);
        assert_eq!(registry.get("gcp").unwrap().descriptor().region, "us-west-1");
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut registry = ProviderRegistry::new();
        registry
            .register(Arc::new(MemoryObjectStore::named("aws", "us-east-1")))
            .unwrap();

        let err = registry
            .register(Arc::new(MemoryObjectStore::named("aws", "eu-west-1")))
            .unwrap_err();
        assert!(matches!(err, CoreError::AlreadyExists { .. }));
    }

    #[test]
    fn test_unknown_provider() {
        let registry = ProviderRegistry::new();
        assert!(matches!(registry.get("azure"), Err(e) if e.is_not_found()));
        assert!(registry.is_empty());
    }
}
