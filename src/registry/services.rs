//! Service registry.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use thiserror::Error;

use crate::lifecycle::{BoxError, LocateService, Service, ServiceLocator, ServiceRef};

/// Errors raised by the registry.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// Nothing registered under the requested id.
    #[error("Service \"{0}\" is not registered")]
    NotFound(String),
}

/// A thread-safe id → service map.
#[derive(Clone, Default)]
pub struct ServiceRegistry {
    inner: Arc<DashMap<String, ServiceRef>>,
}

impl ServiceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) a service.
    pub fn set<S: Service + 'static>(&self, id: impl Into<String>, service: Arc<S>) {
        self.inner.insert(id.into(), service);
    }

    pub fn get(&self, id: &str) -> Result<ServiceRef, RegistryError> {
        self.inner
            .get(id)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| RegistryError::NotFound(id.to_string()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.inner.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Share this registry as a service locator.
    pub fn locator(&self) -> ServiceLocator {
        ServiceLocator::object(Arc::new(self.clone()))
    }
}

#[async_trait]
impl LocateService for ServiceRegistry {
    async fn locate(&self, key: &str) -> Result<ServiceRef, BoxError> {
        Ok(self.get(key)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Noop;

    impl Service for Noop {}

    #[test]
    fn test_registry_operations() {
        let registry = ServiceRegistry::new();
        assert!(registry.is_empty());

        registry.set("noop", Arc::new(Noop));
        assert!(registry.contains("noop"));
        assert_eq!(registry.len(), 1);
        assert!(registry.get("noop").is_ok());

        match registry.get("ghost") {
            Err(err) => assert_eq!(err, RegistryError::NotFound("ghost".into())),
            Ok(_) => panic!("unregistered id should not resolve"),
        }
    }

    #[tokio::test]
    async fn test_locator_shares_storage() {
        let registry = ServiceRegistry::new();
        let locate = registry.locator().normalize();

        registry.set("late", Arc::new(Noop));

        assert!(locate("late".into()).await.is_ok());
        let err = match locate("missing".into()).await {
            Err(err) => err,
            Ok(_) => panic!("missing id should fail"),
        };
        assert_eq!(err.to_string(), "Service \"missing\" is not registered");
    }
}
