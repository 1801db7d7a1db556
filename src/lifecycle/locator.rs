//! Locator capabilities and their normalization.
//!
//! # Responsibilities
//! - Accept either calling convention: a bare callable, or an object
//!   exposing a named lookup method (`find` / `locate`)
//! - Normalize both into one callable shape, once per bootstrap run
//!
//! # Design Decisions
//! - The object shape is bound to its owner through an `Arc`, so the
//!   lookup always runs against the same receiver and its state
//! - The callable shape is handed back unchanged
//! - Results are never cached here

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use futures_util::future::{BoxFuture, FutureExt};

use crate::lifecycle::error::BoxError;
use crate::lifecycle::service::{Config, ServiceRef};

/// Normalized lookup: `(key) -> future of value`.
pub type LocateFn<T> = Arc<dyn Fn(String) -> BoxFuture<'static, Result<T, BoxError>> + Send + Sync>;

/// Object exposing a `find` method for configuration.
#[async_trait]
pub trait FindConfig: Send + Sync {
    /// `Ok(None)` when nothing is stored under `key`.
    async fn find(&self, key: &str) -> Result<Option<Config>, BoxError>;
}

/// Object exposing a `locate` method for service instances.
#[async_trait]
pub trait LocateService: Send + Sync {
    async fn locate(&self, key: &str) -> Result<ServiceRef, BoxError>;
}

/// Configuration locator in either calling convention.
#[derive(Clone)]
pub enum ConfigLocator {
    Function(LocateFn<Option<Config>>),
    Object(Arc<dyn FindConfig>),
}

impl ConfigLocator {
    /// Wrap an async closure.
    pub fn from_fn<F, Fut>(f: F) -> Self
    where
        F: Fn(String) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Option<Config>, BoxError>> + Send + 'static,
    {
        ConfigLocator::Function(Arc::new(move |key: String| f(key).boxed()))
    }

    /// Wrap a plain lookup closure that cannot fail.
    pub fn from_sync_fn<F>(f: F) -> Self
    where
        F: Fn(&str) -> Option<Config> + Send + Sync + 'static,
    {
        ConfigLocator::Function(Arc::new(move |key: String| {
            let found = f(&key);
            async move { Ok::<_, BoxError>(found) }.boxed()
        }))
    }

    pub fn object<L: FindConfig + 'static>(locator: Arc<L>) -> Self {
        ConfigLocator::Object(locator)
    }

    /// Calling convention name, for diagnostics.
    pub fn shape(&self) -> &'static str {
        match self {
            ConfigLocator::Function(_) => "function",
            ConfigLocator::Object(_) => "object",
        }
    }

    /// Adapt to the uniform callable shape.
    pub fn normalize(&self) -> LocateFn<Option<Config>> {
        match self {
            ConfigLocator::Object(owner) => {
                let owner = Arc::clone(owner);
                Arc::new(move |key: String| {
                    let owner = Arc::clone(&owner);
                    async move { owner.find(&key).await }.boxed()
                })
            }
            ConfigLocator::Function(f) => Arc::clone(f),
        }
    }
}

impl fmt::Debug for ConfigLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ConfigLocator").field(&self.shape()).finish()
    }
}

/// Service locator in either calling convention.
#[derive(Clone)]
pub enum ServiceLocator {
    Function(LocateFn<ServiceRef>),
    Object(Arc<dyn LocateService>),
}

impl ServiceLocator {
    /// Wrap an async closure.
    pub fn from_fn<F, Fut>(f: F) -> Self
    where
        F: Fn(String) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<ServiceRef, BoxError>> + Send + 'static,
    {
        ServiceLocator::Function(Arc::new(move |key: String| f(key).boxed()))
    }

    /// Wrap a plain lookup closure.
    pub fn from_sync_fn<F>(f: F) -> Self
    where
        F: Fn(&str) -> Result<ServiceRef, BoxError> + Send + Sync + 'static,
    {
        ServiceLocator::Function(Arc::new(move |key: String| {
            let located = f(&key);
            async move { located }.boxed()
        }))
    }

    pub fn object<L: LocateService + 'static>(locator: Arc<L>) -> Self {
        ServiceLocator::Object(locator)
    }

    pub fn shape(&self) -> &'static str {
        match self {
            ServiceLocator::Function(_) => "function",
            ServiceLocator::Object(_) => "object",
        }
    }

    /// Adapt to the uniform callable shape.
    pub fn normalize(&self) -> LocateFn<ServiceRef> {
        match self {
            ServiceLocator::Object(owner) => {
                let owner = Arc::clone(owner);
                Arc::new(move |key: String| {
                    let owner = Arc::clone(&owner);
                    async move { owner.locate(&key).await }.boxed()
                })
            }
            ServiceLocator::Function(f) => Arc::clone(f),
        }
    }
}

impl fmt::Debug for ServiceLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ServiceLocator").field(&self.shape()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingStore {
        lookups: AtomicUsize,
    }

    #[async_trait]
    impl FindConfig for CountingStore {
        async fn find(&self, key: &str) -> Result<Option<Config>, BoxError> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            Ok(Some(json!({ "key": key })))
        }
    }

    #[tokio::test]
    async fn test_object_locator_stays_bound_to_owner() {
        let store = Arc::new(CountingStore {
            lookups: AtomicUsize::new(0),
        });
        let locator = ConfigLocator::object(Arc::clone(&store));
        assert_eq!(locator.shape(), "object");

        let find = locator.normalize();
        let first = find("a".into()).await.unwrap();
        find("b".into()).await.unwrap();

        assert_eq!(first, Some(json!({ "key": "a" })));
        assert_eq!(store.lookups.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_function_locator_is_passed_through() {
        let locator = ConfigLocator::from_sync_fn(|key| (key == "db").then(|| json!(1)));
        assert_eq!(locator.shape(), "function");

        let find = locator.normalize();
        assert_eq!(find("db".into()).await.unwrap(), Some(json!(1)));
        assert_eq!(find("cache".into()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_failing_service_lookup_propagates() {
        let locator = ServiceLocator::from_fn(|key| async move {
            Err::<ServiceRef, BoxError>(format!("no service {}", key).into())
        });

        let locate = locator.normalize();
        let err = match locate("ghost".into()).await {
            Err(err) => err,
            Ok(_) => panic!("lookup should fail"),
        };
        assert_eq!(err.to_string(), "no service ghost");
    }
}
