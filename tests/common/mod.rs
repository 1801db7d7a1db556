//! Shared fixtures for integration tests.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use service_bootstrap::lifecycle::{
    BoxError, Config, ConfigLocator, Lifecycle, Service, ServiceLocator, ServiceRef,
};
use service_bootstrap::registry::{ConfigTable, ServiceRegistry};

/// Ordered log of every locator call and lifecycle call.
#[derive(Clone, Default)]
pub struct Journal {
    events: Arc<Mutex<Vec<String>>>,
}

impl Journal {
    pub fn push(&self, event: impl Into<String>) {
        self.events.lock().unwrap().push(event.into());
    }

    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    /// Events starting with `prefix`, with the prefix removed.
    pub fn with_prefix(&self, prefix: &str) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| e.strip_prefix(prefix).map(str::to_string))
            .collect()
    }
}

/// How a [`RecordingService`] behaves when bootstrapped.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Behavior {
    Succeed,
    Fail,
    /// Sleep before succeeding.
    Slow(Duration),
}

/// Service that journals its lifecycle call and keeps the config it got.
pub struct RecordingService {
    name: String,
    journal: Journal,
    behavior: Behavior,
    received: Mutex<Vec<Option<Config>>>,
}

impl RecordingService {
    pub fn new(name: &str, journal: &Journal, behavior: Behavior) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            journal: journal.clone(),
            behavior,
            received: Mutex::new(Vec::new()),
        })
    }

    pub fn received(&self) -> Vec<Option<Config>> {
        self.received.lock().unwrap().clone()
    }
}

impl Service for RecordingService {
    fn lifecycle(&self) -> Option<&dyn Lifecycle> {
        Some(self)
    }
}

#[async_trait]
impl Lifecycle for RecordingService {
    async fn bootstrap(&self, config: Option<Config>) -> Result<(), BoxError> {
        if let Behavior::Slow(delay) = self.behavior {
            tokio::time::sleep(delay).await;
        }
        self.received.lock().unwrap().push(config);
        self.journal.push(format!("bootstrap:{}", self.name));

        match self.behavior {
            Behavior::Fail => Err(format!("bootstrap for {} exploded", self.name).into()),
            _ => Ok(()),
        }
    }
}

/// Service with no lifecycle at all.
pub struct PlainService;

impl Service for PlainService {}

/// Config locator over `table` that journals each lookup as `config:<key>`.
#[allow(dead_code)]
pub fn journaled_config(table: &ConfigTable, journal: &Journal) -> ConfigLocator {
    let table = table.clone();
    let journal = journal.clone();
    ConfigLocator::from_fn(move |key| {
        let table = table.clone();
        let journal = journal.clone();
        async move {
            tokio::task::yield_now().await;
            journal.push(format!("config:{}", key));
            Ok(table.get(&key))
        }
    })
}

/// Service locator over `registry` that journals each lookup as `locate:<key>`.
#[allow(dead_code)]
pub fn journaled_services(registry: &ServiceRegistry, journal: &Journal) -> ServiceLocator {
    let registry = registry.clone();
    let journal = journal.clone();
    ServiceLocator::from_fn(move |key| {
        let registry = registry.clone();
        let journal = journal.clone();
        async move {
            tokio::task::yield_now().await;
            journal.push(format!("locate:{}", key));
            registry.get(&key).map_err(|e| -> BoxError { Box::new(e) })
        }
    })
}

/// Service locator that rejects every lookup.
#[allow(dead_code)]
pub fn unreachable_services() -> ServiceLocator {
    ServiceLocator::from_sync_fn(|key| -> Result<ServiceRef, BoxError> {
        Err(format!("service {} was looked up", key).into())
    })
}
