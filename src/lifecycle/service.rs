//! Service activation.
//!
//! # Responsibilities
//! - Resolve the service instance, then its configuration
//! - Check the lifecycle capability right before invoking it
//! - Wrap every per-entry failure with the failing service key
//!
//! # Design Decisions
//! - A service without a lifecycle is a typed absence, checked via `Service::lifecycle`
//! - Absent configuration is passed through, never an error
//! - One log record per service reached, config present or absent

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;

use crate::lifecycle::config_path::{ConfigPathResolver, EntryKeys};
use crate::lifecycle::error::{BootstrapError, BoxError};
use crate::lifecycle::locator::LocateFn;
use crate::observability::metrics;

/// Opaque configuration value handed to a service.
pub type Config = serde_json::Value;

/// Shared handle to a located service.
pub type ServiceRef = Arc<dyn Service>;

/// A value returned by a service locator.
pub trait Service: Send + Sync {
    /// The startup lifecycle, when the service has one.
    fn lifecycle(&self) -> Option<&dyn Lifecycle> {
        None
    }
}

/// One-time startup call made with the resolved configuration.
#[async_trait]
pub trait Lifecycle: Send + Sync {
    async fn bootstrap(&self, config: Option<Config>) -> Result<(), BoxError>;
}

/// Activate one entry. Returns the config key that resolved, if any.
pub(crate) async fn activate(
    keys: &EntryKeys,
    locate_service: &LocateFn<ServiceRef>,
    resolver: &ConfigPathResolver,
) -> Result<Option<String>, BootstrapError> {
    let started = Instant::now();
    let result = try_activate(keys, locate_service, resolver).await;
    metrics::record_service_duration(started.elapsed());

    match result {
        Ok(resolved_key) => {
            metrics::record_service_outcome("bootstrapped");
            Ok(resolved_key)
        }
        Err(source) => {
            metrics::record_service_outcome("failed");
            tracing::error!(
                service = %keys.service_key,
                error = %source,
                "Service bootstrap failed"
            );
            Err(BootstrapError::BootstrapFailed {
                service: keys.service_key.clone(),
                source,
            })
        }
    }
}

async fn try_activate(
    keys: &EntryKeys,
    locate_service: &LocateFn<ServiceRef>,
    resolver: &ConfigPathResolver,
) -> Result<Option<String>, BoxError> {
    let service = locate_service(keys.service_key.clone()).await?;
    let resolved = resolver.resolve(&keys.config_key).await?;

    match &resolved.key {
        Some(resolved_key) => tracing::info!(
            service = %keys.service_key,
            config_key = %keys.config_key,
            resolved_key = %resolved_key,
            "Bootstrapping service with configuration"
        ),
        None => tracing::info!(
            service = %keys.service_key,
            config_key = %keys.config_key,
            "Bootstrapping service without configuration"
        ),
    }

    let lifecycle = service
        .lifecycle()
        .ok_or_else(|| BootstrapError::InvalidServiceInterface {
            service: keys.service_key.clone(),
        })?;
    lifecycle.bootstrap(resolved.config).await?;

    Ok(resolved.key)
}
