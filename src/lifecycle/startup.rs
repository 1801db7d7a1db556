//! Startup orchestration.
//!
//! # Responsibilities
//! - Validate the bootstrap map and both locators before any lookup
//! - Normalize the locators once per run
//! - Walk the map in declaration order, skipping inactive entries
//! - Activate each service, aborting on the first failure
//!
//! # Design Decisions
//! - Fail fast: the first failed entry ends the run, nothing is rolled back
//! - Entries run one at a time, never concurrently
//! - No retries and no timeouts

use std::borrow::Cow;

use serde::Serialize;
use tracing::Instrument;
use uuid::Uuid;

use crate::lifecycle::config_path::{ConfigPathResolver, EntryKeys, KeyNaming, NamespaceRule};
use crate::lifecycle::error::{BootstrapError, BootstrapResult};
use crate::lifecycle::locator::{ConfigLocator, ServiceLocator};
use crate::lifecycle::map::BootstrapMap;
use crate::lifecycle::service;
use crate::lifecycle::validation::{
    missing_bootstrap_map, validate_bootstrap_map, validate_config_locator,
    validate_service_locator,
};
use crate::observability::metrics;

const DEFAULT_LABEL: &str = "bootstrap";

/// A bootstrap map as supplied by the caller.
#[derive(Debug, Clone)]
pub enum MapInput {
    Typed(BootstrapMap),
    /// Untyped table, checked before use.
    Value(serde_json::Value),
}

impl From<BootstrapMap> for MapInput {
    fn from(map: BootstrapMap) -> Self {
        MapInput::Typed(map)
    }
}

impl From<serde_json::Value> for MapInput {
    fn from(value: serde_json::Value) -> Self {
        MapInput::Value(value)
    }
}

/// What happened to one entry of a successful run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum EntryOutcome {
    Skipped {
        id: String,
    },
    Bootstrapped {
        id: String,
        service_key: String,
        config_key: String,
        /// Key the configuration was found under; `None` when absent.
        resolved_key: Option<String>,
    },
}

impl EntryOutcome {
    pub fn id(&self) -> &str {
        match self {
            EntryOutcome::Skipped { id } | EntryOutcome::Bootstrapped { id, .. } => id,
        }
    }
}

/// Per-entry outcomes of a successful run, in map order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BootstrapReport {
    pub outcomes: Vec<EntryOutcome>,
}

impl BootstrapReport {
    pub fn bootstrapped(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, EntryOutcome::Bootstrapped { .. }))
            .count()
    }

    pub fn skipped(&self) -> usize {
        self.outcomes.len() - self.bootstrapped()
    }
}

/// One entry of a dry run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedEntry {
    pub id: String,
    pub active: bool,
    pub service_key: Option<String>,
    pub config_key: Option<String>,
    /// Simplified key tried when the config key yields nothing.
    pub fallback_key: Option<String>,
}

/// Builder and runner for a bootstrap sequence.
#[derive(Debug, Clone)]
pub struct Bootstrapper {
    map: Option<MapInput>,
    config_locator: Option<ConfigLocator>,
    service_locator: Option<ServiceLocator>,
    naming: KeyNaming,
    namespace: NamespaceRule,
    label: String,
}

impl Default for Bootstrapper {
    fn default() -> Self {
        Self::new()
    }
}

impl Bootstrapper {
    pub fn new() -> Self {
        Self {
            map: None,
            config_locator: None,
            service_locator: None,
            naming: KeyNaming::default(),
            namespace: NamespaceRule::default(),
            label: DEFAULT_LABEL.to_string(),
        }
    }

    pub fn map(mut self, map: impl Into<MapInput>) -> Self {
        self.map = Some(map.into());
        self
    }

    pub fn config_locator(mut self, locator: ConfigLocator) -> Self {
        self.config_locator = Some(locator);
        self
    }

    pub fn service_locator(mut self, locator: ServiceLocator) -> Self {
        self.service_locator = Some(locator);
        self
    }

    pub fn naming(mut self, naming: KeyNaming) -> Self {
        self.naming = naming;
        self
    }

    pub fn namespace(mut self, namespace: NamespaceRule) -> Self {
        self.namespace = namespace;
        self
    }

    /// Label attached to every log record of the run.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    fn validated_map(&self) -> BootstrapResult<Cow<'_, BootstrapMap>> {
        match &self.map {
            Some(MapInput::Typed(map)) => Ok(Cow::Borrowed(map)),
            Some(MapInput::Value(value)) => validate_bootstrap_map(value).map(Cow::Owned),
            None => Err(missing_bootstrap_map()),
        }
    }

    /// Lookup keys each entry would use, without calling any locator.
    pub fn plan(&self) -> BootstrapResult<Vec<PlannedEntry>> {
        let map = self.validated_map()?;
        let planned = map
            .iter()
            .map(|(id, descriptor)| {
                let keys = EntryKeys::derive(id, descriptor, self.naming);
                let fallback_key = keys
                    .as_ref()
                    .and_then(|k| self.namespace.simplify(&k.config_key))
                    .map(str::to_string);
                PlannedEntry {
                    id: id.to_string(),
                    active: keys.is_some(),
                    service_key: keys.as_ref().map(|k| k.service_key.clone()),
                    config_key: keys.map(|k| k.config_key),
                    fallback_key,
                }
            })
            .collect();
        Ok(planned)
    }

    /// Validate the inputs, then bootstrap every active entry in order.
    pub async fn run(&self) -> BootstrapResult<BootstrapReport> {
        let map = self.validated_map()?;
        let config_locator = validate_config_locator(self.config_locator.as_ref())?;
        let service_locator = validate_service_locator(self.service_locator.as_ref())?;

        let resolver = ConfigPathResolver::new(config_locator.normalize(), self.namespace);
        let locate_service = service_locator.normalize();

        let span = tracing::info_span!(
            "bootstrap",
            label = %self.label,
            run_id = %Uuid::new_v4()
        );

        async move {
            tracing::info!(entries = map.len(), "Bootstrap sequence starting");
            let mut report = BootstrapReport::default();

            for (id, descriptor) in map.iter() {
                let Some(keys) = EntryKeys::derive(id, descriptor, self.naming) else {
                    tracing::debug!(service = id, "Skipping inactive service");
                    metrics::record_service_outcome("skipped");
                    report.outcomes.push(EntryOutcome::Skipped { id: id.to_string() });
                    continue;
                };

                let resolved_key = service::activate(&keys, &locate_service, &resolver).await?;
                report.outcomes.push(EntryOutcome::Bootstrapped {
                    id: keys.id,
                    service_key: keys.service_key,
                    config_key: keys.config_key,
                    resolved_key,
                });
            }

            tracing::info!(
                bootstrapped = report.bootstrapped(),
                skipped = report.skipped(),
                "Bootstrap sequence complete"
            );
            Ok::<_, BootstrapError>(report)
        }
        .instrument(span)
        .await
    }
}

/// Bootstrap every service declared in `map`, in declaration order.
pub async fn bootstrap(
    map: impl Into<MapInput>,
    config_locator: ConfigLocator,
    service_locator: ServiceLocator,
) -> Result<BootstrapReport, BootstrapError> {
    Bootstrapper::new()
        .map(map)
        .config_locator(config_locator)
        .service_locator(service_locator)
        .run()
        .await
}
