//! Lookup key derivation and configuration resolution.
//!
//! # Data Flow
//! ```text
//! (id, descriptor)
//!     → EntryKeys::derive (service key, config key)
//!     → ConfigPathResolver::resolve
//!         1. find(config key)
//!         2. absent? find(simplified key), e.g. "@acme/mailer" → "mailer"
//!         3. still absent? proceed without configuration
//! ```
//!
//! # Design Decisions
//! - Only a leading segment that starts with the namespace marker is stripped
//! - The fallback lookup is skipped when simplification changes nothing
//! - A `null` configuration counts as absent

use serde::{Deserialize, Serialize};

use crate::lifecycle::error::BoxError;
use crate::lifecycle::locator::LocateFn;
use crate::lifecycle::map::Descriptor;
use crate::lifecycle::service::Config;

/// How a string descriptor is applied to the lookup keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyNaming {
    /// The string renames the configuration key only.
    #[default]
    ConfigPath,
    /// The string renames both the service key and the configuration key.
    ServiceName,
}

/// Effective lookup keys of an active entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryKeys {
    pub id: String,
    pub service_key: String,
    pub config_key: String,
}

impl EntryKeys {
    /// `None` for inactive entries.
    pub fn derive(id: &str, descriptor: &Descriptor, naming: KeyNaming) -> Option<Self> {
        let (service_key, config_key) = match (descriptor, naming) {
            (Descriptor::Inactive, _) => return None,
            (Descriptor::Active, _) => (id, id),
            (Descriptor::ConfigPath(path), KeyNaming::ConfigPath) => (id, path.as_str()),
            (Descriptor::ConfigPath(path), KeyNaming::ServiceName) => (path.as_str(), path.as_str()),
        };

        Some(Self {
            id: id.to_string(),
            service_key: service_key.to_string(),
            config_key: config_key.to_string(),
        })
    }
}

/// Namespace marker and segment separator used to simplify keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NamespaceRule {
    pub marker: char,
    pub separator: char,
}

impl Default for NamespaceRule {
    fn default() -> Self {
        Self {
            marker: '@',
            separator: '/',
        }
    }
}

impl NamespaceRule {
    pub fn new(marker: char, separator: char) -> Self {
        Self { marker, separator }
    }

    /// Strip a leading namespaced segment.
    ///
    /// Returns `None` when the key has no such segment or nothing would
    /// remain after stripping it.
    pub fn simplify<'k>(&self, key: &'k str) -> Option<&'k str> {
        let (head, rest) = key.split_once(self.separator)?;
        if head.starts_with(self.marker) && !rest.is_empty() {
            Some(rest)
        } else {
            None
        }
    }
}

/// Outcome of a configuration lookup.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResolvedConfig {
    pub config: Option<Config>,
    /// Key the configuration was found under.
    pub key: Option<String>,
}

/// Resolves configuration with the namespace fallback.
#[derive(Clone)]
pub struct ConfigPathResolver {
    locate: LocateFn<Option<Config>>,
    namespace: NamespaceRule,
}

impl ConfigPathResolver {
    pub fn new(locate: LocateFn<Option<Config>>, namespace: NamespaceRule) -> Self {
        Self { locate, namespace }
    }

    pub async fn resolve(&self, key: &str) -> Result<ResolvedConfig, BoxError> {
        if let Some(config) = self.lookup(key).await? {
            return Ok(ResolvedConfig {
                config: Some(config),
                key: Some(key.to_string()),
            });
        }

        if let Some(simplified) = self.namespace.simplify(key) {
            tracing::debug!(key, simplified, "Config not found, retrying with simplified key");
            if let Some(config) = self.lookup(simplified).await? {
                return Ok(ResolvedConfig {
                    config: Some(config),
                    key: Some(simplified.to_string()),
                });
            }
        }

        Ok(ResolvedConfig::default())
    }

    async fn lookup(&self, key: &str) -> Result<Option<Config>, BoxError> {
        let found = (self.locate)(key.to_string()).await?;
        Ok(found.filter(|config| !config.is_null()))
    }
}
