//! Manifest schema definitions.
//!
//! ```toml
//! [settings]
//! label = "api"
//! naming = "config_path"      # or "service_name"
//! namespace_marker = "@"
//! path_separator = "/"
//! log_level = "info"
//!
//! [bootstrap]
//! database = true
//! legacy = false
//! "@acme/mailer" = "@acme/mailer"
//!
//! [config.database]
//! url = "postgres://localhost/app"
//!
//! [config.mailer]
//! relay = "smtp.local"
//! ```

use serde::{Deserialize, Serialize};

use crate::lifecycle::{BootstrapMap, Bootstrapper, KeyNaming, NamespaceRule};
use crate::registry::ConfigTable;

/// Root of a bootstrap manifest.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct Manifest {
    /// Run settings.
    pub settings: SettingsConfig,

    /// Services to bootstrap, in order.
    pub bootstrap: BootstrapMap,

    /// Configuration values keyed by lookup key.
    pub config: serde_json::Map<String, serde_json::Value>,
}

/// Run settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SettingsConfig {
    /// Label attached to every log record of a run.
    pub label: String,

    /// How string descriptors rename lookup keys.
    pub naming: KeyNaming,

    /// First character of a namespaced key segment.
    pub namespace_marker: char,

    /// Separator between key segments.
    pub path_separator: char,

    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for SettingsConfig {
    fn default() -> Self {
        let namespace = NamespaceRule::default();
        Self {
            label: "bootstrap".to_string(),
            naming: KeyNaming::default(),
            namespace_marker: namespace.marker,
            path_separator: namespace.separator,
            log_level: "info".to_string(),
        }
    }
}

impl SettingsConfig {
    pub fn namespace(&self) -> NamespaceRule {
        NamespaceRule::new(self.namespace_marker, self.path_separator)
    }
}

impl Manifest {
    /// The `[config]` table as a config locator source.
    pub fn config_table(&self) -> ConfigTable {
        ConfigTable::from(self.config.clone())
    }

    /// A runner with the map, settings and config locator applied.
    ///
    /// The service locator is left to the caller.
    pub fn bootstrapper(&self) -> Bootstrapper {
        Bootstrapper::new()
            .map(self.bootstrap.clone())
            .config_locator(self.config_table().locator())
            .naming(self.settings.naming)
            .namespace(self.settings.namespace())
            .label(self.settings.label.clone())
    }
}
