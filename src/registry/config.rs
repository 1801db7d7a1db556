//! Flat configuration table.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;

use crate::lifecycle::{BoxError, Config, ConfigLocator, FindConfig};

/// A thread-safe key → configuration map.
#[derive(Clone, Default, Debug)]
pub struct ConfigTable {
    inner: Arc<DashMap<String, Config>>,
}

impl ConfigTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert every top-level key of a JSON object.
    ///
    /// Non-object values are ignored. Existing keys are overwritten.
    pub fn assign(&self, values: Config) {
        if let Config::Object(table) = values {
            for (key, value) in table {
                self.inner.insert(key, value);
            }
        }
    }

    pub fn insert(&self, key: impl Into<String>, value: Config) {
        self.inner.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<Config> {
        self.inner.get(key).map(|entry| entry.value().clone())
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Share this table as a config locator.
    pub fn locator(&self) -> ConfigLocator {
        ConfigLocator::object(Arc::new(self.clone()))
    }
}

impl From<serde_json::Map<String, Config>> for ConfigTable {
    fn from(table: serde_json::Map<String, Config>) -> Self {
        let config = ConfigTable::new();
        config.assign(Config::Object(table));
        config
    }
}

#[async_trait]
impl FindConfig for ConfigTable {
    async fn find(&self, key: &str) -> Result<Option<Config>, BoxError> {
        Ok(self.get(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_assign_spreads_top_level_keys() {
        let config = ConfigTable::new();
        config.assign(json!({
            "serviceA": { "foo": "bar" },
            "serviceB": { "baz": "qux" },
        }));
        config.assign(json!("ignored"));

        assert_eq!(config.len(), 2);
        assert_eq!(config.get("serviceA"), Some(json!({ "foo": "bar" })));
        assert_eq!(config.get("serviceC"), None);
    }

    #[tokio::test]
    async fn test_find_through_locator() {
        let config = ConfigTable::new();
        config.insert("db", json!({ "pool": 4 }));

        let find = config.locator().normalize();
        assert_eq!(find("db".into()).await.unwrap(), Some(json!({ "pool": 4 })));
        assert_eq!(find("cache".into()).await.unwrap(), None);
    }
}
