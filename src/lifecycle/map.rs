//! Bootstrap map: ordered service descriptors.
//!
//! Iteration order always equals declaration order. Services declared
//! later may rely on earlier ones having completed their bootstrap.

use std::collections::HashMap;
use std::fmt;

use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

use crate::lifecycle::error::BootstrapError;
use crate::lifecycle::validation::validate_bootstrap_map;

/// Per-entry activation descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Descriptor {
    /// `false`: declared but skipped, no locator calls.
    Inactive,
    /// `true`: the entry id is used verbatim as lookup key.
    Active,
    /// A string: used as the configuration lookup key.
    ConfigPath(String),
}

impl Descriptor {
    pub fn is_active(&self) -> bool {
        !matches!(self, Descriptor::Inactive)
    }
}

impl From<bool> for Descriptor {
    fn from(active: bool) -> Self {
        if active {
            Descriptor::Active
        } else {
            Descriptor::Inactive
        }
    }
}

impl From<&str> for Descriptor {
    fn from(path: &str) -> Self {
        Descriptor::ConfigPath(path.to_string())
    }
}

impl From<String> for Descriptor {
    fn from(path: String) -> Self {
        Descriptor::ConfigPath(path)
    }
}

impl Serialize for Descriptor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Descriptor::Inactive => serializer.serialize_bool(false),
            Descriptor::Active => serializer.serialize_bool(true),
            Descriptor::ConfigPath(path) => serializer.serialize_str(path),
        }
    }
}

impl<'de> Deserialize<'de> for Descriptor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct DescriptorVisitor;

        impl Visitor<'_> for DescriptorVisitor {
            type Value = Descriptor;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a boolean or a configuration path string")
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> Result<Descriptor, E> {
                Ok(Descriptor::from(v))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Descriptor, E> {
                Ok(Descriptor::from(v))
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<Descriptor, E> {
                Ok(Descriptor::from(v))
            }
        }

        deserializer.deserialize_any(DescriptorVisitor)
    }
}

/// Ordered mapping from service id to [`Descriptor`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BootstrapMap {
    entries: Vec<(String, Descriptor)>,
    /// Position of each id in `entries`.
    index: HashMap<String, usize>,
}

impl BootstrapMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a descriptor.
    ///
    /// Replacing keeps the entry at its original position, the way a
    /// re-assigned key keeps its place in a declared table.
    pub fn insert(&mut self, id: impl Into<String>, descriptor: impl Into<Descriptor>) {
        let id = id.into();
        let descriptor = descriptor.into();
        match self.index.get(&id) {
            Some(&position) => self.entries[position].1 = descriptor,
            None => {
                self.index.insert(id.clone(), self.entries.len());
                self.entries.push((id, descriptor));
            }
        }
    }

    /// Declare an active service keyed by its own id.
    pub fn activate(mut self, id: impl Into<String>) -> Self {
        self.insert(id, Descriptor::Active);
        self
    }

    /// Declare a service that must be skipped.
    pub fn skip(mut self, id: impl Into<String>) -> Self {
        self.insert(id, Descriptor::Inactive);
        self
    }

    /// Declare an active service whose configuration lives under `path`.
    pub fn with_config(mut self, id: impl Into<String>, path: impl Into<String>) -> Self {
        self.insert(id, Descriptor::ConfigPath(path.into()));
        self
    }

    pub fn get(&self, id: &str) -> Option<&Descriptor> {
        self.index
            .get(id)
            .map(|&position| &self.entries[position].1)
    }

    /// Entries in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Descriptor)> {
        self.entries.iter().map(|(id, d)| (id.as_str(), d))
    }

    /// Entries that will be activated, in declaration order.
    pub fn active(&self) -> impl Iterator<Item = (&str, &Descriptor)> {
        self.iter().filter(|(_, d)| d.is_active())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Build from an untyped value, rejecting anything but a keyed table
    /// of booleans and strings.
    pub fn from_value(value: &serde_json::Value) -> Result<Self, BootstrapError> {
        validate_bootstrap_map(value)
    }
}

impl TryFrom<serde_json::Value> for BootstrapMap {
    type Error = BootstrapError;

    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        Self::from_value(&value)
    }
}

impl<K, D> FromIterator<(K, D)> for BootstrapMap
where
    K: Into<String>,
    D: Into<Descriptor>,
{
    fn from_iter<I: IntoIterator<Item = (K, D)>>(iter: I) -> Self {
        let mut map = BootstrapMap::new();
        for (id, descriptor) in iter {
            map.insert(id, descriptor);
        }
        map
    }
}

impl Serialize for BootstrapMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (id, descriptor) in &self.entries {
            map.serialize_entry(id, descriptor)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for BootstrapMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct MapVisitor;

        impl<'de> Visitor<'de> for MapVisitor {
            type Value = BootstrapMap;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a table of service ids to descriptors")
            }

            // Entries are taken in the order the source declares them.
            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<BootstrapMap, A::Error> {
                let mut map = BootstrapMap::new();
                while let Some((id, descriptor)) = access.next_entry::<String, Descriptor>()? {
                    map.insert(id, descriptor);
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(MapVisitor)
    }
}
