//! Item catalog — static card metadata keyed by item id.
//!
//! The catalog file is a JSON object of `{ "<id>": { "name": "...", ... } }`.
//! It is loaded once at startup and shared read-only (typically behind an
//! `Arc`) with everything that needs name resolution.

use super::error::DataError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::Path;

/// Metadata for one catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardDefinition {
    pub name: String,
    /// Any other fields present in the catalog file.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default)]
pub struct ItemCatalog {
    /// Entries in file order.
    entries: Vec<(String, CardDefinition)>,
    by_id: HashMap<String, usize>,
}

impl ItemCatalog {
    /// Load the catalog from a JSON file.
    pub fn load(path: &Path) -> Result<Self, DataError> {
        let content = std::fs::read_to_string(path).map_err(|e| DataError::io(path, e))?;
        Self::from_json(&content).map_err(|e| DataError::parse(path, e))
    }

    /// Parse a catalog from a JSON string.
    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        let raw: Map<String, Value> = serde_json::from_str(content)?;
        let mut catalog = Self::default();
        for (id, value) in raw {
            let def: CardDefinition = serde_json::from_value(value)?;
            catalog.insert(id, def);
        }
        Ok(catalog)
    }

    /// Build a catalog from `(id, name)` pairs.
    pub fn from_names<I, K, N>(names: I) -> Self
    where
        I: IntoIterator<Item = (K, N)>,
        K: Into<String>,
        N: Into<String>,
    {
        let mut catalog = Self::default();
        for (id, name) in names {
            catalog.insert(
                id.into(),
                CardDefinition {
                    name: name.into(),
                    extra: Map::new(),
                },
            );
        }
        catalog
    }

    fn insert(&mut self, id: String, def: CardDefinition) {
        match self.by_id.get(&id) {
            Some(&pos) => self.entries[pos].1 = def,
            None => {
                self.by_id.insert(id.clone(), self.entries.len());
                self.entries.push((id, def));
            }
        }
    }

    /// All ids whose name equals `name`, ignoring case, in catalog order.
    pub fn ids_for_name(&self, name: &str) -> Vec<&str> {
        let wanted = name.to_lowercase();
        self.entries
            .iter()
            .filter(|(_, def)| def.name.to_lowercase() == wanted)
            .map(|(id, _)| id.as_str())
            .collect()
    }

    /// The last id matching `name` (the most recent printing).
    pub fn last_id_for_name(&self, name: &str) -> Option<&str> {
        self.ids_for_name(name).pop()
    }

    pub fn get(&self, id: &str) -> Option<&CardDefinition> {
        self.by_id.get(id).map(|&pos| &self.entries[pos].1)
    }

    pub fn name_of(&self, id: &str) -> Option<&str> {
        self.get(id).map(|def| def.name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CardDefinition)> {
        self.entries.iter().map(|(id, def)| (id.as_str(), def))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
