// ABOUTME: Variable store seam between the resolution engine and its host
// ABOUTME: Includes an ordered in-memory store that loads JSON variable snapshots

use async_trait::async_trait;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;
use swatchbook_logging::{debug, warn};
use swatchbook_types::{VariableCollection, VariableRecord};

use crate::error::StoreError;

/// Access to the host's variables and collections.
///
/// Every call may suspend. Implementations are passed explicitly to the
/// resolver and batch functions; nothing in the engine reaches for a global.
#[async_trait]
pub trait VariableStore: Send + Sync {
    /// Look up a single variable. `Ok(None)` means the id is unknown.
    async fn get_variable_by_id(&self, id: &str) -> Result<Option<VariableRecord>, StoreError>;

    /// All variables belonging to a collection, in host order
    async fn list_variables(&self, collection_id: &str) -> Result<Vec<VariableRecord>, StoreError>;

    /// All local variable collections with their modes
    async fn list_collections(&self) -> Result<Vec<VariableCollection>, StoreError>;
}

/// Serialized form of a host export: `{ "collections": [...], "variables": [...] }`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub collections: Vec<VariableCollection>,
    #[serde(default)]
    pub variables: Vec<VariableRecord>,
}

/// Ordered in-memory variable store
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    collections: Vec<VariableCollection>,
    variables: IndexMap<String, VariableRecord>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        let mut store = Self {
            collections: snapshot.collections,
            variables: IndexMap::with_capacity(snapshot.variables.len()),
        };
        for variable in snapshot.variables {
            store.insert_variable(variable);
        }
        store
    }

    pub fn from_json_str(json: &str) -> Result<Self, StoreError> {
        let snapshot: Snapshot = serde_json::from_str(json)?;
        debug!(
            collection_count = snapshot.collections.len(),
            variable_count = snapshot.variables.len(),
            "Loaded variable snapshot"
        );
        Ok(Self::from_snapshot(snapshot))
    }

    /// Read a JSON snapshot from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn with_collection(mut self, collection: VariableCollection) -> Self {
        self.collections.push(collection);
        self
    }

    pub fn with_variable(mut self, variable: VariableRecord) -> Self {
        self.insert_variable(variable);
        self
    }

    /// Insert a variable. A duplicate id replaces the earlier record in place.
    pub fn insert_variable(&mut self, variable: VariableRecord) {
        if let Some(previous) = self.variables.insert(variable.id.clone(), variable) {
            warn!(variable_id = %previous.id, "Duplicate variable id in store, keeping the later record");
        }
    }

    /// Find a collection by id or case-insensitive name
    pub fn collection(&self, key: &str) -> Option<&VariableCollection> {
        self.collections
            .iter()
            .find(|collection| collection.id == key)
            .or_else(|| self.collections.iter().find(|c| c.matches(key)))
    }

    pub fn collections(&self) -> &[VariableCollection] {
        &self.collections
    }

    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }
}

#[async_trait]
impl VariableStore for InMemoryStore {
    async fn get_variable_by_id(&self, id: &str) -> Result<Option<VariableRecord>, StoreError> {
        Ok(self.variables.get(id).cloned())
    }

    async fn list_variables(&self, collection_id: &str) -> Result<Vec<VariableRecord>, StoreError> {
        Ok(self
            .variables
            .values()
            .filter(|variable| variable.variable_collection_id == collection_id)
            .cloned()
            .collect())
    }

    async fn list_collections(&self) -> Result<Vec<VariableCollection>, StoreError> {
        Ok(self.collections.clone())
    }
}
