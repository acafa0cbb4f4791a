//! In-memory preference store for testing and ephemeral use.
//!
//! [`InMemoryPreferenceStore`] keeps its entries in a `BTreeMap` protected by
//! a `RwLock`. Data is lost when the store is dropped.

use std::collections::BTreeMap;
use std::sync::RwLock;

use crate::editor::Change;
use crate::error::{StoreError, StoreResult};
use crate::keys::validate_key;
use crate::traits::PreferenceStore;
use crate::value::StoredValue;

/// An in-memory implementation of [`PreferenceStore`].
pub struct InMemoryPreferenceStore {
    name: String,
    entries: RwLock<BTreeMap<String, StoredValue>>,
}

impl InMemoryPreferenceStore {
    /// Create a new empty store for the scope `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: RwLock::new(BTreeMap::new()),
        }
    }

    /// Number of keys currently set.
    pub fn len(&self) -> usize {
        self.entries.read().expect("lock poisoned").len()
    }

    /// Returns `true` if no key is set.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Apply `changes` in order to an entry map. Shared with the file backend.
pub(crate) fn apply_changes(map: &mut BTreeMap<String, StoredValue>, changes: &[Change]) {
    for change in changes {
        match change {
            Change::Put { key, value } => {
                map.insert(key.clone(), value.clone());
            }
            Change::Remove { key } => {
                map.remove(key);
            }
            Change::Clear => map.clear(),
        }
    }
}

impl PreferenceStore for InMemoryPreferenceStore {
    fn name(&self) -> &str {
        &self.name
    }

    fn read(&self, key: &str) -> StoreResult<Option<StoredValue>> {
        validate_key(key)?;
        let map = self
            .entries
            .read()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))?;
        Ok(map.get(key).cloned())
    }

    fn keys(&self) -> StoreResult<Vec<String>> {
        let map = self
            .entries
            .read()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))?;
        Ok(map.keys().cloned().collect())
    }

    fn apply(&self, changes: &[Change]) -> StoreResult<()> {
        let mut map = self
            .entries
            .write()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))?;
        apply_changes(&mut map, changes);
        Ok(())
    }
}

impl std::fmt::Debug for InMemoryPreferenceStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryPreferenceStore")
            .field("name", &self.name)
            .field("entry_count", &self.len())
            .finish()
    }
}
