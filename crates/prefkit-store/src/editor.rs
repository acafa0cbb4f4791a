//! Staged writes against a [`PreferenceStore`].
//!
//! An [`Editor`] collects puts and removes and hands them to the store in a
//! single [`PreferenceStore::apply`] call on [`Editor::commit`]. Nothing is
//! visible to readers before the commit. A pending `clear()` always runs
//! before the other staged changes, whatever order they were staged in.

use std::collections::BTreeSet;

use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::keys::validate_key;
use crate::traits::PreferenceStore;
use crate::value::StoredValue;

/// A single committed change.
#[derive(Clone, Debug, PartialEq)]
pub enum Change {
    /// Set `key` to `value`, replacing any previous entry.
    Put { key: String, value: StoredValue },
    /// Remove `key` if present.
    Remove { key: String },
    /// Remove every key in the scope.
    Clear,
}

/// A set of staged changes bound to one store.
pub struct Editor<'a> {
    store: &'a dyn PreferenceStore,
    clear: bool,
    changes: Vec<Change>,
}

impl<'a> Editor<'a> {
    /// Start an empty set of changes against `store`.
    pub fn new(store: &'a dyn PreferenceStore) -> Self {
        Self {
            store,
            clear: false,
            changes: Vec::new(),
        }
    }

    /// Stage `value` under `key`.
    ///
    /// Fails with [`StoreError::NonFiniteFloat`] for `NaN` and infinities.
    pub fn put(&mut self, key: &str, value: StoredValue) -> StoreResult<&mut Self> {
        validate_key(key)?;
        if let StoredValue::Float(v) = value {
            if !v.is_finite() {
                return Err(StoreError::NonFiniteFloat {
                    key: key.to_string(),
                    value: v,
                });
            }
        }
        self.changes.push(Change::Put {
            key: key.to_string(),
            value,
        });
        Ok(self)
    }

    pub fn put_bool(&mut self, key: &str, value: bool) -> StoreResult<&mut Self> {
        self.put(key, StoredValue::Bool(value))
    }

    pub fn put_float(&mut self, key: &str, value: f32) -> StoreResult<&mut Self> {
        self.put(key, StoredValue::Float(value))
    }

    pub fn put_int(&mut self, key: &str, value: i32) -> StoreResult<&mut Self> {
        self.put(key, StoredValue::Int(value))
    }

    pub fn put_long(&mut self, key: &str, value: i64) -> StoreResult<&mut Self> {
        self.put(key, StoredValue::Long(value))
    }

    pub fn put_string(&mut self, key: &str, value: impl Into<String>) -> StoreResult<&mut Self> {
        self.put(key, StoredValue::String(value.into()))
    }

    pub fn put_string_set(
        &mut self,
        key: &str,
        value: BTreeSet<String>,
    ) -> StoreResult<&mut Self> {
        self.put(key, StoredValue::StringSet(value))
    }

    /// Stage removal of `key`.
    pub fn remove(&mut self, key: &str) -> StoreResult<&mut Self> {
        validate_key(key)?;
        self.changes.push(Change::Remove {
            key: key.to_string(),
        });
        Ok(self)
    }

    /// Stage removal of every key in the scope.
    pub fn clear(&mut self) -> &mut Self {
        self.clear = true;
        self
    }

    /// Number of staged puts and removes (a pending clear is not counted).
    pub fn len(&self) -> usize {
        self.changes.len()
    }

    /// Returns `true` if nothing has been staged.
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty() && !self.clear
    }

    /// Apply all staged changes to the store.
    pub fn commit(self) -> StoreResult<()> {
        let mut changes = self.changes;
        if self.clear {
            changes.insert(0, Change::Clear);
        }
        self.store.apply(&changes)?;
        debug!(scope = self.store.name(), changes = changes.len(), "preferences committed");
        Ok(())
    }
}

impl std::fmt::Debug for Editor<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Editor")
            .field("scope", &self.store.name())
            .field("clear", &self.clear)
            .field("changes", &self.changes)
            .finish()
    }
}
