//! The [`PreferenceStore`] trait defining the preference storage interface.
//!
//! Any backend (in-memory, JSON file, platform store) implements this trait
//! to provide one flat, string-keyed scope of typed values.

use std::collections::BTreeSet;

use crate::editor::{Change, Editor};
use crate::error::{StoreError, StoreResult};
use crate::value::{StoredValue, ValueKind};

/// Storage backend for one preference scope.
///
/// Implementations must be thread-safe (`Send + Sync`) and serialise their
/// own writes. All invariants:
/// - A key maps to at most one [`StoredValue`] at a time.
/// - A missing key is never an error; typed reads resolve it to the
///   caller-supplied default.
/// - Reading a key with a type other than the one it was written with fails
///   with [`StoreError::TypeMismatch`].
/// - Changes become visible only after [`Editor::commit`].
pub trait PreferenceStore: Send + Sync {
    /// The scope name this store was opened for (e.g. `"user"`).
    fn name(&self) -> &str;

    /// Read the raw entry under `key`.
    ///
    /// Returns `Ok(None)` if the key is not set.
    fn read(&self, key: &str) -> StoreResult<Option<StoredValue>>;

    /// All keys currently set, sorted.
    fn keys(&self) -> StoreResult<Vec<String>>;

    /// Apply a committed set of changes, in order.
    ///
    /// Called by [`Editor::commit`]; keys have already been validated.
    fn apply(&self, changes: &[Change]) -> StoreResult<()>;

    /// Check whether `key` is set.
    fn contains(&self, key: &str) -> StoreResult<bool> {
        Ok(self.read(key)?.is_some())
    }

    /// Start a new set of staged changes against this store.
    fn edit(&self) -> Editor<'_>
    where
        Self: Sized,
    {
        Editor::new(self)
    }

    /// Read a boolean entry, or `default` if unset.
    fn get_bool(&self, key: &str, default: bool) -> StoreResult<bool> {
        match self.read(key)? {
            None => Ok(default),
            Some(StoredValue::Bool(v)) => Ok(v),
            Some(other) => Err(mismatch(key, ValueKind::Bool, &other)),
        }
    }

    /// Read a float entry, or `default` if unset.
    fn get_float(&self, key: &str, default: f32) -> StoreResult<f32> {
        match self.read(key)? {
            None => Ok(default),
            Some(StoredValue::Float(v)) => Ok(v),
            Some(other) => Err(mismatch(key, ValueKind::Float, &other)),
        }
    }

    /// Read a 32-bit integer entry, or `default` if unset.
    fn get_int(&self, key: &str, default: i32) -> StoreResult<i32> {
        match self.read(key)? {
            None => Ok(default),
            Some(StoredValue::Int(v)) => Ok(v),
            Some(other) => Err(mismatch(key, ValueKind::Int, &other)),
        }
    }

    /// Read a 64-bit integer entry, or `default` if unset.
    fn get_long(&self, key: &str, default: i64) -> StoreResult<i64> {
        match self.read(key)? {
            None => Ok(default),
            Some(StoredValue::Long(v)) => Ok(v),
            Some(other) => Err(mismatch(key, ValueKind::Long, &other)),
        }
    }

    /// Read a string entry, or `default` if unset.
    fn get_string(&self, key: &str, default: String) -> StoreResult<String> {
        match self.read(key)? {
            None => Ok(default),
            Some(StoredValue::String(v)) => Ok(v),
            Some(other) => Err(mismatch(key, ValueKind::String, &other)),
        }
    }

    /// Read a string-set entry, or `default` if unset.
    fn get_string_set(
        &self,
        key: &str,
        default: BTreeSet<String>,
    ) -> StoreResult<BTreeSet<String>> {
        match self.read(key)? {
            None => Ok(default),
            Some(StoredValue::StringSet(v)) => Ok(v),
            Some(other) => Err(mismatch(key, ValueKind::StringSet, &other)),
        }
    }
}

fn mismatch(key: &str, expected: ValueKind, found: &StoredValue) -> StoreError {
    StoreError::TypeMismatch {
        key: key.to_string(),
        expected,
        found: found.kind(),
    }
}
