//! JSON-file preference store.
//!
//! Each scope lives in a single file holding a JSON object that maps keys to
//! adjacently tagged [`StoredValue`]s:
//!
//! ```text
//! {
//!   "flag": { "type": "bool", "value": true },
//!   "tags": { "type": "string_set", "value": ["a", "b"] }
//! }
//! ```
//!
//! The whole map is cached in memory. A commit writes the updated map to a
//! temporary file in the same directory and renames it over the scope file,
//! so readers of the file see either the old or the new contents. Each commit
//! re-reads the file before applying its changes, and the in-memory map is
//! only replaced once the rename has succeeded.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::editor::Change;
use crate::error::{StoreError, StoreResult};
use crate::keys::validate_key;
use crate::memory::apply_changes;
use crate::traits::PreferenceStore;
use crate::value::StoredValue;

/// Options for a [`FilePreferenceStore`].
#[derive(Clone, Debug)]
pub struct FileStoreConfig {
    /// `fsync` the scope file on every commit.
    pub sync_on_commit: bool,
}

impl Default for FileStoreConfig {
    fn default() -> Self {
        Self {
            sync_on_commit: true,
        }
    }
}

/// A [`PreferenceStore`] persisted as one JSON file per scope.
pub struct FilePreferenceStore {
    name: String,
    path: PathBuf,
    config: FileStoreConfig,
    entries: RwLock<BTreeMap<String, StoredValue>>,
}

impl FilePreferenceStore {
    /// Open (or create on first commit) the scope file at `path`.
    pub fn open(path: &Path, name: impl Into<String>, config: FileStoreConfig) -> StoreResult<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let name = name.into();
        let entries = load(path)?;
        debug!(scope = %name, path = %path.display(), entries = entries.len(), "scope file opened");

        Ok(Self {
            name,
            path: path.to_path_buf(),
            config,
            entries: RwLock::new(entries),
        })
    }

    /// Path of the backing scope file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Discard the in-memory cache and re-read the scope file.
    pub fn reload(&self) -> StoreResult<()> {
        let fresh = load(&self.path)?;
        let mut map = self
            .entries
            .write()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))?;
        *map = fresh;
        Ok(())
    }

    fn persist(&self, map: &BTreeMap<String, StoredValue>) -> StoreResult<()> {
        let json = serde_json::to_vec_pretty(map)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        // NamedTempFile is created with owner-only permissions on unix.
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(&json)?;
        tmp.flush()?;
        if self.config.sync_on_commit {
            tmp.as_file().sync_all()?;
        }
        tmp.persist(&self.path).map_err(|e| StoreError::Io(e.error))?;

        debug!(scope = %self.name, bytes = json.len(), "scope file written");
        Ok(())
    }
}

fn load(path: &Path) -> StoreResult<BTreeMap<String, StoredValue>> {
    if !path.exists() {
        return Ok(BTreeMap::new());
    }

    let contents = fs::read_to_string(path)?;
    if contents.trim().is_empty() {
        warn!(path = %path.display(), "empty scope file; starting from an empty scope");
        return Ok(BTreeMap::new());
    }

    serde_json::from_str(&contents).map_err(|e| StoreError::Corrupt {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

impl PreferenceStore for FilePreferenceStore {
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
        // Start from the file, not the cache, so commits made through other
        // handles on the same scope are kept.
        let mut next = load(&self.path)?;
        apply_changes(&mut next, changes);
        self.persist(&next)?;
        *map = next;
        Ok(())
    }
}

impl std::fmt::Debug for FilePreferenceStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilePreferenceStore")
            .field("name", &self.name)
            .field("path", &self.path)
            .finish()
    }
}
