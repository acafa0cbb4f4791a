use std::fs;
use std::path::{Path, PathBuf};

use prefkit_store::FileStoreConfig;
use serde::{Deserialize, Serialize};

use crate::error::{PrefsError, Result};
use crate::scope::Scope;

/// Where and how file-backed scopes are persisted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrefsConfig {
    /// Directory holding one `<scope>.json` file per scope.
    pub root_dir: PathBuf,
    /// `fsync` scope files on every commit.
    pub sync_on_commit: bool,
}

impl Default for PrefsConfig {
    fn default() -> Self {
        Self {
            root_dir: default_root_dir(),
            sync_on_commit: true,
        }
    }
}

impl PrefsConfig {
    /// Default settings rooted at `root_dir`.
    pub fn with_root(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
            ..Default::default()
        }
    }

    /// Load a TOML config file. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        toml::from_str(&contents)
            .map_err(|e| PrefsError::Config(format!("{}: {e}", path.display())))
    }

    /// Path of the file backing `scope`.
    pub fn scope_path(&self, scope: Scope) -> PathBuf {
        self.root_dir.join(format!("{}.json", scope.name()))
    }

    pub(crate) fn file_store_config(&self) -> FileStoreConfig {
        FileStoreConfig {
            sync_on_commit: self.sync_on_commit,
        }
    }
}

/// `<platform config dir>/prefkit`, or `./prefkit` when the platform has none.
pub fn default_root_dir() -> PathBuf {
    dirs::config_dir()
        .map(|dir| dir.join("prefkit"))
        .unwrap_or_else(|| PathBuf::from("prefkit"))
}
