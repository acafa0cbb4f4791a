//! Named preference scopes.
//!
//! Two scopes exist: [`Scope::User`] (`"user"`) and [`Scope::AppSettings`]
//! (`"app_settings"`). Each is backed by its own store, so the same key in
//! different scopes names unrelated values. Stores are handed to
//! [`Scopes::from_stores`] explicitly; there is no global registry.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use prefkit_store::{FilePreferenceStore, PreferenceStore};
use tracing::{debug, warn};

use crate::config::PrefsConfig;
use crate::error::{PrefsError, Result};
use crate::preferences::Preferences;

/// A named, isolated preference domain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Scope {
    User,
    AppSettings,
}

impl Scope {
    pub const ALL: [Scope; 2] = [Scope::User, Scope::AppSettings];

    /// The persisted scope name.
    pub fn name(&self) -> &'static str {
        match self {
            Scope::User => "user",
            Scope::AppSettings => "app_settings",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Scope {
    type Err = PrefsError;

    fn from_str(s: &str) -> Result<Self> {
        Scope::ALL
            .into_iter()
            .find(|scope| scope.name() == s)
            .ok_or_else(|| PrefsError::UnknownScope(s.to_string()))
    }
}

/// Open the file-backed store for a single scope.
pub fn open_scope(config: &PrefsConfig, scope: Scope) -> Result<Preferences> {
    let store = FilePreferenceStore::open(
        &config.scope_path(scope),
        scope.name(),
        config.file_store_config(),
    )?;
    Ok(Preferences::new(Arc::new(store)))
}

/// One accessor per scope.
#[derive(Clone, Debug)]
pub struct Scopes {
    user: Preferences,
    app_settings: Preferences,
}

impl Scopes {
    /// Bind accessors to explicitly supplied stores.
    pub fn from_stores(
        user: Arc<dyn PreferenceStore>,
        app_settings: Arc<dyn PreferenceStore>,
    ) -> Self {
        if Arc::ptr_eq(&user, &app_settings) {
            warn!("user and app_settings scopes share one store; writes will collide");
        }
        Self {
            user: Preferences::new(user),
            app_settings: Preferences::new(app_settings),
        }
    }

    /// Two independent in-memory scopes.
    pub fn in_memory() -> Self {
        Self {
            user: Preferences::in_memory(Scope::User.name()),
            app_settings: Preferences::in_memory(Scope::AppSettings.name()),
        }
    }

    /// Open both scopes from files under `config.root_dir`.
    pub fn open(config: &PrefsConfig) -> Result<Self> {
        let scopes = Self {
            user: open_scope(config, Scope::User)?,
            app_settings: open_scope(config, Scope::AppSettings)?,
        };
        debug!(root = %config.root_dir.display(), "preference scopes opened");
        Ok(scopes)
    }

    /// The accessor for `scope`.
    pub fn get(&self, scope: Scope) -> &Preferences {
        match scope {
            Scope::User => &self.user,
            Scope::AppSettings => &self.app_settings,
        }
    }

    pub fn user(&self) -> &Preferences {
        &self.user
    }

    pub fn app_settings(&self) -> &Preferences {
        &self.app_settings
    }
}
