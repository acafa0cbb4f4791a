//! Typed preference access for prefkit.
//!
//! A [`Preferences`] accessor wraps one preference store and offers get/put
//! over a fixed set of primitive types, with a JSON fallback for anything
//! else. [`Scopes`] provisions the two named scopes, `"user"` and
//! `"app_settings"`, each over its own store.
//!
//! ```
//! use prefkit_core::{PrefValue, Scopes};
//!
//! let scopes = Scopes::in_memory();
//! scopes.user().put("flag", PrefValue::Bool(true)).unwrap();
//! assert_eq!(
//!     scopes.user().get("flag", PrefValue::Bool(false)).unwrap(),
//!     PrefValue::Bool(true),
//! );
//! ```

pub mod config;
pub mod error;
pub mod preferences;
pub mod scope;
pub mod value;

pub use config::{default_root_dir, PrefsConfig};
pub use error::{PrefsError, Result};
pub use preferences::Preferences;
pub use scope::{open_scope, Scope, Scopes};
pub use value::{PrefType, PrefValue};

// Re-export the store layer
pub use prefkit_store::{
    FilePreferenceStore, InMemoryPreferenceStore, PreferenceStore, StoreError, StoredValue,
    ValueKind,
};
