//! Typed key-value preference storage.
//!
//! A preference store holds one flat, string-keyed scope of typed values
//! (booleans, floats, 32/64-bit integers, strings and string sets). Writes
//! are staged on an [`Editor`] and become visible on [`Editor::commit`].
//!
//! # Storage Backends
//!
//! All backends implement the [`PreferenceStore`] trait:
//!
//! - [`InMemoryPreferenceStore`] -- `BTreeMap`-based store for tests and embedding
//! - [`FilePreferenceStore`] -- one JSON file per scope, atomically replaced on commit
//!
//! # Design Rules
//!
//! 1. A missing key is never an error; typed reads fall back to the caller's default.
//! 2. A key holds one type at a time; reading it as another type is an error.
//! 3. Stores serialise their own writes; callers do no locking.
//! 4. All I/O errors are propagated, never silently ignored.

pub mod editor;
pub mod error;
pub mod file;
pub mod keys;
pub mod memory;
pub mod traits;
pub mod value;

pub use editor::{Change, Editor};
pub use error::{StoreError, StoreResult};
pub use file::{FilePreferenceStore, FileStoreConfig};
pub use keys::{validate_key, MAX_KEY_LEN};
pub use memory::InMemoryPreferenceStore;
pub use traits::PreferenceStore;
pub use value::{StoredValue, ValueKind};
