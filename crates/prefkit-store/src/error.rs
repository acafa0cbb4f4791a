//! Error types for preference store operations.

use std::path::PathBuf;

use thiserror::Error;

use crate::value::ValueKind;

/// Errors that can occur while reading or writing a preference store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The key is not acceptable as a preference key.
    #[error("invalid preference key {key:?}: {reason}")]
    InvalidKey { key: String, reason: String },

    /// The entry under `key` was written with a different type than the
    /// one requested.
    #[error("type mismatch for {key:?}: expected {expected}, found {found}")]
    TypeMismatch {
        key: String,
        expected: ValueKind,
        found: ValueKind,
    },

    /// Floats must be finite; JSON has no encoding for `NaN` or infinities.
    #[error("non-finite float for {key:?}: {value}")]
    NonFiniteFloat { key: String, value: f32 },

    /// The scope file exists but cannot be decoded.
    #[error("corrupt scope file {path}: {reason}")]
    Corrupt { path: PathBuf, reason: String },

    /// Serialization or deserialization failure.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// The in-process lock guarding the entry map was poisoned.
    #[error("store lock poisoned: {0}")]
    LockPoisoned(String),

    /// I/O error from a file-backed store.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
