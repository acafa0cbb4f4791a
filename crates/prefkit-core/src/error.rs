use thiserror::Error;

/// Errors produced by the typed preference accessor.
#[derive(Debug, Error)]
pub enum PrefsError {
    /// Failure reported by the underlying preference store, including
    /// invalid keys and type mismatches.
    #[error("store error: {0}")]
    Store(#[from] prefkit_store::StoreError),

    /// An object value could not be serialized to JSON.
    #[error("failed to serialize value for {key:?}: {source}")]
    Serialize {
        key: String,
        source: serde_json::Error,
    },

    /// The text stored under `key` is not valid JSON for the requested type.
    #[error("failed to deserialize value for {key:?}: {source}")]
    Deserialize {
        key: String,
        source: serde_json::Error,
    },

    #[error("unknown scope: {0}")]
    UnknownScope(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PrefsError>;
