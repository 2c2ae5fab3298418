//! Storage error types.

use thiserror::Error;

use crate::domains::resources::RecordError;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur while reading or committing records.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Failed to read or write the backing file.
    #[error("Storage I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The backing file is not valid JSON.
    #[error("Storage JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A stored entry could not be decoded into a record.
    #[error("Corrupt record {key}: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: RecordError,
    },

    /// Unknown storage backend name in configuration.
    #[error("Unknown storage type: {0}")]
    UnknownBackend(String),
}

impl StorageError {
    /// Create an I/O error for the given path.
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a corrupt record error.
    pub fn corrupt(key: impl Into<String>, source: RecordError) -> Self {
        Self::Corrupt {
            key: key.into(),
            source,
        }
    }
}
