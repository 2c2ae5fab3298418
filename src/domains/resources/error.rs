//! Resource-specific error types.

use thiserror::Error;

use super::models::ResourceKind;
use crate::core::storage::StorageError;

/// Result type for resource operations.
pub type ResourceResult<T> = Result<T, ResourceError>;

/// Errors that can occur while serving a resource request.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// A path target or referenced id does not exist.
    #[error("{kind} not found: {id}")]
    NotFound { kind: ResourceKind, id: String },

    /// The request body is malformed or incomplete.
    #[error("{0}")]
    BadRequest(String),

    /// The storage engine failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl ResourceError {
    /// Create a new "not found" error.
    pub fn not_found(kind: ResourceKind, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }

    /// Create a new "bad request" error.
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    /// Body is not a JSON object.
    pub fn not_a_json() -> Self {
        Self::bad_request("Not a JSON")
    }

    /// Body lacks a required field.
    pub fn missing(field: &str) -> Self {
        Self::BadRequest(format!("Missing {field}"))
    }
}
