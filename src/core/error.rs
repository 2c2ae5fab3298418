//! Error types and handling for the API server.
//!
//! [`Error`] is the unified startup error returned by [`crate::run`].
//! [`ApiError`] is the only
//! type turned into an HTTP error response: every handler failure is
//! converted into it, and it always renders as `{"error": "<message>"}`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

use super::storage::StorageError;
use super::transport::TransportError;
use crate::domains::resources::ResourceError;

/// A specialized Result type for server startup.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the API server.
#[derive(Debug, Error)]
pub enum Error {
    /// The storage engine could not be opened.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// The HTTP listener failed to bind or serve.
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),
}

/// Result type for HTTP handlers.
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// An HTTP error response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// 404 for a missing route or entity.
    pub fn not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, "Not found")
    }

    /// 405 for a known route with an unsupported method.
    pub fn method_not_allowed() -> Self {
        Self::new(StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed")
    }

    /// 500 with a generic message; details go to the log only.
    pub fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<ResourceError> for ApiError {
    fn from(err: ResourceError) -> Self {
        match err {
            ResourceError::NotFound { .. } => {
                warn!("{}", err);
                Self::not_found()
            }
            ResourceError::BadRequest(message) => Self::new(StatusCode::BAD_REQUEST, message),
            ResourceError::Storage(source) => {
                error!("Storage failure: {}", source);
                Self::internal()
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}
