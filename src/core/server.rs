//! API server assembly.
//!
//! [`ApiServer`] owns the configuration and the storage handle and builds
//! the axum [`Router`]: resource and index routes from the resources domain,
//! JSON fallbacks for unknown routes and methods, plus tracing and CORS
//! layers.
//!
//! Each request that touches storage extracts a [`Session`]. The session is
//! dropped when the handler returns, on success and on failure alike, which
//! releases it.

use axum::{
    Router,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
};
use bytes::Bytes;
use std::convert::Infallible;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

use super::config::Config;
use super::error::ApiError;
use super::storage::{Session, Storage};
use crate::domains::resources::{index_routes, resource_routes};

/// State shared by every handler.
#[derive(Clone, Debug)]
pub struct AppState {
    pub storage: Storage,
}

impl FromRequestParts<AppState> for Session {
    type Rejection = Infallible;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(state.storage.open())
    }
}

/// The `{id}` path segment of a resource route.
///
/// Undecodable segments are rejected with a JSON [`ApiError`].
#[derive(Debug, Clone)]
pub struct ResourceId(pub String);

impl<S: Send + Sync> FromRequestParts<S> for ResourceId {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                warn!("Rejected path: {}", rejection.body_text());
                ApiError::new(rejection.status(), rejection.body_text())
            })?;
        Ok(Self(id))
    }
}

/// The raw request body, buffered up to the default body limit.
///
/// Unreadable or oversized bodies are rejected with a JSON [`ApiError`].
#[derive(Debug, Clone)]
pub struct RawBody(pub Bytes);

impl<S: Send + Sync> FromRequest<S> for RawBody {
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|rejection| {
            warn!("Rejected body: {}", rejection.body_text());
            ApiError::new(rejection.status(), rejection.body_text())
        })?;
        Ok(Self(bytes))
    }
}

/// The HBnB API server.
#[derive(Clone)]
pub struct ApiServer {
    config: Arc<Config>,
    storage: Storage,
}

impl ApiServer {
    /// Create a server over an already opened storage.
    pub fn new(config: Config, storage: Storage) -> Self {
        Self {
            config: Arc::new(config),
            storage,
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    /// Build the HTTP router.
    pub fn router(&self) -> Router {
        let prefix = &self.config.transport.prefix;
        info!("Registering routes under {:?}", prefix);

        let router = Router::new()
            .merge(index_routes(prefix))
            .merge(resource_routes(prefix))
            .method_not_allowed_fallback(method_not_allowed)
            .fallback(not_found)
            .with_state(AppState {
                storage: self.storage.clone(),
            });

        let router = router.layer(TraceLayer::new_for_http());

        if self.config.transport.enable_cors {
            let cors = CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any);
            router.layer(cors)
        } else {
            router
        }
    }
}

async fn not_found() -> ApiError {
    ApiError::not_found()
}

async fn method_not_allowed() -> ApiError {
    ApiError::method_not_allowed()
}
