//! HTTP handlers for the resource endpoints.
//!
//! Routes are generated from the registry: every kind gets
//! `GET|PUT|DELETE /<collection>/{id}`, root kinds get
//! `GET|POST /<collection>`, and child kinds get
//! `GET|POST /<parent>/{id}/<collection>` instead.
//!
//! Every path also answers with a trailing slash.

use axum::{
    Json, Router,
    http::StatusCode,
    routing::{MethodRouter, get},
};
use serde_json::{Value, json};

use super::registry::get_all_resources;
use super::service::{self, Dict, ResourceService};
use crate::core::error::ApiResult;
use crate::core::server::{AppState, RawBody, ResourceId};
use crate::core::storage::Session;

/// Build routes for every registered kind under `prefix`.
pub fn resource_routes(prefix: &str) -> Router<AppState> {
    get_all_resources()
        .into_iter()
        .map(ResourceService::new)
        .fold(Router::new(), |router, service| {
            let spec = service.spec();
            let item_path = format!("{prefix}/{}/{{id}}", spec.collection);
            let collection_path = match spec.parent {
                Some(parent) => format!("{prefix}/{}/{{id}}/{}", parent.collection, spec.collection),
                None => format!("{prefix}/{}", spec.collection),
            };

            let router = route_lenient(router, &item_path, item_routes(service));
            route_lenient(router, &collection_path, collection_routes(service))
        })
}

/// `GET /status` and `GET /stats`.
pub fn index_routes(prefix: &str) -> Router<AppState> {
    let router = route_lenient(Router::new(), &format!("{prefix}/status"), get(status));
    route_lenient(router, &format!("{prefix}/stats"), get(stats))
}

/// Register `path` both with and without a trailing slash.
fn route_lenient(
    router: Router<AppState>,
    path: &str,
    methods: MethodRouter<AppState>,
) -> Router<AppState> {
    router
        .route(&format!("{path}/"), methods.clone())
        .route(path, methods)
}

fn item_routes(service: ResourceService) -> MethodRouter<AppState> {
    get(move |session: Session, ResourceId(id): ResourceId| async move {
        let dict = service.get(&session, &id).await?;
        ApiResult::Ok(Json(dict))
    })
    .put(
        move |mut session: Session, ResourceId(id): ResourceId, RawBody(body): RawBody| async move {
            let dict = service.update(&mut session, &id, &body).await?;
            ApiResult::Ok(Json(dict))
        },
    )
    .delete(move |mut session: Session, ResourceId(id): ResourceId| async move {
        service.delete(&mut session, &id).await?;
        ApiResult::Ok(Json(Dict::new()))
    })
}

fn collection_routes(service: ResourceService) -> MethodRouter<AppState> {
    if service.spec().parent.is_some() {
        get(move |session: Session, ResourceId(parent_id): ResourceId| async move {
            let listed = service.list(&session, Some(&parent_id)).await?;
            ApiResult::Ok(Json(listed))
        })
        .post(
            move |mut session: Session, ResourceId(parent_id): ResourceId, RawBody(body): RawBody| async move {
                let dict = service.create(&mut session, Some(&parent_id), &body).await?;
                ApiResult::Ok((StatusCode::CREATED, Json(dict)))
            },
        )
    } else {
        get(move |session: Session| async move {
            let listed = service.list(&session, None).await?;
            ApiResult::Ok(Json(listed))
        })
        .post(move |mut session: Session, RawBody(body): RawBody| async move {
            let dict = service.create(&mut session, None, &body).await?;
            ApiResult::Ok((StatusCode::CREATED, Json(dict)))
        })
    }
}

/// Liveness probe.
async fn status() -> Json<Value> {
    Json(json!({ "status": "OK" }))
}

/// Record counts per kind.
async fn stats(session: Session) -> ApiResult<Json<Dict>> {
    Ok(Json(service::stats(&session).await?))
}
