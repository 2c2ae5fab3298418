//! Integration tests for the HBnB REST endpoints.

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use hbnb_api::core::{ApiServer, Config, Storage};

fn test_router() -> Router {
    ApiServer::new(Config::default(), Storage::memory()).router()
}

async fn send(
    router: &Router,
    method: Method,
    uri: &str,
    body: Option<Body>,
) -> Result<(StatusCode, Value), String> {
    let mut builder = Request::builder().method(method).uri(uri);
    if body.is_some() {
        builder = builder.header(header::CONTENT_TYPE, "application/json");
    }
    let req = builder
        .body(body.unwrap_or_else(Body::empty))
        .map_err(|err| format!("build request: {err}"))?;

    let response = router
        .clone()
        .oneshot(req)
        .await
        .map_err(|err| format!("route request: {err}"))?;
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .map_err(|err| format!("read response body: {err}"))?
        .to_bytes();

    let parsed = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).map_err(|err| format!("parse response body: {err}"))?
    };
    Ok((status, parsed))
}

async fn api(
    router: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> Result<(StatusCode, Value), String> {
    let body = body
        .map(|payload| serde_json::to_vec(&payload).map(Body::from))
        .transpose()
        .map_err(|err| format!("serialize request body: {err}"))?;
    send(router, method, uri, body).await
}

async fn create(router: &Router, uri: &str, body: Value) -> Result<String, String> {
    let (status, created) = api(router, Method::POST, uri, Some(body)).await?;
    assert_eq!(status, StatusCode::CREATED, "POST {uri}: {created}");
    created
        .get("id")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| "created object should carry an id".to_string())
}

fn error_message(body: &Value) -> Option<&str> {
    body.get("error").and_then(Value::as_str)
}

#[tokio::test]
async fn status_reports_ok() -> Result<(), String> {
    let router = test_router();
    let (status, body) = api(&router, Method::GET, "/api/v1/status", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "OK"}));
    Ok(())
}

#[tokio::test]
async fn state_lifecycle() -> Result<(), String> {
    let router = test_router();

    let (status, created) = api(
        &router,
        Method::POST,
        "/api/v1/states",
        Some(json!({"name": "California"})),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["name"], json!("California"));
    assert!(created["created_at"].is_string());
    assert!(created["updated_at"].is_string());
    let id = created["id"].as_str().ok_or("missing id")?.to_string();
    let item = format!("/api/v1/states/{id}");

    let (status, fetched) = api(&router, Method::GET, &item, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (status, updated) = api(
        &router,
        Method::PUT,
        &item,
        Some(json!({"name": "CA", "id": "ignored"})),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name"], json!("CA"));
    assert_eq!(updated["id"], json!(id));

    let (status, deleted) = api(&router, Method::DELETE, &item, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted, json!({}));

    let (status, missing) = api(&router, Method::GET, &item, None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_message(&missing), Some("Not found"));

    let (status, _) = api(&router, Method::DELETE, &item, None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn list_returns_creation_order() -> Result<(), String> {
    let router = test_router();
    for name in ["Wifi", "Pool", "Kitchen"] {
        create(&router, "/api/v1/amenities", json!({"name": name})).await?;
    }

    let (status, listed) = api(&router, Method::GET, "/api/v1/amenities", None).await?;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<_> = listed
        .as_array()
        .ok_or("list should be an array")?
        .iter()
        .map(|a| a["name"].clone())
        .collect();
    assert_eq!(names, vec![json!("Wifi"), json!("Pool"), json!("Kitchen")]);
    Ok(())
}

#[tokio::test]
async fn create_rejects_non_json_before_field_checks() -> Result<(), String> {
    let router = test_router();

    let (status, body) = send(
        &router,
        Method::POST,
        "/api/v1/users",
        Some(Body::from("email=a@b.c")),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_message(&body), Some("Not a JSON"));

    let (status, body) = api(&router, Method::POST, "/api/v1/users", Some(json!({"email": "a@b.c"}))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_message(&body), Some("Missing password"));

    let (status, body) = api(&router, Method::POST, "/api/v1/users", Some(json!({"password": "pw"}))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_message(&body), Some("Missing email"));
    Ok(())
}

#[tokio::test]
async fn user_create_returns_serialized_user() -> Result<(), String> {
    let router = test_router();
    let (status, user) = api(
        &router,
        Method::POST,
        "/api/v1/users",
        Some(json!({"email": "betty@hbnb.io", "password": "pwd", "first_name": "Betty"})),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(user["email"], json!("betty@hbnb.io"));
    assert_eq!(user["first_name"], json!("Betty"));
    assert_eq!(user["__class__"], json!("User"));

    let id = user["id"].as_str().ok_or("missing id")?;
    let (status, updated) = api(
        &router,
        Method::PUT,
        &format!("/api/v1/users/{id}"),
        Some(json!({"email": "other@hbnb.io", "last_name": "Holberton"})),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["email"], json!("betty@hbnb.io"));
    assert_eq!(updated["last_name"], json!("Holberton"));
    Ok(())
}

#[tokio::test]
async fn nested_create_under_missing_parent_is_not_found() -> Result<(), String> {
    let router = test_router();

    let (status, body) = send(
        &router,
        Method::POST,
        "/api/v1/states/doesnotexist/cities",
        Some(Body::from("not json")),
    )
    .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_message(&body), Some("Not found"));

    let (status, _) = api(&router, Method::GET, "/api/v1/states/doesnotexist/cities", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn cities_are_scoped_to_their_state() -> Result<(), String> {
    let router = test_router();
    let ca = create(&router, "/api/v1/states", json!({"name": "California"})).await?;
    let nv = create(&router, "/api/v1/states", json!({"name": "Nevada"})).await?;

    let sf = create(
        &router,
        &format!("/api/v1/states/{ca}/cities"),
        json!({"name": "San Francisco", "state_id": nv}),
    )
    .await?;
    create(&router, &format!("/api/v1/states/{nv}/cities"), json!({"name": "Reno"})).await?;

    let (status, cities) = api(&router, Method::GET, &format!("/api/v1/states/{ca}/cities"), None).await?;
    assert_eq!(status, StatusCode::OK);
    let cities = cities.as_array().ok_or("cities should be an array")?;
    assert_eq!(cities.len(), 1);
    assert_eq!(cities[0]["id"], json!(sf));
    assert_eq!(cities[0]["state_id"], json!(ca));

    let (status, updated) = api(
        &router,
        Method::PUT,
        &format!("/api/v1/cities/{sf}"),
        Some(json!({"name": "SF", "state_id": nv})),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name"], json!("SF"));
    assert_eq!(updated["state_id"], json!(ca));

    let (status, body) = api(&router, Method::POST, &format!("/api/v1/states/{ca}/cities"), Some(json!({}))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_message(&body), Some("Missing name"));
    Ok(())
}

#[tokio::test]
async fn place_creation_validation_order() -> Result<(), String> {
    let router = test_router();
    let state = create(&router, "/api/v1/states", json!({"name": "California"})).await?;
    let city = create(&router, &format!("/api/v1/states/{state}/cities"), json!({"name": "SF"})).await?;
    let user = create(&router, "/api/v1/users", json!({"email": "a@b.c", "password": "pw"})).await?;
    let places = format!("/api/v1/cities/{city}/places");

    let (status, body) = api(&router, Method::POST, &places, Some(json!({"name": "Loft"}))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_message(&body), Some("Missing user_id"));

    let (status, _) = api(
        &router,
        Method::POST,
        &places,
        Some(json!({"user_id": "nobody", "name": "Loft"})),
    )
    .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = api(&router, Method::POST, &places, Some(json!({"user_id": user}))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_message(&body), Some("Missing name"));

    let (status, place) = api(
        &router,
        Method::POST,
        &places,
        Some(json!({"user_id": user, "name": "Loft", "city_id": "forged", "max_guest": 4})),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(place["city_id"], json!(city));
    assert_eq!(place["max_guest"], json!(4));

    let (status, listed) = api(&router, Method::GET, &places, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().map(Vec::len), Some(1));
    Ok(())
}

#[tokio::test]
async fn review_creation_and_update() -> Result<(), String> {
    let router = test_router();
    let state = create(&router, "/api/v1/states", json!({"name": "California"})).await?;
    let city = create(&router, &format!("/api/v1/states/{state}/cities"), json!({"name": "SF"})).await?;
    let user = create(&router, "/api/v1/users", json!({"email": "a@b.c", "password": "pw"})).await?;
    let place = create(
        &router,
        &format!("/api/v1/cities/{city}/places"),
        json!({"user_id": user, "name": "Loft"}),
    )
    .await?;
    let reviews = format!("/api/v1/places/{place}/reviews");

    let (status, body) = api(&router, Method::POST, &reviews, Some(json!({}))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_message(&body), Some("Missing user_id"));

    let (status, body) = api(&router, Method::POST, &reviews, Some(json!({"user_id": user}))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_message(&body), Some("Missing text"));

    let review = create(&router, &reviews, json!({"user_id": user, "text": "Great"})).await?;
    let item = format!("/api/v1/reviews/{review}");

    let (status, before) = api(&router, Method::GET, &item, None).await?;
    assert_eq!(status, StatusCode::OK);

    let (status, updated) = api(
        &router,
        Method::PUT,
        &item,
        Some(json!({
            "text": "Okay",
            "user_id": "someone",
            "place_id": "elsewhere",
            "created_at": "1999-01-01T00:00:00.000000",
            "updated_at": "1999-01-01T00:00:00.000000"
        })),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["text"], json!("Okay"));
    assert_eq!(updated["user_id"], json!(user));
    assert_eq!(updated["place_id"], json!(place));
    assert_eq!(updated["created_at"], before["created_at"]);
    assert_eq!(updated["updated_at"], before["updated_at"]);
    Ok(())
}

#[tokio::test]
async fn update_rejects_non_json_body() -> Result<(), String> {
    let router = test_router();
    let amenity = create(&router, "/api/v1/amenities", json!({"name": "Wifi"})).await?;

    let (status, body) = send(
        &router,
        Method::PUT,
        &format!("/api/v1/amenities/{amenity}"),
        Some(Body::from("[1, 2, 3]")),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_message(&body), Some("Not a JSON"));

    let (status, _) = api(
        &router,
        Method::PUT,
        "/api/v1/amenities/missing",
        Some(json!({"name": "Pool"})),
    )
    .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn stats_counts_each_kind() -> Result<(), String> {
    let router = test_router();
    let state = create(&router, "/api/v1/states", json!({"name": "California"})).await?;
    create(&router, &format!("/api/v1/states/{state}/cities"), json!({"name": "SF"})).await?;
    create(&router, &format!("/api/v1/states/{state}/cities"), json!({"name": "LA"})).await?;
    create(&router, "/api/v1/amenities", json!({"name": "Wifi"})).await?;

    let (status, stats) = api(&router, Method::GET, "/api/v1/stats", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        stats,
        json!({
            "users": 0,
            "places": 0,
            "states": 1,
            "cities": 2,
            "amenities": 1,
            "reviews": 0
        })
    );
    Ok(())
}

#[tokio::test]
async fn unknown_route_and_method_return_json_errors() -> Result<(), String> {
    let router = test_router();

    let (status, body) = api(&router, Method::GET, "/api/v1/nowhere", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_message(&body), Some("Not found"));

    let (status, body) = api(&router, Method::DELETE, "/api/v1/states", None).await?;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(error_message(&body), Some("Method Not Allowed"));

    let (status, _) = api(&router, Method::POST, "/api/v1/cities", Some(json!({"name": "x"}))).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn extractor_rejections_are_json() -> Result<(), String> {
    let router = test_router();

    for (method, uri, body) in [
        (Method::GET, "/api/v1/states/%FF", Body::empty()),
        (
            Method::POST,
            "/api/v1/states",
            Body::from(vec![b' '; 3 * 1024 * 1024]),
        ),
    ] {
        let req = Request::builder()
            .method(method)
            .uri(uri)
            .body(body)
            .map_err(|err| format!("build request: {err}"))?;
        let response = router
            .clone()
            .oneshot(req)
            .await
            .map_err(|err| format!("route request: {err}"))?;
        let status = response.status();
        assert!(status.is_client_error(), "{uri}: {status}");
        assert_eq!(
            response
                .headers()
                .get(header::CONTENT_TYPE)
                .and_then(|value| value.to_str().ok()),
            Some("application/json"),
            "{uri}"
        );

        let bytes = response
            .into_body()
            .collect()
            .await
            .map_err(|err| format!("read response body: {err}"))?
            .to_bytes();
        let body: Value =
            serde_json::from_slice(&bytes).map_err(|err| format!("parse response body: {err}"))?;
        assert!(error_message(&body).is_some(), "{uri}: {body}");
    }

    let (status, _) = send(&router, Method::GET, "/api/v1/states/%FF", None).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn place_update_keeps_foreign_keys() -> Result<(), String> {
    let router = test_router();
    let state = create(&router, "/api/v1/states", json!({"name": "Nevada"})).await?;
    let city = create(&router, &format!("/api/v1/states/{state}/cities"), json!({"name": "Reno"})).await?;
    let user = create(&router, "/api/v1/users", json!({"email": "h@o.st", "password": "pw"})).await?;
    let place = create(
        &router,
        &format!("/api/v1/cities/{city}/places"),
        json!({"user_id": user, "name": "Cabin"}),
    )
    .await?;

    let (status, updated) = api(
        &router,
        Method::PUT,
        &format!("/api/v1/places/{place}"),
        Some(json!({"city_id": "elsewhere", "user_id": "someone", "name": "Lodge"})),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name"], json!("Lodge"));
    assert_eq!(updated["city_id"], json!(city));
    assert_eq!(updated["user_id"], json!(user));

    let (_, fetched) = api(&router, Method::GET, &format!("/api/v1/places/{place}"), None).await?;
    assert_eq!(fetched, updated);
    Ok(())
}

#[tokio::test]
async fn trailing_slash_is_accepted() -> Result<(), String> {
    let router = test_router();
    let state = create(&router, "/api/v1/states/", json!({"name": "Utah"})).await?;

    let (status, listed) = api(&router, Method::GET, "/api/v1/states/", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().map(Vec::len), Some(1));

    let (status, cities) = api(&router, Method::GET, &format!("/api/v1/states/{state}/cities/"), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cities, json!([]));

    let (status, fetched) = api(&router, Method::GET, &format!("/api/v1/states/{state}/"), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["name"], json!("Utah"));

    let (status, body) = api(&router, Method::GET, "/api/v1/status/", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "OK"}));
    Ok(())
}
