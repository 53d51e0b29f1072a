use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, Response, StatusCode, header},
};
use http_body_util::BodyExt;
use sea_orm::Database;
use serde_json::{Value, json};
use tower::ServiceExt;

use migration::MigratorTrait;
use server::{ServerState, router};

async fn test_router() -> Router {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();

    let engine = engine::Engine::builder().database(db).build();
    router(ServerState {
        engine: Arc::new(engine),
        page_size: 20,
    })
}

async fn send(app: &Router, request: Request<Body>) -> Response<axum::body::Body> {
    app.clone().oneshot(request).await.unwrap()
}

async fn create_currency(app: &Router, code: &str, name: &str) -> Response<axum::body::Body> {
    let request = Request::builder()
        .method("POST")
        .uri("/currencies")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({ "code": code, "name": name }).to_string(),
        ))
        .unwrap();
    send(app, request).await
}

async fn body_json(response: Response<axum::body::Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn empty_catalog_lists_as_empty_array() {
    let app = test_router().await;

    let response = send(
        &app,
        Request::builder().uri("/currencies").body(Body::empty()).unwrap(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!([]));
}

#[tokio::test]
async fn create_returns_201_with_location_and_body() {
    let app = test_router().await;

    let response = create_currency(&app, "EUR", "Euro").await;

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "/currencies/EUR"
    );

    let body = body_json(response).await;
    assert_eq!(body["code"], "EUR");
    assert_eq!(body["name"], "Euro");
    assert!(body["createdDate"].is_string());
}

#[tokio::test]
async fn duplicate_create_returns_409_with_message() {
    let app = test_router().await;

    create_currency(&app, "USD", "US Dollar").await;
    let response = create_currency(&app, "USD", "US Dollar").await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(
        body_json(response).await,
        json!({ "message": "currency USD already exists" })
    );
}

#[tokio::test]
async fn create_then_get_round_trips() {
    let app = test_router().await;

    create_currency(&app, "GBP", "Pound Sterling").await;
    let response = send(
        &app,
        Request::builder()
            .uri("/currencies/GBP")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["code"], "GBP");
    assert_eq!(body["name"], "Pound Sterling");
}

#[tokio::test]
async fn get_of_missing_code_returns_404_with_message() {
    let app = test_router().await;

    let response = send(
        &app,
        Request::builder()
            .uri("/currencies/XXX")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_json(response).await,
        json!({ "message": "currency XXX not found" })
    );
}

#[tokio::test]
async fn patch_replaces_name() {
    let app = test_router().await;

    create_currency(&app, "CHF", "Franc").await;
    let response = send(
        &app,
        Request::builder()
            .method("PATCH")
            .uri("/currencies/CHF")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({ "name": "Swiss Franc" }).to_string()))
            .unwrap(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["code"], "CHF");
    assert_eq!(body["name"], "Swiss Franc");

    let response = send(
        &app,
        Request::builder()
            .uri("/currencies/CHF")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(body_json(response).await["name"], "Swiss Franc");
}

#[tokio::test]
async fn put_is_an_alias_of_patch() {
    let app = test_router().await;

    create_currency(&app, "JPY", "Yen").await;
    let response = send(
        &app,
        Request::builder()
            .method("PUT")
            .uri("/currencies/JPY")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({ "name": "Japanese Yen" }).to_string()))
            .unwrap(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["name"], "Japanese Yen");
}

#[tokio::test]
async fn patch_of_missing_code_returns_404() {
    let app = test_router().await;

    let response = send(
        &app,
        Request::builder()
            .method("PATCH")
            .uri("/currencies/XXX")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({ "name": "Nothing" }).to_string()))
            .unwrap(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_json(response).await,
        json!({ "message": "currency XXX not found" })
    );
}

#[tokio::test]
async fn delete_returns_204_even_when_nothing_was_deleted() {
    let app = test_router().await;

    create_currency(&app, "EUR", "Euro").await;

    let delete = |uri: &str| {
        Request::builder()
            .method("DELETE")
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    };

    let response = send(&app, delete("/currencies/EUR")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // The miss is only logged server-side.
    let response = send(&app, delete("/currencies/EUR")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = send(
        &app,
        Request::builder()
            .uri("/currencies/EUR")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn listing_paginates_newest_first() {
    let app = test_router().await;

    for (code, name) in [
        ("EUR", "Euro"),
        ("USD", "US Dollar"),
        ("GBP", "Pound Sterling"),
        ("JPY", "Yen"),
        ("CHF", "Swiss Franc"),
    ] {
        create_currency(&app, code, name).await;
    }

    let response = send(
        &app,
        Request::builder()
            .uri("/currencies?size=2")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 2);
    assert_eq!(body[0]["code"], "CHF");
    assert_eq!(body[1]["code"], "JPY");

    let response = send(
        &app,
        Request::builder()
            .uri("/currencies?page=1&size=2")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    let body = body_json(response).await;
    assert_eq!(body[0]["code"], "GBP");
    assert_eq!(body[1]["code"], "USD");
}

#[tokio::test]
async fn cors_is_open_to_any_origin() {
    let app = test_router().await;

    let response = send(
        &app,
        Request::builder()
            .uri("/currencies")
            .header(header::ORIGIN, "https://example.com")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "*"
    );
}
