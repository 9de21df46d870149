//! Call API Integration Tests

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use catisip::config::Config;
use catisip::domain::call::CallRegistry;
use catisip::interface::api::{build_router, detached_handle, AppState};
use serde_json::{json, Value};
use std::time::Duration;
use tower::ServiceExt; // For `oneshot`

fn setup_app() -> (Router, CallRegistry) {
    let config = Config::default();
    let registry = CallRegistry::new(config.sip, config.simulation);
    let app = build_router(
        AppState::new(registry.clone()),
        detached_handle().expect("Failed to build metrics recorder"),
    );
    (app, registry)
}

fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap_or(Value::Null)
    };
    (status, json)
}

async fn place_call(app: &Router, from: &str, to: &str) -> Value {
    let (status, json) = send(
        app,
        json_request(
            Method::POST,
            "/api/call/make",
            json!({"from": from, "to": to}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    json
}

#[tokio::test]
async fn test_api_health_check() {
    let (app, _) = setup_app();

    let (status, json) = send(&app, get_request("/api/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["service"], "catiSip");
}

#[tokio::test]
async fn test_api_liveness_probe() {
    let (app, _) = setup_app();

    let response = app.oneshot(get_request("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&body[..], b"OK");
}

#[tokio::test]
async fn test_api_make_call() {
    let (app, registry) = setup_app();

    let json = place_call(&app, "1000", "1001").await;

    assert_eq!(json["from"], "1000");
    assert_eq!(json["to"], "1001");
    assert_eq!(json["status"], "dialing");
    assert!(!json["id"].as_str().unwrap().is_empty());
    assert!(json["start_time"].is_string());
    assert!(json.get("answer_time").is_none());
    assert!(json.get("end_time").is_none());
    assert_eq!(registry.len().await, 1);
}

#[tokio::test]
async fn test_api_make_call_missing_fields() {
    let (app, registry) = setup_app();

    let (status, json) = send(
        &app,
        json_request(Method::POST, "/api/call/make", json!({"from": "1000"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "BAD_REQUEST");
    assert_eq!(json["error"], "Both 'from' and 'to' fields are required");
    assert!(registry.is_empty().await);
}

#[tokio::test]
async fn test_api_make_call_empty_fields() {
    let (app, _) = setup_app();

    let (status, _) = send(
        &app,
        json_request(
            Method::POST,
            "/api/call/make",
            json!({"from": "", "to": "1001"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_api_make_call_invalid_body() {
    let (app, _) = setup_app();

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/call/make")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, json) = send(&app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Invalid request body");
}

#[tokio::test]
async fn test_api_make_call_invalid_method() {
    let (app, _) = setup_app();

    let (status, _) = send(&app, get_request("/api/call/make")).await;

    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_api_call_status() {
    let (app, _) = setup_app();
    let call = place_call(&app, "1000", "1001").await;
    let call_id = call["id"].as_str().unwrap();

    let (status, json) = send(
        &app,
        get_request(&format!("/api/call/status?call_id={}", call_id)),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["id"], call_id);
    assert_eq!(json["status"], "dialing");
}

#[tokio::test]
async fn test_api_call_status_missing_param() {
    let (app, _) = setup_app();

    let (status, json) = send(&app, get_request("/api/call/status")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "call_id parameter is required");
}

#[tokio::test]
async fn test_api_call_status_not_found() {
    let (app, _) = setup_app();

    let (status, json) = send(&app, get_request("/api/call/status?call_id=unknown")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "call not found: unknown");
}

#[tokio::test]
async fn test_api_hangup_call() {
    let (app, _) = setup_app();
    let call = place_call(&app, "1000", "1001").await;
    let call_id = call["id"].as_str().unwrap();

    let (status, json) = send(
        &app,
        json_request(
            Method::POST,
            "/api/call/hangup",
            json!({"call_id": call_id}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "call ended");

    let (_, json) = send(
        &app,
        get_request(&format!("/api/call/status?call_id={}", call_id)),
    )
    .await;
    assert_eq!(json["status"], "ended");
    assert!(json["end_time"].is_string());
}

#[tokio::test]
async fn test_api_hangup_unknown_call() {
    let (app, _) = setup_app();

    let (status, json) = send(
        &app,
        json_request(
            Method::POST,
            "/api/call/hangup",
            json!({"call_id": "call-missing"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "call not found: call-missing");
}

#[tokio::test]
async fn test_api_hangup_missing_call_id() {
    let (app, _) = setup_app();

    let (status, json) = send(
        &app,
        json_request(Method::POST, "/api/call/hangup", json!({})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "call_id is required");
}

#[tokio::test]
async fn test_api_list_calls() {
    let (app, _) = setup_app();
    let first = place_call(&app, "1000", "1001").await;
    let second = place_call(&app, "1000", "1002").await;

    let (status, json) = send(&app, get_request("/api/calls")).await;

    assert_eq!(status, StatusCode::OK);
    let mut ids: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_str().unwrap())
        .collect();
    ids.sort();
    let mut expected = vec![first["id"].as_str().unwrap(), second["id"].as_str().unwrap()];
    expected.sort();
    assert_eq!(ids, expected);
}

#[tokio::test]
async fn test_api_list_extensions() {
    let (app, _) = setup_app();

    let (status, json) = send(&app, get_request("/api/extensions")).await;

    assert_eq!(status, StatusCode::OK);
    let extensions = json.as_array().unwrap();
    assert_eq!(extensions.len(), 3);
    assert_eq!(extensions[0]["extension"], "1000");
    assert_eq!(extensions[0]["status"], "registered");
    assert_eq!(extensions[2]["extension"], "1002");
    assert_eq!(extensions[2]["status"], "available");
}

#[tokio::test]
async fn test_api_call_answered_after_simulation() {
    tokio::time::pause();
    let (app, _) = setup_app();
    let call = place_call(&app, "1000", "1001").await;
    let call_id = call["id"].as_str().unwrap().to_string();

    tokio::time::sleep(Duration::from_secs(6)).await;

    let (_, json) = send(
        &app,
        get_request(&format!("/api/call/status?call_id={}", call_id)),
    )
    .await;
    assert_eq!(json["status"], "answered");
    assert!(json["answer_time"].is_string());
    assert!(json.get("end_time").is_none());
}

#[tokio::test]
async fn test_api_cors_headers() {
    let (app, _) = setup_app();

    let request = Request::builder()
        .uri("/api/extensions")
        .header(header::ORIGIN, "http://localhost:3000")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
}

#[tokio::test]
async fn test_api_metrics_endpoint() {
    let (app, _) = setup_app();

    let response = app.oneshot(get_request("/metrics")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}
