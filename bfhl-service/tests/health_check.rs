//! Routing tests: liveness probe, 404 fallback and response headers.

mod common;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
};
use bfhl_service::startup::{AppState, Application};
use common::{
    app_with_delegate, assert_failure, send, send_request, test_config, StubDelegate, TestResponse,
    TEST_EMAIL,
};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

fn app() -> axum::Router {
    app_with_delegate(StubDelegate::answering("unused"))
}

#[tokio::test]
async fn health_check_returns_identity() {
    let response = send(app(), Method::GET, "/health", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body,
        json!({ "is_success": true, "official_email": TEST_EMAIL })
    );
}

#[tokio::test]
async fn unknown_route_returns_not_found_envelope() {
    let response = send(app(), Method::GET, "/unknown", None).await;
    assert_failure(&response, StatusCode::NOT_FOUND, "Endpoint not found");
}

#[tokio::test]
async fn wrong_method_on_known_route_returns_not_found() {
    let response = send(app(), Method::GET, "/bfhl", None).await;
    assert_failure(&response, StatusCode::NOT_FOUND, "Endpoint not found");

    let response = send(app(), Method::POST, "/health", Some("{}")).await;
    assert_failure(&response, StatusCode::NOT_FOUND, "Endpoint not found");
}

#[tokio::test]
async fn responses_carry_request_id() {
    let response = send(app(), Method::GET, "/health", None).await;
    assert!(response.request_id.is_some_and(|id| !id.is_empty()));

    let response = send(app(), Method::GET, "/unknown", None).await;
    assert!(response.request_id.is_some());
}

#[tokio::test]
async fn caller_request_id_is_echoed() {
    for uri in ["/health", "/unknown"] {
        let request = Request::builder()
            .method(Method::GET)
            .uri(uri)
            .header("x-request-id", "abc")
            .body(Body::empty())
            .unwrap();

        let response = send_request(app(), request).await;
        assert_eq!(response.request_id.as_deref(), Some("abc"));
    }
}

fn assert_security_headers(response: &TestResponse) {
    assert_eq!(response.header("x-content-type-options"), Some("nosniff"));
    assert_eq!(response.header("x-frame-options"), Some("DENY"));
    assert_eq!(
        response.header("content-security-policy"),
        Some("default-src 'none'; frame-ancestors 'none'")
    );
}

#[tokio::test]
async fn security_headers_on_every_response() {
    let ok = send(app(), Method::GET, "/health", None).await;
    assert_eq!(ok.status, StatusCode::OK);
    assert_security_headers(&ok);

    let missing = send(app(), Method::GET, "/unknown", None).await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert_security_headers(&missing);

    let rejected = send(app(), Method::POST, "/bfhl", Some("{}")).await;
    assert_eq!(rejected.status, StatusCode::BAD_REQUEST);
    assert_security_headers(&rejected);
}

#[tokio::test]
async fn application_serves_over_tcp() {
    let mut config = test_config();
    config.common.port = 0;

    let state = AppState::new(config, Arc::new(StubDelegate::answering("Paris")));
    let app = Application::build_with_state(state)
        .await
        .expect("Failed to build application");
    let port = app.port();

    tokio::spawn(async move {
        let _ = app.run_until_stopped().await;
    });

    let client = reqwest::Client::new();
    let response = client
        .post(format!("http://127.0.0.1:{}/bfhl", port))
        .json(&json!({ "AI": "capital of France" }))
        .timeout(Duration::from_secs(5))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::OK.as_u16());
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["data"], "Paris");
    assert_eq!(body["official_email"], TEST_EMAIL);
}
