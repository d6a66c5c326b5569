//! Shared helpers for bfhl-service integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use bfhl_service::config::BfhlConfig;
use bfhl_service::services::{AiDelegate, AiError};
use bfhl_service::startup::{build_router, AppState};
use serde_json::Value;
use std::sync::Arc;
use tower::util::ServiceExt;

pub const TEST_EMAIL: &str = "tester@example.com";

pub fn test_config() -> BfhlConfig {
    BfhlConfig {
        official_email: TEST_EMAIL.to_string(),
        ..BfhlConfig::default()
    }
}

/// AI delegate returning a canned outcome without any network access.
pub struct StubDelegate {
    outcome: Result<String, AiError>,
}

impl StubDelegate {
    pub fn answering(answer: &str) -> Self {
        Self {
            outcome: Ok(answer.to_string()),
        }
    }

    pub fn failing(error: AiError) -> Self {
        Self {
            outcome: Err(error),
        }
    }
}

#[async_trait]
impl AiDelegate for StubDelegate {
    async fn ask(&self, _question: &str) -> Result<String, AiError> {
        self.outcome.clone()
    }
}

pub fn app_with_delegate(delegate: StubDelegate) -> Router {
    build_router(AppState::new(test_config(), Arc::new(delegate)))
}

/// Router backed by the real Gemini provider built from `config`.
pub fn app_from_config(config: BfhlConfig) -> Router {
    build_router(AppState::from_config(config).expect("Failed to build app state"))
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub request_id: Option<String>,
    /// Body exactly as sent; numbers past `u64` are rounded in `body`.
    pub text: String,
    pub body: Value,
}

impl TestResponse {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

pub async fn send(app: Router, method: Method, uri: &str, body: Option<&str>) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(raw) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(raw.to_string())
        }
        None => Body::empty(),
    };

    send_request(app, builder.body(body).expect("Failed to build request")).await
}

pub async fn send_request(app: Router, request: Request<Body>) -> TestResponse {
    let response = app
        .oneshot(request)
        .await
        .expect("Failed to execute request");

    let status = response.status();
    let headers = response.headers().clone();
    let request_id = headers
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    let text = String::from_utf8(bytes.to_vec()).expect("Response body is not UTF-8");
    let body = serde_json::from_str(&text).expect("Response body is not JSON");

    TestResponse {
        status,
        headers,
        request_id,
        text,
        body,
    }
}

/// `POST /bfhl` with an explicit (or absent) content type.
pub async fn post_bfhl_as(app: Router, content_type: Option<&str>, body: &str) -> TestResponse {
    let mut builder = Request::builder().method(Method::POST).uri("/bfhl");
    if let Some(content_type) = content_type {
        builder = builder.header(header::CONTENT_TYPE, content_type);
    }

    send_request(
        app,
        builder
            .body(Body::from(body.to_string()))
            .expect("Failed to build request"),
    )
    .await
}

pub async fn post_bfhl(app: Router, body: &str) -> TestResponse {
    send(app, Method::POST, "/bfhl", Some(body)).await
}

/// Failure envelope: `is_success:false`, non-empty `error`, no payload.
pub fn assert_failure(response: &TestResponse, status: StatusCode, error: &str) {
    assert_eq!(response.status, status);
    assert_eq!(response.body["is_success"], false);
    assert_eq!(response.body["error"], error);
    assert!(response.body.get("data").is_none());
    assert!(response.body.get("official_email").is_none());
}

/// Success envelope carrying `data`.
pub fn assert_success(response: &TestResponse, data: Value) {
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["is_success"], true);
    assert_eq!(response.body["official_email"], TEST_EMAIL);
    assert_eq!(response.body["data"], data);
    assert!(response.body.get("error").is_none());
}
