//! Turns a handler panic into a 500 failure envelope instead of a dropped
//! connection.

use std::any::Any;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tower_http::catch_panic::CatchPanicLayer;

use crate::envelope::{ErrorEnvelope, INTERNAL_ERROR_MESSAGE};

pub type PanicHandler = fn(Box<dyn Any + Send + 'static>) -> Response;

pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        INTERNAL_ERROR_MESSAGE.to_string()
    };

    tracing::error!(panic = %message, "Handler panicked");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorEnvelope::new(message)),
    )
        .into_response()
}

pub fn catch_panic_layer() -> CatchPanicLayer<PanicHandler> {
    CatchPanicLayer::custom(panic_response as PanicHandler)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, http::Request, routing::get};
    use tower::ServiceExt;

    async fn explode() -> &'static str {
        panic!("divide by zero")
    }

    #[tokio::test]
    async fn panicking_handler_yields_error_envelope() {
        let app = Router::new()
            .route("/boom", get(explode))
            .layer(catch_panic_layer());

        let response = app
            .oneshot(Request::builder().uri("/boom").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let envelope: ErrorEnvelope = serde_json::from_slice(&body).unwrap();
        assert!(!envelope.is_success);
        assert_eq!(envelope.error, "divide by zero");
    }
}
