use axum::{extract::State, response::IntoResponse, Json};
use service_core::envelope::SuccessEnvelope;

use crate::startup::AppState;

/// Liveness probe; independent of the AI provider.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(SuccessEnvelope::identity(state.config.official_email.clone()))
}
