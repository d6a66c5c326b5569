use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde_json::Value;
use service_core::envelope::SuccessEnvelope;
use service_core::error::AppError;

use crate::dtos::{BfhlRequest, OperationOutput, RequestError};
use crate::services::math;
use crate::startup::AppState;

/// `POST /bfhl`: decode the single-key body, run the operation, wrap the
/// result.
///
/// A body that is not `application/json`, or does not parse, is treated the
/// same as an object with the wrong number of keys.
#[tracing::instrument(skip(state, body), fields(operation))]
pub async fn dispatch(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<SuccessEnvelope<OperationOutput>>, AppError> {
    let request = body
        .map_err(|rejection| {
            tracing::debug!(reason = %rejection.body_text(), "Unreadable bfhl body");
            RequestError::NotSingleKey
        })
        .and_then(|Json(value)| BfhlRequest::from_value(value))
        .inspect_err(|e| tracing::warn!(error = %e, "Rejected bfhl request"))?;

    tracing::Span::current().record("operation", request.operation().as_str());

    let data = execute(&state, request).await?;

    Ok(Json(SuccessEnvelope::new(
        state.config.official_email.clone(),
        data,
    )))
}

async fn execute(state: &AppState, request: BfhlRequest) -> Result<OperationOutput, AppError> {
    let data = match request {
        BfhlRequest::Fibonacci(n) => OperationOutput::from(math::fibonacci(n)?),
        BfhlRequest::Prime(xs) => {
            // Trial division on large inputs must not stall the async workers.
            let primes = tokio::task::spawn_blocking(move || math::get_primes(&xs))
                .await
                .map_err(|e| AppError::InternalError(anyhow::Error::new(e)))?;
            OperationOutput::Integers(primes)
        }
        BfhlRequest::Lcm(xs) => OperationOutput::Integer(math::calculate_lcm(&xs)?),
        BfhlRequest::Hcf(xs) => OperationOutput::Integer(math::calculate_hcf(&xs)?),
        BfhlRequest::Ai(question) => OperationOutput::Text(state.ai.ask(&question).await?),
    };

    Ok(data)
}
