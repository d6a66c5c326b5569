//! HTTP handlers for the bfhl service.

pub mod bfhl;
pub mod health;

pub use bfhl::dispatch;
pub use health::health_check;

use service_core::error::AppError;

/// Fallback for every undefined route or method.
pub async fn not_found() -> AppError {
    AppError::NotFound("Endpoint not found".to_string())
}
