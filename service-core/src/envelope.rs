//! Uniform JSON response envelopes.
//!
//! Every response the services produce is one of two shapes: a success
//! envelope carrying the service identity and an optional payload, or a
//! failure envelope carrying an error message. The two never mix.

use serde::{Deserialize, Serialize};

/// Fallback message used when a failure carries no message of its own.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuccessEnvelope<T> {
    pub is_success: bool,
    pub official_email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> SuccessEnvelope<T> {
    /// Success envelope with a payload.
    pub fn new(official_email: impl Into<String>, data: T) -> Self {
        Self {
            is_success: true,
            official_email: official_email.into(),
            data: Some(data),
        }
    }
}

impl SuccessEnvelope<()> {
    /// Success envelope with the identity string only (liveness probes).
    pub fn identity(official_email: impl Into<String>) -> Self {
        Self {
            is_success: true,
            official_email: official_email.into(),
            data: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub is_success: bool,
    pub error: String,
}

impl ErrorEnvelope {
    pub fn new(error: impl Into<String>) -> Self {
        let error = error.into();
        let error = if error.trim().is_empty() {
            INTERNAL_ERROR_MESSAGE.to_string()
        } else {
            error
        };

        Self {
            is_success: false,
            error,
        }
    }
}
