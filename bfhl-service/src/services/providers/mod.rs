//! AI provider abstractions and implementations.
//!
//! This module provides a trait-based abstraction for text generation
//! backends, allowing the Gemini client to be swapped for a mock in tests.

pub mod gemini;
pub mod mock;

use async_trait::async_trait;
use thiserror::Error;

/// Error type for provider operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProviderError {
    #[error("{0}")]
    NotConfigured(String),

    #[error("{0}")]
    ApiError(String),

    #[error("{0}")]
    NetworkError(String),
}

/// Result of a provider call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProviderResponse {
    /// Text of each returned candidate, in order. `None` when a candidate
    /// carried no text part.
    pub candidates: Vec<Option<String>>,
}

/// Generation parameters for AI requests.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerationParams {
    /// Temperature (0.0 - 2.0).
    pub temperature: Option<f32>,

    /// Maximum output tokens.
    pub max_tokens: Option<i32>,
}

/// Trait for text generation providers (e.g., Gemini).
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Generate candidate completions for a single-turn prompt.
    async fn generate(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<ProviderResponse, ProviderError>;
}
