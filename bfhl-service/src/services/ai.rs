//! Short-answer AI delegate.
//!
//! Wraps a [`TextProvider`] with a fixed "one word or short phrase" prompt
//! and normalizes whatever comes back into a single bare phrase.

use std::sync::Arc;

use async_trait::async_trait;
use service_core::error::AppError;
use thiserror::Error;

use super::providers::{GenerationParams, ProviderError, TextProvider};

pub const ANSWER_TEMPERATURE: f32 = 0.4;
pub const ANSWER_MAX_TOKENS: i32 = 50;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum AiError {
    /// No credential for the inference service.
    #[error("AI API error: {0}")]
    Unavailable(String),

    #[error("AI API error: No response from AI")]
    EmptyResponse,

    #[error("AI API error: {0}")]
    Transport(String),
}

impl From<ProviderError> for AiError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::NotConfigured(msg) => AiError::Unavailable(msg),
            ProviderError::ApiError(msg) | ProviderError::NetworkError(msg) => {
                AiError::Transport(msg)
            }
        }
    }
}

impl From<AiError> for AppError {
    fn from(err: AiError) -> Self {
        AppError::InternalError(anyhow::Error::new(err))
    }
}

/// Answers a natural-language question with a short phrase.
#[async_trait]
pub trait AiDelegate: Send + Sync {
    async fn ask(&self, question: &str) -> Result<String, AiError>;
}

pub struct ShortAnswerDelegate {
    provider: Arc<dyn TextProvider>,
}

impl ShortAnswerDelegate {
    pub fn new(provider: Arc<dyn TextProvider>) -> Self {
        Self { provider }
    }

    async fn ask_provider(&self, question: &str) -> Result<String, AiError> {
        let params = GenerationParams {
            temperature: Some(ANSWER_TEMPERATURE),
            max_tokens: Some(ANSWER_MAX_TOKENS),
        };

        let response = self
            .provider
            .generate(&short_answer_prompt(question), &params)
            .await?;

        let text = response
            .candidates
            .into_iter()
            .next()
            .ok_or(AiError::EmptyResponse)?
            .ok_or_else(|| AiError::Transport("Response candidate contained no text".to_string()))?;

        Ok(sanitize_answer(&text))
    }
}

#[async_trait]
impl AiDelegate for ShortAnswerDelegate {
    async fn ask(&self, question: &str) -> Result<String, AiError> {
        self.ask_provider(question).await.inspect_err(|e| {
            tracing::error!(error = %e, "AI request failed");
        })
    }
}

pub fn short_answer_prompt(question: &str) -> String {
    format!(
        "Answer this question with ONLY a single word or short phrase, no explanation: {}",
        question
    )
}

/// Reduce a model reply to its first phrase.
///
/// Keeps the first line, cuts at the first period, then drops `. , ! ?`.
/// Decimals and abbreviations are truncated too: `"3.14"` becomes `"3"`.
pub fn sanitize_answer(raw: &str) -> String {
    let first_line = raw.trim().split('\n').next().unwrap_or_default();
    let first_sentence = first_line.split('.').next().unwrap_or_default();

    first_sentence
        .chars()
        .filter(|c| !matches!(c, '.' | ',' | '!' | '?'))
        .collect::<String>()
        .trim()
        .to_string()
}
