//! Mock provider implementation for testing.

use super::{GenerationParams, ProviderError, ProviderResponse, TextProvider};
use async_trait::async_trait;
use std::sync::Mutex;

/// Mock text provider returning a canned outcome and recording the last
/// prompt it was sent.
pub struct MockTextProvider {
    outcome: Result<ProviderResponse, ProviderError>,
    last_request: Mutex<Option<(String, GenerationParams)>>,
}

impl MockTextProvider {
    pub fn with_candidates(candidates: Vec<Option<String>>) -> Self {
        Self {
            outcome: Ok(ProviderResponse { candidates }),
            last_request: Mutex::new(None),
        }
    }

    /// Single candidate with the given text.
    pub fn answering(text: &str) -> Self {
        Self::with_candidates(vec![Some(text.to_string())])
    }

    pub fn failing(error: ProviderError) -> Self {
        Self {
            outcome: Err(error),
            last_request: Mutex::new(None),
        }
    }

    pub fn last_request(&self) -> Option<(String, GenerationParams)> {
        self.last_request
            .lock()
            .ok()
            .and_then(|guard| guard.clone())
    }
}

#[async_trait]
impl TextProvider for MockTextProvider {
    async fn generate(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<ProviderResponse, ProviderError> {
        if let Ok(mut guard) = self.last_request.lock() {
            *guard = Some((prompt.to_string(), params.clone()));
        }

        self.outcome.clone()
    }
}
