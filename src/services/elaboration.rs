// ABOUTME: Feedback elaboration service wrapping an LLM provider with a bounded timeout
// ABOUTME: Never fails the pipeline; any provider problem degrades to placeholder text
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time::timeout;
use tracing::warn;

use crate::config::ElaborationConfig;
use crate::constants::feedback::ELABORATION_PLACEHOLDER;
use crate::errors::AppError;
use crate::llm::prompts::{elaboration_prompt, COACH_SYSTEM_PROMPT};
use crate::llm::{
    ChatMessage, ChatRequest, LlmProvider, OpenAiCompatibleConfig, OpenAiCompatibleProvider,
};
use crate::logging::AppLogger;

/// Rewrites feedback lines into one motivating paragraph
#[derive(Clone)]
pub struct FeedbackElaborator {
    provider: Option<Arc<dyn LlmProvider>>,
    model: String,
    max_tokens: u32,
    timeout: Duration,
}

impl FeedbackElaborator {
    /// Create an elaborator over any provider
    #[must_use]
    pub fn new(provider: Arc<dyn LlmProvider>, max_tokens: u32, timeout: Duration) -> Self {
        let model = provider.default_model().to_owned();
        Self {
            provider: Some(provider),
            model,
            max_tokens,
            timeout,
        }
    }

    /// Build from configuration
    ///
    /// Returns `Ok(None)` when elaboration is disabled. A missing API key is
    /// not an error: requests will fail and produce the placeholder.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created
    pub fn from_config(config: &ElaborationConfig) -> Result<Option<Self>, AppError> {
        if !config.enabled {
            return Ok(None);
        }

        if config.api_key.is_none() {
            warn!(
                base_url = %config.base_url,
                "Elaboration enabled without an API token; elaborated feedback will be a placeholder"
            );
        }

        let provider =
            OpenAiCompatibleProvider::new(OpenAiCompatibleConfig::from_elaboration(config))?;
        Ok(Some(Self {
            provider: Some(Arc::new(provider)),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            timeout: Duration::from_secs(config.timeout_secs),
        }))
    }

    /// Elaborator with no provider; always yields the placeholder
    #[must_use]
    pub fn unavailable() -> Self {
        Self {
            provider: None,
            model: String::new(),
            max_tokens: 0,
            timeout: Duration::ZERO,
        }
    }

    /// Elaborate the feedback for one scored person
    ///
    /// Always returns text: the completion on success, otherwise
    /// [`ELABORATION_PLACEHOLDER`].
    pub async fn elaborate(&self, overall_score: f64, feedback: &[String]) -> String {
        let Some(provider) = &self.provider else {
            warn!("No elaboration provider configured");
            return ELABORATION_PLACEHOLDER.to_owned();
        };

        let request = ChatRequest::new(vec![
            ChatMessage::system(COACH_SYSTEM_PROMPT),
            ChatMessage::user(elaboration_prompt(overall_score, feedback)),
        ])
        .with_model(self.model.clone())
        .with_max_tokens(self.max_tokens);

        let start = Instant::now();
        let outcome = match timeout(self.timeout, provider.complete(&request)).await {
            Ok(Ok(response)) if !response.content.trim().is_empty() => {
                Ok(response.content.trim().to_owned())
            }
            Ok(Ok(_)) => Err("empty completion".to_owned()),
            Ok(Err(e)) => Err(e.to_string()),
            Err(_) => Err(format!("timed out after {}s", self.timeout.as_secs())),
        };
        AppLogger::log_elaboration(&self.model, outcome.is_ok(), start.elapsed());

        outcome.unwrap_or_else(|reason| {
            warn!(provider = provider.name(), %reason, "Feedback elaboration failed");
            ELABORATION_PLACEHOLDER.to_owned()
        })
    }
}

impl fmt::Debug for FeedbackElaborator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FeedbackElaborator")
            .field("provider", &self.provider.as_ref().map(|p| p.name()))
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("timeout", &self.timeout)
            .finish()
    }
}
