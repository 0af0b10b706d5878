//! Multi-provider transport via `genai`.
//!
//! Credentials come from the provider's own environment variable (for example
//! `XAI_API_KEY` for `grok*` models), not from [`OracleConfig::api_key`].

use std::time::Duration;

use async_trait::async_trait;
use genai::Client;
use genai::chat::{ChatMessage, ChatRequest};

use super::client::CompletionBackend;
use super::config::OracleConfig;
use super::error::{OracleError, OracleResult};

#[derive(Clone)]
pub struct GenaiBackend {
    client: Client,
    model: String,
    timeout: Duration,
}

impl GenaiBackend {
    pub fn new(config: &OracleConfig) -> Self {
        Self {
            client: Client::default(),
            model: config.model.clone(),
            timeout: config.timeout,
        }
    }
}

#[async_trait]
impl CompletionBackend for GenaiBackend {
    async fn complete(&self, prompt: &str) -> OracleResult<String> {
        let request = ChatRequest::new(vec![ChatMessage::user(prompt)]);

        let response = tokio::time::timeout(
            self.timeout,
            self.client.exec_chat(&self.model, request, None),
        )
        .await
        .map_err(|_| OracleError::Timeout(self.timeout))?
        .map_err(|e| OracleError::Transport(e.to_string()))?;

        response
            .first_text()
            .map(str::to_string)
            .ok_or(OracleError::EmptyResponse)
    }
}

impl std::fmt::Debug for GenaiBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenaiBackend")
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}
