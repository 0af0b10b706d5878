//! OpenAI-compatible chat-completions transport over reqwest.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use super::client::CompletionBackend;
use super::config::OracleConfig;
use super::error::{OracleError, OracleResult};

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [RequestMessage<'a>; 1],
    stream: bool,
}

#[derive(Debug, Serialize)]
struct RequestMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Posts single-message chat requests to `{base_url}/chat/completions`.
#[derive(Clone)]
pub struct HttpChatBackend {
    http: HttpClient,
    url: String,
    api_key: String,
    model: String,
    timeout: Duration,
}

impl HttpChatBackend {
    /// Builds a backend with a client-wide request timeout.
    pub fn new(config: &OracleConfig) -> OracleResult<Self> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| OracleError::Config("no API key configured".to_string()))?;

        let http = HttpClient::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| OracleError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            url: config.completions_url(),
            api_key,
            model: config.model.clone(),
            timeout: config.timeout,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn map_send_error(&self, e: reqwest::Error) -> OracleError {
        if e.is_timeout() {
            OracleError::Timeout(self.timeout)
        } else {
            OracleError::Transport(e.to_string())
        }
    }
}

#[async_trait]
impl CompletionBackend for HttpChatBackend {
    async fn complete(&self, prompt: &str) -> OracleResult<String> {
        let request = ChatRequest {
            model: &self.model,
            messages: [RequestMessage {
                role: "user",
                content: prompt,
            }],
            stream: false,
        };

        let response = self
            .http
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(OracleError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let chat: ChatResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                OracleError::Timeout(self.timeout)
            } else {
                OracleError::malformed(format!("invalid completion envelope: {e}"))
            }
        })?;

        chat.choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content.unwrap_or_default())
            .ok_or(OracleError::EmptyResponse)
    }
}

impl std::fmt::Debug for HttpChatBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpChatBackend")
            .field("url", &self.url)
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}
