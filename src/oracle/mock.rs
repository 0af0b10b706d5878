//! Deterministic stand-in for the text-generation service.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use super::client::CompletionBackend;
use super::error::{OracleError, OracleResult};

#[derive(Debug, Clone)]
enum MockReply {
    Text(String),
    Transport(String),
}

/// Recording [`CompletionBackend`] that returns a canned reply.
///
/// Clones share the same call log, so a test can keep a handle after moving the
/// backend into an [`OracleClient`](super::OracleClient).
#[derive(Debug, Clone)]
pub struct MockCompletionBackend {
    reply: Arc<Mutex<MockReply>>,
    prompts: Arc<Mutex<Vec<String>>>,
    delay: Option<Duration>,
}

impl MockCompletionBackend {
    /// Replies with `text` to every prompt.
    pub fn with_response(text: impl Into<String>) -> Self {
        Self {
            reply: Arc::new(Mutex::new(MockReply::Text(text.into()))),
            prompts: Arc::new(Mutex::new(Vec::new())),
            delay: None,
        }
    }

    /// Replies `{"score": <score>, "reason": <reason>}` to every prompt.
    pub fn with_judgment(score: f64, reason: &str) -> Self {
        let body = serde_json::json!({ "score": score, "reason": reason });
        Self::with_response(body.to_string())
    }

    /// Fails every call with a transport error.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            reply: Arc::new(Mutex::new(MockReply::Transport(message.into()))),
            prompts: Arc::new(Mutex::new(Vec::new())),
            delay: None,
        }
    }

    /// Sleeps for `delay` before replying.
    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Replaces the canned reply for subsequent calls.
    pub fn set_response(&self, text: impl Into<String>) {
        *self.reply.lock() = MockReply::Text(text.into());
    }

    /// Makes subsequent calls fail with a transport error.
    pub fn set_failing(&self, message: impl Into<String>) {
        *self.reply.lock() = MockReply::Transport(message.into());
    }

    pub fn call_count(&self) -> usize {
        self.prompts.lock().len()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().clone()
    }
}

#[async_trait]
impl CompletionBackend for MockCompletionBackend {
    async fn complete(&self, prompt: &str) -> OracleResult<String> {
        self.prompts.lock().push(prompt.to_string());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let reply = self.reply.lock().clone();
        match reply {
            MockReply::Text(text) => Ok(text),
            MockReply::Transport(message) => Err(OracleError::Transport(message)),
        }
    }
}
