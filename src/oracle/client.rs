use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use super::error::{OracleError, OracleResult};
use super::parse::{Judgment, parse_judgment};
use super::prompt::build_prompt;
use crate::profile::Profile;

#[async_trait]
/// Raw text-generation capability: one prompt in, raw answer text out.
pub trait CompletionBackend: Send + Sync {
    /// Sends `prompt` and returns the first answer's text.
    async fn complete(&self, prompt: &str) -> OracleResult<String>;
}

#[async_trait]
impl<T: CompletionBackend + ?Sized> CompletionBackend for Arc<T> {
    async fn complete(&self, prompt: &str) -> OracleResult<String> {
        (**self).complete(prompt).await
    }
}

#[async_trait]
/// Directional compatibility judgment: two descriptors in, result or error out.
pub trait CompatibilityOracle: Send + Sync {
    /// Scores `candidate` from the perspective of `viewer`.
    async fn judge(&self, viewer: &Profile, candidate: &Profile) -> OracleResult<Judgment>;
}

/// Prompt construction and response parsing on top of a [`CompletionBackend`].
pub struct OracleClient<B> {
    backend: B,
    max_content_items: usize,
}

impl<B: CompletionBackend> OracleClient<B> {
    pub fn new(backend: B, max_content_items: usize) -> Self {
        Self {
            backend,
            max_content_items,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn max_content_items(&self) -> usize {
        self.max_content_items
    }
}

impl<B> std::fmt::Debug for OracleClient<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OracleClient")
            .field("max_content_items", &self.max_content_items)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl<B: CompletionBackend> CompatibilityOracle for OracleClient<B> {
    async fn judge(&self, viewer: &Profile, candidate: &Profile) -> OracleResult<Judgment> {
        if !viewer.has_signal() {
            return Err(OracleError::NoSignal {
                viewer: viewer.id.clone(),
            });
        }

        let prompt = build_prompt(viewer, candidate, self.max_content_items);
        debug!(
            viewer = %viewer.id,
            candidate = %candidate.id,
            prompt_len = prompt.len(),
            "Requesting compatibility judgment"
        );

        let raw = self.backend.complete(&prompt).await?;
        parse_judgment(&raw)
    }
}
