//! Profile fixtures and a prompt-aware completion backend.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use affinity::oracle::{CompletionBackend, OracleResult};
use affinity::profile::Profile;
use async_trait::async_trait;

/// Builder for test profiles with a unique summary derived from the id.
pub struct ProfileBuilder {
    profile: Profile,
}

impl ProfileBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            profile: Profile::new(id).with_summary(format!("Summary of {id}")),
        }
    }

    pub fn interests(mut self, interests: &str) -> Self {
        self.profile.interests = interests.to_string();
        self
    }

    pub fn tweets(mut self, tweets: &[&str]) -> Self {
        self.profile.tweets = tweets.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn silent(mut self) -> Self {
        self.profile.interests.clear();
        self.profile.tweets.clear();
        self
    }

    pub fn build(self) -> Profile {
        self.profile
    }
}

/// Four profiles with signal: `alice`, `bob`, `carol`, `dave`.
pub fn roster() -> Vec<Profile> {
    vec![
        ProfileBuilder::new("alice").interests("Go, AI").build(),
        ProfileBuilder::new("bob")
            .interests("UI, AI")
            .tweets(&["Shipped a new design system"])
            .build(),
        ProfileBuilder::new("carol").interests("Climbing").build(),
        ProfileBuilder::new("dave")
            .tweets(&["Kernel hacking tonight", "Rust 2024 edition is out"])
            .build(),
    ]
}

/// Scores a prompt by the candidate it describes.
///
/// The candidate is identified by its `Summary of <id>` line under `User B`, so
/// every viewer sees the same score for a given candidate.
#[derive(Clone, Default)]
pub struct ScriptedBackend {
    scores: Arc<HashMap<String, f64>>,
    calls: Arc<AtomicUsize>,
}

impl ScriptedBackend {
    pub fn new(scores: &[(&str, f64)]) -> Self {
        Self {
            scores: Arc::new(
                scores
                    .iter()
                    .map(|(id, score)| (id.to_string(), *score))
                    .collect(),
            ),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CompletionBackend for ScriptedBackend {
    async fn complete(&self, prompt: &str) -> OracleResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let score = self
            .scores
            .iter()
            .find(|(id, _)| prompt.contains(&format!("User B: Summary of {id}.")))
            .map(|(_, score)| *score)
            .unwrap_or(0.0);

        Ok(format!(
            "Here is my assessment: {{\"score\": {score}, \"reason\": \"Scripted.\"}}"
        ))
    }
}
