//! Profile descriptors and directional match results.
//!
//! A [`Profile`] is read-only input supplied by collaborators (profile storage and
//! content ingestion). A [`MatchResult`] is the scored outcome for one ordered
//! `(viewer, target)` pair; `(a, b)` and `(b, a)` are independent results.

#[cfg(test)]
mod tests;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Profile descriptor consumed while building oracle requests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Stable user identifier.
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Handle on the content platform.
    #[serde(default)]
    pub username: String,
    /// Short AI-generated or user-provided summary (may be empty).
    #[serde(default)]
    pub summary: String,
    /// Free-text interests (may be empty).
    #[serde(default)]
    pub interests: String,
    /// Recent content samples, newest first (may be empty).
    #[serde(default)]
    pub tweets: Vec<String>,
}

impl Profile {
    /// Creates a profile with only an identifier set.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    pub fn with_interests(mut self, interests: impl Into<String>) -> Self {
        self.interests = interests.into();
        self
    }

    pub fn with_tweets<I, S>(mut self, tweets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tweets = tweets.into_iter().map(Into::into).collect();
        self
    }

    /// Returns `true` if the profile has content or interests to score against.
    ///
    /// A viewer without signal is never sent to the oracle.
    #[inline]
    pub fn has_signal(&self) -> bool {
        !self.tweets.is_empty() || !self.interests.trim().is_empty()
    }

    /// Returns at most `limit` content samples, preserving order.
    #[inline]
    pub fn recent_tweets(&self, limit: usize) -> &[String] {
        &self.tweets[..self.tweets.len().min(limit)]
    }
}

/// Compatibility score for one directional pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    /// The "other" party of the pair.
    pub target_id: String,
    /// Score, nominally in `[0, 100]`. Not range-checked.
    pub score: f64,
    /// Short natural-language justification addressed to the viewer.
    pub reason: String,
    /// When the score was computed (or loaded from a seed).
    pub timestamp: DateTime<Utc>,
}

impl MatchResult {
    /// Creates a result stamped with the current time.
    pub fn new(target_id: impl Into<String>, score: f64, reason: impl Into<String>) -> Self {
        Self {
            target_id: target_id.into(),
            score,
            reason: reason.into(),
            timestamp: Utc::now(),
        }
    }
}

/// One precomputed entry of a seed file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedRecord {
    pub viewer_id: String,
    pub target_id: String,
    pub score: f64,
    #[serde(default)]
    pub reason: String,
}

impl SeedRecord {
    pub fn new(
        viewer_id: impl Into<String>,
        target_id: impl Into<String>,
        score: f64,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            viewer_id: viewer_id.into(),
            target_id: target_id.into(),
            score,
            reason: reason.into(),
        }
    }

    /// Converts the record into a result stamped with the load time.
    pub fn into_result(self) -> (String, MatchResult) {
        let result = MatchResult::new(self.target_id, self.score, self.reason);
        (self.viewer_id, result)
    }
}
