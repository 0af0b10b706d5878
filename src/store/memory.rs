//! In-process backend: nested map behind one coarse lock.
//!
//! `top_matches` scans and sorts the viewer's sub-map on every call. Per-viewer
//! candidate counts are small, so no separate index is kept.

use std::cmp::Ordering;
use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use super::error::StoreResult;
use super::traits::MatchStore;
use crate::profile::{MatchResult, SeedRecord};

type ViewerMatches = HashMap<String, MatchResult>;

/// Ephemeral store; contents live for the lifetime of the process.
#[derive(Default)]
pub struct MemoryMatchStore {
    cache: RwLock<HashMap<String, ViewerMatches>>,
}

impl MemoryMatchStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of stored pairs.
    pub fn len(&self) -> usize {
        self.cache.read().values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of viewers with at least one result.
    pub fn viewer_count(&self) -> usize {
        self.cache.read().len()
    }

    fn insert(
        cache: &mut HashMap<String, ViewerMatches>,
        viewer_id: &str,
        target_id: &str,
        result: MatchResult,
    ) {
        cache
            .entry(viewer_id.to_string())
            .or_default()
            .insert(target_id.to_string(), result);
    }
}

/// Score descending; ties broken by target id so one call's order is stable.
pub(crate) fn ranking_order(a: &MatchResult, b: &MatchResult) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| a.target_id.cmp(&b.target_id))
}

#[async_trait]
impl MatchStore for MemoryMatchStore {
    async fn get_match(
        &self,
        viewer_id: &str,
        target_id: &str,
    ) -> StoreResult<Option<MatchResult>> {
        Ok(self
            .cache
            .read()
            .get(viewer_id)
            .and_then(|matches| matches.get(target_id))
            .cloned())
    }

    async fn top_matches(&self, viewer_id: &str, n: usize) -> StoreResult<Vec<MatchResult>> {
        if n == 0 {
            return Ok(Vec::new());
        }

        let mut matches: Vec<MatchResult> = match self.cache.read().get(viewer_id) {
            Some(matches) => matches.values().cloned().collect(),
            None => return Ok(Vec::new()),
        };

        matches.sort_by(ranking_order);
        matches.truncate(n);
        Ok(matches)
    }

    async fn update_match(
        &self,
        viewer_id: &str,
        target_id: &str,
        result: MatchResult,
    ) -> StoreResult<()> {
        Self::insert(&mut self.cache.write(), viewer_id, target_id, result);
        Ok(())
    }

    async fn load_seed(&self, records: Vec<SeedRecord>) -> StoreResult<usize> {
        let count = records.len();
        let mut cache = self.cache.write();
        for record in records {
            let target_id = record.target_id.clone();
            let (viewer_id, result) = record.into_result();
            Self::insert(&mut cache, &viewer_id, &target_id, result);
        }
        Ok(count)
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

impl std::fmt::Debug for MemoryMatchStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryMatchStore")
            .field("viewers", &self.viewer_count())
            .field("pairs", &self.len())
            .finish()
    }
}
