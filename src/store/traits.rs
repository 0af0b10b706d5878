use async_trait::async_trait;

use super::error::StoreResult;
use crate::profile::{MatchResult, SeedRecord};

#[async_trait]
/// Point lookups plus a per-viewer descending-by-score ranking.
///
/// Every backend keeps the ranking consistent with the point entries on each write
/// path. Missing entries are `Ok(None)` / an empty list, never an error.
pub trait MatchStore: Send + Sync {
    /// Returns the current result for the ordered pair, if any.
    async fn get_match(&self, viewer_id: &str, target_id: &str)
    -> StoreResult<Option<MatchResult>>;

    /// Returns at most `n` results for `viewer_id`, highest score first.
    async fn top_matches(&self, viewer_id: &str, n: usize) -> StoreResult<Vec<MatchResult>>;

    /// Upserts the pair's result and its ranking entry (last write wins).
    async fn update_match(
        &self,
        viewer_id: &str,
        target_id: &str,
        result: MatchResult,
    ) -> StoreResult<()>;

    /// Bulk-inserts precomputed results. Returns the number of records written.
    async fn load_seed(&self, records: Vec<SeedRecord>) -> StoreResult<usize>;

    /// Short backend label for logs.
    fn backend_name(&self) -> &'static str;
}
