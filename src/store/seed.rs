//! Seed files: a JSON array of `{viewer_id, target_id, score, reason}` records.

use std::path::Path;

use super::error::{StoreError, StoreResult};
use crate::profile::SeedRecord;

/// Parses seed records from a JSON string.
pub fn parse_seed(json: &str) -> StoreResult<Vec<SeedRecord>> {
    Ok(serde_json::from_str(json)?)
}

/// Reads and parses a seed file.
pub async fn read_seed_file(path: &Path) -> StoreResult<Vec<SeedRecord>> {
    let data = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| StoreError::SeedRead {
            path: path.to_path_buf(),
            source,
        })?;
    parse_seed(&data)
}
