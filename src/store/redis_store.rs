//! Valkey/Redis backend: point records plus a per-viewer sorted-set index.
//!
//! Layout (optionally prefixed with `{namespace}:`):
//! - `match:{viewer}:{target}` holds the JSON-encoded [`MatchResult`]
//! - `matches:{viewer}` is a sorted set of target ids weighted by score
//!
//! The point write and the ranking write are pipelined, not wrapped in MULTI/EXEC.
//! A failure between the two leaves the index briefly out of step with the point
//! record; readers skip index members whose point record is missing.

use async_trait::async_trait;
use deadpool_redis::{Config, Connection, Pool, Runtime};
use redis::AsyncCommands;
use tracing::{debug, warn};

use super::error::{StoreError, StoreResult};
use super::traits::MatchStore;
use crate::profile::{MatchResult, SeedRecord};

/// Durable store backed by a pooled Valkey/Redis connection.
#[derive(Clone)]
pub struct RedisMatchStore {
    pool: Pool,
    namespace: Option<String>,
}

impl RedisMatchStore {
    /// Connects to `url` and verifies the connection with `PING`.
    pub async fn new(
        url: &str,
        namespace: Option<String>,
        pool_size: usize,
    ) -> StoreResult<Self> {
        let config = Config::from_url(url);
        let pool = config
            .builder()
            .map_err(|e| StoreError::Connection(e.to_string()))?
            .max_size(pool_size)
            .runtime(Runtime::Tokio1)
            .build()
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        let mut conn = pool
            .get()
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        redis::cmd("PING")
            .query_async::<String>(&mut *conn)
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        Ok(Self { pool, namespace })
    }

    fn prefixed_key(&self, key: String) -> String {
        match &self.namespace {
            Some(ns) => format!("{}:{}", ns, key),
            None => key,
        }
    }

    fn match_key(&self, viewer_id: &str, target_id: &str) -> String {
        self.prefixed_key(format!("match:{}:{}", viewer_id, target_id))
    }

    fn ranking_key(&self, viewer_id: &str) -> String {
        self.prefixed_key(format!("matches:{}", viewer_id))
    }

    async fn connection(&self) -> StoreResult<Connection> {
        self.pool
            .get()
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))
    }

    /// Queues the point write and the ranking write for one pair.
    fn queue_update(
        &self,
        pipe: &mut redis::Pipeline,
        viewer_id: &str,
        target_id: &str,
        result: &MatchResult,
    ) -> StoreResult<()> {
        let payload =
            serde_json::to_string(result).map_err(|e| StoreError::Serialisation(e.to_string()))?;

        pipe.set(self.match_key(viewer_id, target_id), payload)
            .ignore()
            .zadd(self.ranking_key(viewer_id), target_id, result.score)
            .ignore();

        Ok(())
    }
}

fn decode(raw: &str) -> StoreResult<MatchResult> {
    serde_json::from_str(raw).map_err(|e| StoreError::Serialisation(e.to_string()))
}

#[async_trait]
impl MatchStore for RedisMatchStore {
    async fn get_match(
        &self,
        viewer_id: &str,
        target_id: &str,
    ) -> StoreResult<Option<MatchResult>> {
        let mut conn = self.connection().await?;

        let raw: Option<String> = conn
            .get(self.match_key(viewer_id, target_id))
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        raw.as_deref().map(decode).transpose()
    }

    async fn top_matches(&self, viewer_id: &str, n: usize) -> StoreResult<Vec<MatchResult>> {
        if n == 0 {
            return Ok(Vec::new());
        }

        let mut conn = self.connection().await?;

        let stop = isize::try_from(n - 1).unwrap_or(isize::MAX);
        let target_ids: Vec<String> = conn
            .zrevrange(self.ranking_key(viewer_id), 0, stop)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        if target_ids.is_empty() {
            return Ok(Vec::new());
        }

        let keys: Vec<String> = target_ids
            .iter()
            .map(|target_id| self.match_key(viewer_id, target_id))
            .collect();

        let records: Vec<Option<String>> = redis::cmd("MGET")
            .arg(&keys)
            .query_async(&mut *conn)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        let mut out = Vec::with_capacity(records.len());
        for (target_id, raw) in target_ids.iter().zip(records) {
            let Some(raw) = raw else {
                debug!(viewer = viewer_id, target = %target_id, "Ranked target has no point record");
                continue;
            };
            match decode(&raw) {
                Ok(result) => out.push(result),
                Err(e) => {
                    warn!(viewer = viewer_id, target = %target_id, error = %e, "Skipping undecodable match record");
                }
            }
        }

        Ok(out)
    }

    async fn update_match(
        &self,
        viewer_id: &str,
        target_id: &str,
        result: MatchResult,
    ) -> StoreResult<()> {
        let mut pipe = redis::pipe();
        self.queue_update(&mut pipe, viewer_id, target_id, &result)?;

        let mut conn = self.connection().await?;
        pipe.query_async::<()>(&mut *conn)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))
    }

    async fn load_seed(&self, records: Vec<SeedRecord>) -> StoreResult<usize> {
        if records.is_empty() {
            return Ok(0);
        }

        let count = records.len();
        let mut pipe = redis::pipe();
        for record in records {
            let target_id = record.target_id.clone();
            let (viewer_id, result) = record.into_result();
            self.queue_update(&mut pipe, &viewer_id, &target_id, &result)?;
        }

        let mut conn = self.connection().await?;
        pipe.query_async::<()>(&mut *conn)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        Ok(count)
    }

    fn backend_name(&self) -> &'static str {
        "redis"
    }
}

impl std::fmt::Debug for RedisMatchStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisMatchStore")
            .field("namespace", &self.namespace)
            .finish_non_exhaustive()
    }
}
