use std::sync::Arc;

use tracing::info;

use super::config::{StorageBackend, StoreConfig};
use super::error::{StoreError, StoreResult};
use super::memory::MemoryMatchStore;
use super::redis_store::RedisMatchStore;
use super::traits::MatchStore;

/// Builds the configured backend behind the [`MatchStore`] interface.
pub async fn build_store(config: &StoreConfig) -> StoreResult<Arc<dyn MatchStore>> {
    match config.backend {
        StorageBackend::Memory => {
            info!("Using memory match storage");
            Ok(Arc::new(MemoryMatchStore::new()))
        }
        StorageBackend::Redis => {
            let url = config.redis_url.as_deref().ok_or_else(|| {
                StoreError::Connection("redis backend selected without a URL".to_string())
            })?;
            let store =
                RedisMatchStore::new(url, config.namespace.clone(), config.pool_size).await?;
            info!(namespace = ?config.namespace, "Using redis match storage");
            Ok(Arc::new(store))
        }
    }
}
