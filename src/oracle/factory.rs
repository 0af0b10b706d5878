use std::sync::Arc;

use tracing::info;

use super::client::{CompatibilityOracle, OracleClient};
use super::config::{OracleConfig, OracleProvider};
use super::error::OracleResult;
use super::genai_backend::GenaiBackend;
use super::http::HttpChatBackend;

/// Builds the configured oracle behind the [`CompatibilityOracle`] interface.
pub fn build_oracle(config: &OracleConfig) -> OracleResult<Arc<dyn CompatibilityOracle>> {
    let oracle: Arc<dyn CompatibilityOracle> = match config.provider {
        OracleProvider::Http => {
            let backend = HttpChatBackend::new(config)?;
            info!(url = backend.url(), model = %config.model, "Using HTTP chat oracle");
            Arc::new(OracleClient::new(backend, config.max_content_items))
        }
        OracleProvider::Genai => {
            info!(model = %config.model, "Using genai oracle");
            Arc::new(OracleClient::new(
                GenaiBackend::new(config),
                config.max_content_items,
            ))
        }
    };
    Ok(oracle)
}
