//! Environment-backed configuration.
//!
//! Most settings have defaults. Override with `AFFINITY_*` environment variables.
//! Each subsystem owns its section ([`StoreConfig`], [`OracleConfig`],
//! [`PipelineConfig`]); [`Config`] composes them.

pub mod error;

#[cfg(test)]
mod tests;

pub use error::ConfigError;

use std::env;
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;

use crate::oracle::OracleConfig;
use crate::pipeline::PipelineConfig;
use crate::store::StoreConfig;

/// Full service configuration loaded from environment variables.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Result store backend and connection settings.
    pub store: StoreConfig,

    /// Oracle transport, model and prompt settings.
    pub oracle: OracleConfig,

    /// Worker pool and queue settings.
    pub pipeline: PipelineConfig,

    /// Optional seed file loaded once at startup.
    pub seed_path: Option<PathBuf>,
}

impl Config {
    const ENV_SEED_PATH: &'static str = "AFFINITY_SEED_PATH";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            store: StoreConfig::from_env()?,
            oracle: OracleConfig::from_env()?,
            pipeline: PipelineConfig::from_env()?,
            seed_path: non_empty_env(Self::ENV_SEED_PATH).map(PathBuf::from),
        })
    }

    /// Validates paths and basic invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.store.validate()?;
        self.pipeline.validate()?;

        if self.oracle.max_content_items == 0 {
            return Err(ConfigError::Zero {
                name: OracleConfig::ENV_MAX_CONTENT_ITEMS,
            });
        }

        if let Some(ref path) = self.seed_path {
            if !path.exists() {
                return Err(ConfigError::PathNotFound { path: path.clone() });
            }
            if !path.is_file() {
                return Err(ConfigError::NotAFile { path: path.clone() });
            }
        }

        Ok(())
    }
}

/// Returns the trimmed value of `name`, or `None` if unset or blank.
pub(crate) fn non_empty_env(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parses `name` if set; an unparsable value is an error rather than a silent default.
pub(crate) fn parse_env<T>(name: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    match non_empty_env(name) {
        Some(value) => value
            .parse()
            .map(Some)
            .map_err(|e: T::Err| ConfigError::InvalidValue {
                name,
                reason: e.to_string(),
                value,
            }),
        None => Ok(None),
    }
}
