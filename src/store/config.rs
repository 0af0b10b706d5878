use crate::config::{ConfigError, non_empty_env, parse_env};

/// Default connection pool size for the networked backend.
pub const DEFAULT_REDIS_POOL_SIZE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// Result store backend selection.
pub enum StorageBackend {
    #[default]
    /// In-process map; lost on restart.
    Memory,
    /// Valkey/Redis point records plus sorted-set rankings.
    Redis,
}

impl std::str::FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "memory" | "mem" => Ok(Self::Memory),
            "redis" | "valkey" => Ok(Self::Redis),
            _ => Err(format!("Unknown storage backend: {}", s)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub backend: StorageBackend,
    /// Connection URL, e.g. `redis://:password@host:6379/0`. Required for `Redis`.
    pub redis_url: Option<String>,
    /// Optional key prefix for every key this store writes.
    pub namespace: Option<String>,
    pub pool_size: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            redis_url: None,
            namespace: None,
            pool_size: DEFAULT_REDIS_POOL_SIZE,
        }
    }
}

impl StoreConfig {
    pub(crate) const ENV_STORAGE: &'static str = "AFFINITY_STORAGE";
    pub(crate) const ENV_REDIS_URL: &'static str = "AFFINITY_REDIS_URL";
    pub(crate) const ENV_REDIS_NAMESPACE: &'static str = "AFFINITY_REDIS_NAMESPACE";
    pub(crate) const ENV_REDIS_POOL_SIZE: &'static str = "AFFINITY_REDIS_POOL_SIZE";

    /// Loads store settings from environment variables (with defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        Ok(Self {
            backend: parse_env(Self::ENV_STORAGE)?.unwrap_or(defaults.backend),
            redis_url: non_empty_env(Self::ENV_REDIS_URL),
            namespace: non_empty_env(Self::ENV_REDIS_NAMESPACE),
            pool_size: parse_env(Self::ENV_REDIS_POOL_SIZE)?.unwrap_or(defaults.pool_size),
        })
    }

    /// Checks backend-specific requirements.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.backend == StorageBackend::Redis {
            if self.redis_url.is_none() {
                return Err(ConfigError::MissingEnvVar {
                    name: Self::ENV_REDIS_URL,
                });
            }
            if self.pool_size == 0 {
                return Err(ConfigError::Zero {
                    name: Self::ENV_REDIS_POOL_SIZE,
                });
            }
        }
        Ok(())
    }
}
