use crate::config::{ConfigError, parse_env};

/// Default number of concurrent oracle workers.
pub const DEFAULT_WORKER_COUNT: usize = 5;
/// Default job queue capacity.
pub const DEFAULT_QUEUE_CAPACITY: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// What an enqueue does when the job queue is full.
pub enum EnqueuePolicy {
    #[default]
    /// Wait for space. Only the detached orchestration task waits, never the caller.
    Block,
    /// Discard the job and count it in [`PipelineStats::dropped`](super::PipelineStats).
    DropWhenFull,
}

impl std::str::FromStr for EnqueuePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "block" => Ok(Self::Block),
            "drop" | "drop_when_full" => Ok(Self::DropWhenFull),
            _ => Err(format!("Unknown enqueue policy: {}", s)),
        }
    }
}

#[derive(Debug, Clone)]
/// Worker pool and queue configuration.
pub struct PipelineConfig {
    pub worker_count: usize,
    pub queue_capacity: usize,
    pub enqueue_policy: EnqueuePolicy,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            worker_count: DEFAULT_WORKER_COUNT,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            enqueue_policy: EnqueuePolicy::default(),
        }
    }
}

impl PipelineConfig {
    pub(crate) const ENV_WORKERS: &'static str = "AFFINITY_WORKERS";
    pub(crate) const ENV_QUEUE_CAPACITY: &'static str = "AFFINITY_QUEUE_CAPACITY";
    pub(crate) const ENV_ENQUEUE_POLICY: &'static str = "AFFINITY_ENQUEUE_POLICY";

    /// Loads pipeline settings from environment variables (with defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        Ok(Self {
            worker_count: parse_env(Self::ENV_WORKERS)?.unwrap_or(defaults.worker_count),
            queue_capacity: parse_env(Self::ENV_QUEUE_CAPACITY)?
                .unwrap_or(defaults.queue_capacity),
            enqueue_policy: parse_env(Self::ENV_ENQUEUE_POLICY)?
                .unwrap_or(defaults.enqueue_policy),
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.worker_count == 0 {
            return Err(ConfigError::Zero {
                name: Self::ENV_WORKERS,
            });
        }
        if self.queue_capacity == 0 {
            return Err(ConfigError::Zero {
                name: Self::ENV_QUEUE_CAPACITY,
            });
        }
        Ok(())
    }

    #[cfg(test)]
    pub fn for_testing(worker_count: usize, queue_capacity: usize) -> Self {
        Self {
            worker_count,
            queue_capacity,
            enqueue_policy: EnqueuePolicy::Block,
        }
    }
}
