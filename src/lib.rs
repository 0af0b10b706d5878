//! Affinity library crate (used by the binary and integration tests).
//!
//! # Public API Surface
//!
//! ## Core Types
//! - [`Profile`], [`MatchResult`], [`SeedRecord`] - Inputs and directional results
//! - [`MatchingService`] - Orchestrator, bounded queue and worker pool
//! - [`Config`], [`ConfigError`] - Environment-backed configuration
//!
//! ## Oracle
//! - [`CompatibilityOracle`], [`OracleClient`] - Judgments for one ordered pair
//! - [`HttpChatBackend`], [`GenaiBackend`] - Text-generation transports
//! - [`parse_judgment`], [`build_prompt`] - Prompt and response shape
//!
//! ## Result Store
//! - [`MatchStore`] - Point lookups plus per-viewer rankings
//! - [`MemoryMatchStore`], [`RedisMatchStore`] - Interchangeable backends
//!
//! ## Test/Mock Support
//! Mock implementations are available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod config;
pub mod oracle;
pub mod pipeline;
pub mod profile;
pub mod store;

pub use config::{Config, ConfigError};

#[cfg(any(test, feature = "mock"))]
pub use oracle::MockCompletionBackend;
pub use oracle::{
    CompatibilityOracle, CompletionBackend, FailureKind, GenaiBackend, HttpChatBackend, Judgment,
    OracleClient, OracleConfig, OracleError, OracleProvider, OracleResult, build_oracle,
    build_prompt, parse_judgment,
};

pub use pipeline::{
    DEFAULT_QUEUE_CAPACITY, DEFAULT_WORKER_COUNT, EnqueuePolicy, MatchJob, MatchingService,
    PipelineConfig, PipelineStats, plan_jobs,
};

pub use profile::{MatchResult, Profile, SeedRecord};

pub use store::{
    MatchStore, MemoryMatchStore, RedisMatchStore, StorageBackend, StoreConfig, StoreError,
    StoreResult, build_store, parse_seed, read_seed_file,
};
