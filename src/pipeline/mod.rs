//! Asynchronous scoring pipeline: orchestrator, bounded job queue and worker pool.
//!
//! ```text
//! calculate_matches_async ──spawn──▶ orchestration task ──send──▶ [bounded mpsc]
//!                                                                    │
//!                                   ┌────────────────────────────────┤
//!                                   ▼               ▼                ▼
//!                               worker 0        worker 1   ...   worker N-1
//!                                   │  oracle.judge(viewer, candidate)
//!                                   ▼
//!                              store.update_match  ◀── get_match / get_top_matches
//! ```
//!
//! Workers share one receiver. A failed job (no signal, transport, shape, store) is
//! logged and dropped: no retry, no backoff, and the pair's previous result stays.
//! Duplicate jobs for the same pair are not coalesced; overwrite makes them harmless.

pub mod config;
pub mod job;
pub mod service;
pub mod stats;
mod worker;


pub use config::{DEFAULT_QUEUE_CAPACITY, DEFAULT_WORKER_COUNT, EnqueuePolicy, PipelineConfig};
pub use job::{MatchJob, plan_jobs};
pub use service::MatchingService;
pub use stats::PipelineStats;
