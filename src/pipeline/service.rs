use std::path::Path;
use std::sync::Arc;

use futures_util::future::join_all;
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use super::config::{EnqueuePolicy, PipelineConfig};
use super::job::{MatchJob, plan_jobs};
use super::stats::{PipelineStats, PipelineStatsInternal};
use super::worker::worker_loop;
use crate::oracle::CompatibilityOracle;
use crate::profile::{MatchResult, Profile, SeedRecord};
use crate::store::{MatchStore, StoreResult, read_seed_file};

/// Owns the job queue, the worker pool and the store handle.
///
/// Construct once at startup (inside a Tokio runtime) and share by reference or `Arc`.
/// Reads go straight to the store; writes happen only in workers.
pub struct MatchingService {
    store: Arc<dyn MatchStore>,
    jobs: mpsc::Sender<MatchJob>,
    policy: EnqueuePolicy,
    queue_capacity: usize,
    stats: Arc<PipelineStatsInternal>,
    workers: Vec<JoinHandle<()>>,
}

impl MatchingService {
    /// Creates the queue and spawns `config.worker_count` workers.
    pub fn new(
        store: Arc<dyn MatchStore>,
        oracle: Arc<dyn CompatibilityOracle>,
        config: PipelineConfig,
    ) -> Self {
        let worker_count = config.worker_count.max(1);
        let queue_capacity = config.queue_capacity.max(1);

        let (tx, rx) = mpsc::channel(queue_capacity);
        let rx = Arc::new(tokio::sync::Mutex::new(rx));
        let stats = Arc::new(PipelineStatsInternal::default());

        let workers: Vec<JoinHandle<()>> = (0..worker_count)
            .map(|id| {
                tokio::spawn(worker_loop(
                    id,
                    Arc::clone(&rx),
                    Arc::clone(&oracle),
                    Arc::clone(&store),
                    Arc::clone(&stats),
                ))
            })
            .collect();

        info!(
            backend = store.backend_name(),
            workers = worker_count,
            queue_capacity,
            policy = ?config.enqueue_policy,
            "Matching service started"
        );

        Self {
            store,
            jobs: tx,
            policy: config.enqueue_policy,
            queue_capacity,
            stats,
            workers,
        }
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &Arc<dyn MatchStore> {
        &self.store
    }

    /// Returns the stored result for `(viewer_id, target_id)`, or `None` if not computed yet.
    pub async fn get_match(
        &self,
        viewer_id: &str,
        target_id: &str,
    ) -> StoreResult<Option<MatchResult>> {
        self.store.get_match(viewer_id, target_id).await
    }

    /// Returns up to `n` results for `viewer_id`, highest score first.
    pub async fn get_top_matches(
        &self,
        viewer_id: &str,
        n: usize,
    ) -> StoreResult<Vec<MatchResult>> {
        self.store.top_matches(viewer_id, n).await
    }

    /// Bulk-loads precomputed results without invoking the oracle.
    pub async fn load_seed(&self, records: Vec<SeedRecord>) -> StoreResult<usize> {
        let count = self.store.load_seed(records).await?;
        info!(records = count, "Seed matches loaded");
        Ok(count)
    }

    /// Reads a seed file and loads it into the store.
    pub async fn load_seed_file(&self, path: &Path) -> StoreResult<usize> {
        let records = read_seed_file(path).await?;
        self.load_seed(records).await
    }

    /// Schedules `(primary, c)` and `(c, primary)` for every candidate `c != primary`.
    ///
    /// Fire-and-forget: enqueueing runs on a detached task with no return channel, so
    /// this returns immediately even when the queue is full. Enqueue failures are
    /// logged on that task. Results appear in the store as workers complete them.
    pub fn calculate_matches_async(&self, primary: Profile, candidates: Vec<Profile>) {
        if candidates.is_empty() {
            debug!(primary = %primary.id, "No candidates; nothing to schedule");
            return;
        }

        let jobs = self.jobs.clone();
        let policy = self.policy;
        let stats = Arc::clone(&self.stats);

        tokio::spawn(async move {
            let primary = Arc::new(primary);
            let planned = plan_jobs(&primary, candidates);
            debug!(primary = %primary.id, jobs = planned.len(), "Scheduling match jobs");

            for job in planned {
                if !enqueue(&jobs, policy, &stats, job).await {
                    error!(primary = %primary.id, "Match queue closed; abandoning remaining jobs");
                    return;
                }
            }
        });
    }

    /// Returns a snapshot of the pipeline counters.
    pub fn stats(&self) -> PipelineStats {
        self.stats.snapshot()
    }

    /// Approximate number of jobs waiting in the queue.
    pub fn queue_depth(&self) -> usize {
        self.queue_capacity.saturating_sub(self.jobs.capacity())
    }

    pub fn queue_capacity(&self) -> usize {
        self.queue_capacity
    }

    /// Closes this handle's side of the queue and waits for the workers to drain it.
    ///
    /// Orchestration tasks still enqueueing keep the queue open until they finish, so
    /// every job scheduled before this call is processed. Returns the final counters.
    pub async fn shutdown(self) -> PipelineStats {
        let Self {
            jobs,
            stats,
            workers,
            ..
        } = self;
        drop(jobs);

        for (id, joined) in join_all(workers).await.into_iter().enumerate() {
            if let Err(e) = joined {
                error!(worker = id, error = %e, "Worker task failed");
            }
        }

        let final_stats = stats.snapshot();
        info!(
            completed = final_stats.completed,
            failed = final_stats.failed(),
            dropped = final_stats.dropped,
            "Matching service stopped"
        );
        final_stats
    }
}

/// Returns `false` only if the queue is closed.
async fn enqueue(
    jobs: &mpsc::Sender<MatchJob>,
    policy: EnqueuePolicy,
    stats: &PipelineStatsInternal,
    job: MatchJob,
) -> bool {
    match policy {
        EnqueuePolicy::Block => match jobs.send(job).await {
            Ok(()) => {
                stats.inc_enqueued();
                true
            }
            Err(_) => false,
        },
        EnqueuePolicy::DropWhenFull => match jobs.try_send(job) {
            Ok(()) => {
                stats.inc_enqueued();
                true
            }
            Err(TrySendError::Full(job)) => {
                warn!(
                    viewer = %job.viewer.id,
                    candidate = %job.candidate.id,
                    "Match queue full; dropping job"
                );
                stats.inc_dropped();
                true
            }
            Err(TrySendError::Closed(_)) => false,
        },
    }
}

impl std::fmt::Debug for MatchingService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatchingService")
            .field("backend", &self.store.backend_name())
            .field("policy", &self.policy)
            .field("queue_capacity", &self.queue_capacity)
            .field("queue_depth", &self.queue_depth())
            .finish_non_exhaustive()
    }
}
