//! Worker loop: dequeue, judge, store. Failed jobs are logged and dropped.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures_util::FutureExt;
use tokio::sync::{Mutex, mpsc};
use tracing::{debug, error, warn};

use super::job::MatchJob;
use super::stats::PipelineStatsInternal;
use crate::oracle::{CompatibilityOracle, FailureKind};
use crate::profile::MatchResult;
use crate::store::MatchStore;

pub(crate) type SharedReceiver = Arc<Mutex<mpsc::Receiver<MatchJob>>>;

/// Runs until the queue is closed and drained.
pub(crate) async fn worker_loop(
    id: usize,
    jobs: SharedReceiver,
    oracle: Arc<dyn CompatibilityOracle>,
    store: Arc<dyn MatchStore>,
    stats: Arc<PipelineStatsInternal>,
) {
    debug!(worker = id, "Worker started");

    loop {
        // The lock is released before the job runs so other workers can dequeue.
        let job = { jobs.lock().await.recv().await };
        let Some(job) = job else {
            break;
        };

        let outcome = AssertUnwindSafe(process_job(
            id,
            &job,
            oracle.as_ref(),
            store.as_ref(),
            &stats,
        ))
        .catch_unwind()
        .await;

        if outcome.is_err() {
            error!(
                worker = id,
                viewer = %job.viewer.id,
                candidate = %job.candidate.id,
                "Match job panicked; dropping"
            );
            stats.inc_store_failures();
        }
    }

    debug!(worker = id, "Worker stopped: queue closed");
}

/// Processes one job. A failure never touches the pair's stored result.
pub(crate) async fn process_job(
    id: usize,
    job: &MatchJob,
    oracle: &dyn CompatibilityOracle,
    store: &dyn MatchStore,
    stats: &PipelineStatsInternal,
) {
    let viewer = &job.viewer;
    let candidate = &job.candidate;

    if !viewer.has_signal() {
        debug!(worker = id, viewer = %viewer.id, candidate = %candidate.id, "Viewer has no signal; skipping");
        stats.record_failure(FailureKind::NoSignal);
        return;
    }

    let judgment = match oracle.judge(viewer, candidate).await {
        Ok(judgment) => judgment,
        Err(e) => {
            warn!(
                worker = id,
                viewer = %viewer.id,
                candidate = %candidate.id,
                error = %e,
                "Oracle failed; dropping match job"
            );
            stats.record_failure(e.kind());
            return;
        }
    };

    let result = MatchResult::new(candidate.id.clone(), judgment.score, judgment.reason);
    match store.update_match(&viewer.id, &candidate.id, result).await {
        Ok(()) => {
            debug!(
                worker = id,
                viewer = %viewer.id,
                candidate = %candidate.id,
                score = judgment.score,
                "Match stored"
            );
            stats.inc_completed();
        }
        Err(e) => {
            error!(
                worker = id,
                viewer = %viewer.id,
                candidate = %candidate.id,
                error = %e,
                "Failed to store match"
            );
            stats.inc_store_failures();
        }
    }
}
