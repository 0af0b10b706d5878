use std::sync::atomic::{AtomicU64, Ordering};

use crate::oracle::FailureKind;

/// Point-in-time snapshot of pipeline counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineStats {
    /// Jobs accepted onto the queue.
    pub enqueued: u64,
    /// Jobs discarded because the queue was full (`DropWhenFull` only).
    pub dropped: u64,
    /// Jobs whose result was written to the store.
    pub completed: u64,
    /// Jobs skipped because the viewer had no content or interests.
    pub no_signal: u64,
    /// Jobs whose oracle call failed or timed out.
    pub transport_failures: u64,
    /// Jobs whose oracle response could not be parsed.
    pub shape_failures: u64,
    /// Jobs whose result could not be written (or whose processing panicked).
    pub store_failures: u64,
}

impl PipelineStats {
    /// Jobs dequeued and discarded for any reason.
    pub fn failed(&self) -> u64 {
        self.no_signal + self.transport_failures + self.shape_failures + self.store_failures
    }

    /// Jobs taken off the queue so far.
    pub fn processed(&self) -> u64 {
        self.completed + self.failed()
    }
}

#[derive(Debug, Default)]
pub(crate) struct PipelineStatsInternal {
    enqueued: AtomicU64,
    dropped: AtomicU64,
    completed: AtomicU64,
    no_signal: AtomicU64,
    transport_failures: AtomicU64,
    shape_failures: AtomicU64,
    store_failures: AtomicU64,
}

impl PipelineStatsInternal {
    pub(crate) fn inc_enqueued(&self) {
        self.enqueued.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn inc_dropped(&self) {
        self.dropped.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn inc_completed(&self) {
        self.completed.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn inc_store_failures(&self) {
        self.store_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_failure(&self, kind: FailureKind) {
        let counter = match kind {
            FailureKind::NoSignal => &self.no_signal,
            FailureKind::Transport => &self.transport_failures,
            FailureKind::Shape => &self.shape_failures,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self) -> PipelineStats {
        PipelineStats {
            enqueued: self.enqueued.load(Ordering::Relaxed),
            dropped: self.dropped.load(Ordering::Relaxed),
            completed: self.completed.load(Ordering::Relaxed),
            no_signal: self.no_signal.load(Ordering::Relaxed),
            transport_failures: self.transport_failures.load(Ordering::Relaxed),
            shape_failures: self.shape_failures.load(Ordering::Relaxed),
            store_failures: self.store_failures.load(Ordering::Relaxed),
        }
    }
}
