use std::sync::Arc;

use crate::profile::Profile;

/// One directional pair awaiting a judgment.
///
/// Profiles are shared so fan-out over many candidates does not copy the primary.
#[derive(Debug, Clone)]
pub struct MatchJob {
    pub viewer: Arc<Profile>,
    pub candidate: Arc<Profile>,
}

impl MatchJob {
    pub fn new(viewer: Arc<Profile>, candidate: Arc<Profile>) -> Self {
        Self { viewer, candidate }
    }
}

/// Expands a trigger into jobs: both directions for every candidate except the primary.
pub fn plan_jobs(primary: &Arc<Profile>, candidates: Vec<Profile>) -> Vec<MatchJob> {
    candidates
        .into_iter()
        .filter(|candidate| candidate.id != primary.id)
        .flat_map(|candidate| {
            let candidate = Arc::new(candidate);
            [
                MatchJob::new(Arc::clone(primary), Arc::clone(&candidate)),
                MatchJob::new(candidate, Arc::clone(primary)),
            ]
        })
        .collect()
}
