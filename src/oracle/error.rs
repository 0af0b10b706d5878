use std::time::Duration;

use thiserror::Error;

/// Failure classes a worker distinguishes when it drops a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// Viewer had neither content nor interests; no request was made.
    NoSignal,
    /// The call failed or timed out before a response body was available.
    Transport,
    /// A response arrived but could not be reduced to `{score, reason}`.
    Shape,
}

/// Errors returned by the oracle client and its completion backends.
#[derive(Debug, Error)]
pub enum OracleError {
    #[error("viewer '{viewer}' has neither content nor interests")]
    NoSignal { viewer: String },

    #[error("oracle request failed: {0}")]
    Transport(String),

    #[error("oracle request timed out after {0:?}")]
    Timeout(Duration),

    #[error("oracle returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("oracle returned no choices")]
    EmptyResponse,

    #[error("malformed oracle response: {reason}")]
    MalformedResponse { reason: String },

    #[error("oracle configuration error: {0}")]
    Config(String),
}

impl OracleError {
    /// Maps the error onto the worker-level failure taxonomy.
    pub fn kind(&self) -> FailureKind {
        match self {
            OracleError::NoSignal { .. } => FailureKind::NoSignal,
            OracleError::EmptyResponse | OracleError::MalformedResponse { .. } => {
                FailureKind::Shape
            }
            OracleError::Transport(_)
            | OracleError::Timeout(_)
            | OracleError::Status { .. }
            | OracleError::Config(_) => FailureKind::Transport,
        }
    }

    pub fn is_shape_failure(&self) -> bool {
        self.kind() == FailureKind::Shape
    }

    pub fn is_transport_failure(&self) -> bool {
        self.kind() == FailureKind::Transport
    }

    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        OracleError::MalformedResponse {
            reason: reason.into(),
        }
    }
}

pub type OracleResult<T> = Result<T, OracleError>;
