use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Backend error: {0}")]
    Backend(String),

    #[error("Serialisation error: {0}")]
    Serialisation(String),

    #[error("failed to read seed file {path}: {source}")]
    SeedRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse seed data: {0}")]
    SeedParse(#[from] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;
