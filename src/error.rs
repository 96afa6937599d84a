//! Error types shared across the stopwatch

use std::path::PathBuf;

/// Failure to read, write or interpret the persisted snapshot
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    /// Filesystem access to the snapshot slot failed.
    #[error("snapshot I/O failed at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Snapshot content is not valid JSON for the expected shape.
    #[error("malformed snapshot: {0}")]
    Malformed(#[from] serde_json::Error),

    /// Snapshot parsed but describes an impossible state.
    #[error("invalid snapshot: {0}")]
    Invalid(String),
}

/// Errors surfaced by stopwatch operations
#[derive(Debug, thiserror::Error)]
pub enum StopwatchError {
    #[error("failed to lock {0} state")]
    Lock(&'static str),

    #[error("no laps recorded")]
    NoLaps,
}
