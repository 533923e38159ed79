//! Error taxonomy shared by every pipeline stage

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, TraceError>;

#[derive(Debug, Error)]
pub enum TraceError {
    /// The file backing a transcript could not be opened or decoded.
    #[error("transcript unreadable: {path}: {source}")]
    TranscriptUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A single transcript record failed to parse. Counted, never fatal.
    #[error("malformed record at line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },

    /// Projection was requested without an aggregated index to project against.
    #[error("no aggregated index available; run aggregation first")]
    IndexUnavailable,

    #[error("association window must be positive, got {0}s")]
    InvalidWindow(i64),

    #[error("index snapshot: {0}")]
    Snapshot(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
