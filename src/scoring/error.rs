use thiserror::Error;

use crate::embedding::DetectorError;

#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("invalid scheduler configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("scoring chunk {chunk} failed: {source}")]
    ChunkFailed {
        chunk: usize,
        #[source]
        source: DetectorError,
    },

    #[error("scorer returned {actual} scores for a chunk of {expected} texts")]
    ScoreCountMismatch { expected: usize, actual: usize },

    #[error("scoring cancelled after {completed} of {total} chunks")]
    Cancelled { completed: usize, total: usize },
}
