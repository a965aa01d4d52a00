use std::path::PathBuf;
use thiserror::Error;

use crate::embedding::error::EmbeddingError;

#[derive(Debug, Error)]
pub enum DetectorError {
    #[error("detector model not found at path: {path}")]
    ModelNotFound { path: PathBuf },

    #[error("failed to load detector model: {reason}")]
    ModelLoadFailed { reason: String },

    #[error("detector inference failed: {reason}")]
    InferenceFailed { reason: String },

    #[error("tokenization failed: {reason}")]
    TokenizationFailed { reason: String },

    #[error("invalid detector configuration: {reason}")]
    InvalidConfig { reason: String },
}

impl From<candle_core::Error> for DetectorError {
    fn from(err: candle_core::Error) -> Self {
        DetectorError::InferenceFailed {
            reason: err.to_string(),
        }
    }
}

impl From<EmbeddingError> for DetectorError {
    fn from(err: EmbeddingError) -> Self {
        match err {
            EmbeddingError::ModelNotFound { path } => DetectorError::ModelNotFound { path },
            _ => DetectorError::ModelLoadFailed {
                reason: err.to_string(),
            },
        }
    }
}
