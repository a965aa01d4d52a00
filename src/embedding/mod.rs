//! Model-side utilities.
//!
//! - [`detector`] is the scoring function used by [`crate::scoring`].
//! - [`classifier`] holds the candle model it runs.

/// Mean-pooled sequence classifier used by the detector.
pub mod classifier;
/// AI-generated-text detector.
pub mod detector;
/// Device selection (CPU / Metal / CUDA).
pub mod device;
mod error;
/// Tokenizer loading helpers.
pub mod utils;

pub use detector::{AiTextDetector, DetectorConfig, DetectorError, to_percent};
pub use error::EmbeddingError;
