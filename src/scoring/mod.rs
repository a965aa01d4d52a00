//! Batch scoring of text blocks.
//!
//! [`BatchScheduler`] sits between the HTTP layer and a [`TextScorer`]
//! (normally [`AiTextDetector`](crate::embedding::AiTextDetector)):
//!
//! 1. texts whose trimmed length is at most `ignore_length` get no score,
//! 2. the rest are collected with a parallel index map of their positions,
//! 3. split into chunks of at most `batch_size`, scored one chunk at a time,
//! 4. and written back through the index map.
//!
//! Output position `i` always corresponds to input position `i`. Any chunk
//! failure fails the whole call; there are no partial results.

pub mod error;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod scheduler;
pub mod types;


pub use error::ScoringError;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockScorer;
pub use scheduler::BatchScheduler;
pub use types::{SchedulerConfig, TextScorer};
