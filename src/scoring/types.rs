use crate::constants::{DEFAULT_BATCH_SIZE, DEFAULT_IGNORE_LENGTH};
use crate::embedding::DetectorError;

/// The scoring function the scheduler drives.
///
/// Implementations receive only eligible texts, at most one chunk at a time,
/// and must return exactly one score per text in the same order. Scores are
/// already on the service scale; the scheduler passes them through untouched.
/// A single instance is shared by all concurrent requests.
pub trait TextScorer: Send + Sync {
    fn score_batch(&self, texts: &[&str]) -> Result<Vec<f32>, DetectorError>;

    /// `false` when running a placeholder instead of real model weights.
    fn is_model_loaded(&self) -> bool {
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Eligibility and chunking parameters.
pub struct SchedulerConfig {
    /// Texts whose trimmed character count is `<=` this are not scored.
    pub ignore_length: usize,
    /// Maximum texts per scorer invocation.
    pub batch_size: usize,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            ignore_length: DEFAULT_IGNORE_LENGTH,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

impl SchedulerConfig {
    /// Returns a copy with a different batch size.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Returns a copy with a different ignore threshold.
    pub fn with_ignore_length(mut self, ignore_length: usize) -> Self {
        self.ignore_length = ignore_length;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.batch_size == 0 {
            return Err("batch_size must be at least 1".to_string());
        }
        Ok(())
    }
}
