use std::sync::atomic::{AtomicBool, Ordering};
use tracing::debug;

use super::error::ScoringError;
use super::types::{SchedulerConfig, TextScorer};

/// Order-preserving batch scheduler around a [`TextScorer`].
///
/// Short texts are skipped, the remaining ones are submitted in fixed-size
/// chunks, and the scores are scattered back so that position `i` of the
/// output always belongs to position `i` of the input. Chunks of one call run
/// sequentially; nothing is kept between calls.
pub struct BatchScheduler<S> {
    scorer: S,
    config: SchedulerConfig,
}

impl<S: std::fmt::Debug> std::fmt::Debug for BatchScheduler<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BatchScheduler")
            .field("scorer", &self.scorer)
            .field("config", &self.config)
            .finish()
    }
}

impl<S: TextScorer> BatchScheduler<S> {
    pub fn new(scorer: S, config: SchedulerConfig) -> Result<Self, ScoringError> {
        config
            .validate()
            .map_err(|reason| ScoringError::InvalidConfig { reason })?;
        Ok(Self { scorer, config })
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    pub fn scorer(&self) -> &S {
        &self.scorer
    }

    /// A text is eligible when its trimmed length in characters exceeds the
    /// ignore threshold.
    pub fn is_eligible(&self, text: &str) -> bool {
        text.trim_matches(is_trimmable).chars().count() > self.config.ignore_length
    }

    /// Sizes of the chunks [`score_texts`](Self::score_texts) would submit.
    pub fn plan_chunks<T: AsRef<str>>(&self, texts: &[T]) -> Vec<usize> {
        let eligible = texts.iter().filter(|t| self.is_eligible(t.as_ref())).count();
        let batch_size = self.config.batch_size;
        (0..eligible.div_ceil(batch_size))
            .map(|chunk| batch_size.min(eligible - chunk * batch_size))
            .collect()
    }

    /// Scores `texts`, returning `None` for every ineligible position.
    pub fn score_texts<T: AsRef<str>>(
        &self,
        texts: &[T],
    ) -> Result<Vec<Option<f32>>, ScoringError> {
        self.score_texts_cancellable(texts, &AtomicBool::new(false))
    }

    /// Like [`score_texts`](Self::score_texts), but stops before the next
    /// chunk once `cancelled` is set. A chunk already submitted runs to
    /// completion.
    pub fn score_texts_cancellable<T: AsRef<str>>(
        &self,
        texts: &[T],
        cancelled: &AtomicBool,
    ) -> Result<Vec<Option<f32>>, ScoringError> {
        let mut results = vec![None; texts.len()];

        let (positions, eligible): (Vec<usize>, Vec<&str>) = texts
            .iter()
            .map(|text| text.as_ref())
            .enumerate()
            .filter(|(_, text)| self.is_eligible(text))
            .unzip();

        if eligible.is_empty() {
            debug!(total = texts.len(), "No eligible texts, skipping scorer");
            return Ok(results);
        }

        let batch_size = self.config.batch_size;
        let total = eligible.len().div_ceil(batch_size);

        debug!(
            total = texts.len(),
            eligible = eligible.len(),
            chunks = total,
            batch_size,
            "Scheduling scoring chunks"
        );

        for (chunk, (batch, slots)) in eligible
            .chunks(batch_size)
            .zip(positions.chunks(batch_size))
            .enumerate()
        {
            if cancelled.load(Ordering::Acquire) {
                debug!(completed = chunk, total, "Scoring cancelled");
                return Err(ScoringError::Cancelled {
                    completed: chunk,
                    total,
                });
            }

            let scores = self
                .scorer
                .score_batch(batch)
                .map_err(|source| ScoringError::ChunkFailed { chunk, source })?;

            if scores.len() != batch.len() {
                return Err(ScoringError::ScoreCountMismatch {
                    expected: batch.len(),
                    actual: scores.len(),
                });
            }

            for (&slot, score) in slots.iter().zip(scores) {
                results[slot] = Some(score);
            }

            debug!(chunk, size = batch.len(), "Scored chunk");
        }

        Ok(results)
    }
}

/// Unicode whitespace plus the ASCII information separators `\x1c`-`\x1f`.
fn is_trimmable(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}
