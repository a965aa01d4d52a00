use parking_lot::Mutex;

use super::types::TextScorer;
use crate::embedding::DetectorError;

/// Recording scorer for tests.
///
/// Scores each text as its character count capped at 100, remembers every
/// batch it receives, and can be told to fail on a given invocation.
#[derive(Debug, Default)]
pub struct MockScorer {
    calls: Mutex<Vec<Vec<String>>>,
    fail_on_call: Option<usize>,
    short_by: usize,
}

impl MockScorer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fails the `call`-th invocation (zero-based).
    pub fn failing_on(call: usize) -> Self {
        Self {
            fail_on_call: Some(call),
            ..Default::default()
        }
    }

    /// Returns `n` fewer scores than requested.
    pub fn dropping_scores(n: usize) -> Self {
        Self {
            short_by: n,
            ..Default::default()
        }
    }

    /// The score this mock assigns to `text`.
    pub fn expected_score(text: &str) -> f32 {
        text.chars().count().min(100) as f32
    }

    /// Every batch received so far, in invocation order.
    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().clone()
    }

    pub fn call_sizes(&self) -> Vec<usize> {
        self.calls.lock().iter().map(Vec::len).collect()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }
}

impl TextScorer for MockScorer {
    fn score_batch(&self, texts: &[&str]) -> Result<Vec<f32>, DetectorError> {
        let call = {
            let mut calls = self.calls.lock();
            calls.push(texts.iter().map(|t| t.to_string()).collect());
            calls.len() - 1
        };

        if self.fail_on_call == Some(call) {
            return Err(DetectorError::InferenceFailed {
                reason: format!("mock failure on call {call}"),
            });
        }

        let keep = texts.len().saturating_sub(self.short_by);
        Ok(texts[..keep]
            .iter()
            .map(|t| Self::expected_score(t))
            .collect())
    }
}
