use serde::{Deserialize, Serialize};

use crate::constants::SCORE_SCALE;

/// One block of page text to score. `id` is opaque and echoed back verbatim.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TextBlock {
    pub id: String,
    pub text: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScoreRequest {
    pub blocks: Vec<TextBlock>,
}

/// Score for the block at the same position in the request.
///
/// `score` is `null` when the block was too short to score.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ScoredBlock {
    pub id: String,
    pub score: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ScoreResponse {
    pub scores: Vec<ScoredBlock>,
    pub scale: String,
}

impl ScoreResponse {
    /// Pairs blocks with scores by position.
    pub fn from_positional(blocks: Vec<TextBlock>, scores: Vec<Option<f32>>) -> Self {
        debug_assert_eq!(blocks.len(), scores.len());
        let scores = blocks
            .into_iter()
            .zip(scores)
            .map(|(block, score)| ScoredBlock {
                id: block.id,
                score,
            })
            .collect();

        Self {
            scores,
            scale: SCORE_SCALE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RewriteRequest {
    /// Missing or `null` is treated as empty text.
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RewriteResponse {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ReadyResponse {
    pub status: &'static str,
    pub scorer: &'static str,
    pub batch_size: usize,
    pub ignore_length: usize,
}
