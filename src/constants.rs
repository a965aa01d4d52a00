//! Cross-cutting, shared constants.
//!
//! The scheduler, the detector and the gateway all agree on these values; the
//! runtime-configurable ones are only defaults and can be overridden through
//! [`Config`](crate::config::Config).

/// Texts whose trimmed length (in characters) is at most this are never scored.
pub const DEFAULT_IGNORE_LENGTH: usize = 5;

/// Maximum number of texts submitted to the classifier in one forward pass.
pub const DEFAULT_BATCH_SIZE: usize = 4;

/// Tokenizer truncation length for BERT-family encoders (position limit).
pub const BERT_MAX_SEQ_LEN: usize = 512;

/// Tokenizer truncation length for DeBERTa-v2/v3 encoders.
pub const DEBERTA_MAX_SEQ_LEN: usize = 768;

/// Maximum number of blocks accepted by a single `/score` request.
pub const DEFAULT_MAX_BLOCKS: usize = 1000;

/// Default HTTP port.
pub const DEFAULT_PORT: u16 = 8000;

/// Upper bound of the score scale. Scores are percentages with one decimal.
pub const SCORE_MAX: f32 = 100.0;

/// Human-readable scale label returned with every score response.
pub const SCORE_SCALE: &str = "1-100";

/// Response header carrying a short machine-readable status for errors.
pub const STATUS_HEADER: &str = "x-textscore-status";
