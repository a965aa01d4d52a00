//! textscore library crate (used by the server binary and integration tests).
//!
//! # Public API Surface
//!
//! - [`Config`], [`ConfigError`] - environment configuration
//! - [`AiTextDetector`], [`DetectorConfig`] - the classifier-backed scoring function
//! - [`BatchScheduler`], [`TextScorer`], [`SchedulerConfig`] - order-preserving batching
//! - [`Rewriter`], [`PassthroughRewriter`] - the rewrite extension point
//! - [`gateway`] - axum router, handlers and wire types
//!
//! ## Test/Mock Support
//! [`MockScorer`] is available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod config;
pub mod constants;
pub mod embedding;
pub mod gateway;
pub mod rewrite;
pub mod scoring;

pub use config::{Config, ConfigError};
pub use constants::{
    BERT_MAX_SEQ_LEN, DEBERTA_MAX_SEQ_LEN, DEFAULT_BATCH_SIZE, DEFAULT_IGNORE_LENGTH,
    DEFAULT_MAX_BLOCKS, DEFAULT_PORT, SCORE_SCALE, STATUS_HEADER,
};
pub use embedding::{AiTextDetector, DetectorConfig, DetectorError, EmbeddingError, to_percent};
pub use gateway::{GatewayError, HandlerState, create_router_with_state};
pub use rewrite::{PassthroughRewriter, Rewriter};
#[cfg(any(test, feature = "mock"))]
pub use scoring::MockScorer;
pub use scoring::{BatchScheduler, SchedulerConfig, ScoringError, TextScorer};
