use std::path::Path;
use tokenizers::{PaddingParams, PaddingStrategy, Tokenizer, TruncationParams};

use super::error::EmbeddingError;

/// Loads `tokenizer.json` from a model directory.
pub fn load_tokenizer(model_dir: &Path) -> Result<Tokenizer, EmbeddingError> {
    let tokenizer_path = model_dir.join("tokenizer.json");
    if !tokenizer_path.exists() {
        return Err(EmbeddingError::ModelNotFound {
            path: tokenizer_path,
        });
    }

    Tokenizer::from_file(&tokenizer_path).map_err(|e| EmbeddingError::TokenizerSetup {
        reason: format!("failed to read {}: {}", tokenizer_path.display(), e),
    })
}

/// Loads a tokenizer configured for batched classification.
///
/// Inputs longer than `max_len` tokens are truncated, and every batch is padded
/// to its longest member so the encodings stack into one rectangular tensor.
/// A pad token already declared by `tokenizer.json` is kept.
pub fn load_tokenizer_for_batches(
    model_dir: &Path,
    max_len: usize,
) -> Result<Tokenizer, EmbeddingError> {
    let mut tokenizer = load_tokenizer(model_dir)?;

    let truncation = TruncationParams {
        max_length: max_len,
        ..Default::default()
    };
    tokenizer
        .with_truncation(Some(truncation))
        .map_err(|e| EmbeddingError::TokenizerSetup {
            reason: format!("failed to configure truncation: {}", e),
        })?;

    let padding = match tokenizer.get_padding() {
        Some(existing) => PaddingParams {
            strategy: PaddingStrategy::BatchLongest,
            ..existing.clone()
        },
        None => PaddingParams {
            strategy: PaddingStrategy::BatchLongest,
            ..Default::default()
        },
    };
    tokenizer.with_padding(Some(padding));

    Ok(tokenizer)
}
