//! AI-generated-text detector: the concrete scoring function behind `/score`.
//!
//! With a model directory the detector runs a mean-pooled BERT-family or
//! DeBERTa classifier and reports `sigmoid(logit)` as a percentage. Without one it
//! falls back to a deterministic lexical heuristic so the service stays usable
//! in development and tests.

pub mod config;
pub mod error;


pub use config::DetectorConfig;
pub use error::DetectorError;

use std::collections::HashSet;

use candle_core::Tensor;
use tokenizers::{Encoding, Tokenizer};
use tracing::{debug, info};

use crate::constants::SCORE_MAX;
use crate::embedding::classifier::MeanPoolClassifier;
use crate::embedding::device::select_device;
use crate::embedding::utils::load_tokenizer_for_batches;
use crate::scoring::TextScorer;

/// Converts a probability into the service's score convention:
/// percent on a 0-100 scale, rounded to one decimal place.
pub fn to_percent(probability: f32) -> f32 {
    (probability.clamp(0.0, 1.0) * SCORE_MAX * 10.0).round() / 10.0
}

pub struct AiTextDetector {
    device: candle_core::Device,
    config: DetectorConfig,
    model: Option<MeanPoolClassifier>,
    tokenizer: Option<Tokenizer>,
}

impl std::fmt::Debug for AiTextDetector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AiTextDetector")
            .field("device", &format!("{:?}", self.device))
            .field("config", &self.config)
            .field("model_loaded", &self.model.is_some())
            .finish()
    }
}

impl AiTextDetector {
    pub fn load(config: DetectorConfig) -> Result<Self, DetectorError> {
        if let Err(reason) = config.validate() {
            return Err(DetectorError::InvalidConfig { reason });
        }

        let device = select_device()?;
        debug!(?device, "Selected compute device for detector");

        let Some(model_path) = config.model_path.clone() else {
            info!("No detector model path configured, operating in stub mode");
            return Ok(Self {
                device,
                config,
                model: None,
                tokenizer: None,
            });
        };

        if !model_path.exists() {
            return Err(DetectorError::ModelLoadFailed {
                reason: format!("Detector model path not found: {}", model_path.display()),
            });
        }

        for required in ["config.json", "model.safetensors", "tokenizer.json"] {
            if !model_path.join(required).exists() {
                return Err(DetectorError::ModelLoadFailed {
                    reason: format!("Missing {} in {}", required, model_path.display()),
                });
            }
        }

        info!(model_path = %model_path.display(), "Loading detector model");

        let model = MeanPoolClassifier::load(&model_path, &device).map_err(|e| {
            DetectorError::ModelLoadFailed {
                reason: format!("Failed to load classifier: {}", e),
            }
        })?;

        let max_seq_len = config
            .max_seq_len
            .unwrap_or_else(|| model.kind().default_max_seq_len());
        let tokenizer = load_tokenizer_for_batches(&model_path, max_seq_len)?;

        info!(
            encoder = ?model.kind(),
            max_seq_len,
            "Detector model loaded successfully"
        );

        Ok(Self {
            device,
            config,
            model: Some(model),
            tokenizer: Some(tokenizer),
        })
    }

    pub fn stub() -> Result<Self, DetectorError> {
        Self::load(DetectorConfig::stub())
    }

    pub fn is_model_loaded(&self) -> bool {
        self.model.is_some()
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    pub fn device(&self) -> &candle_core::Device {
        &self.device
    }

    /// Scores every text in one forward pass. Output order matches input order.
    pub fn score_batch(&self, texts: &[&str]) -> Result<Vec<f32>, DetectorError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        if let (Some(model), Some(tokenizer)) = (&self.model, &self.tokenizer) {
            return self.score_with_model(texts, model, tokenizer);
        }

        let scores: Vec<f32> = texts
            .iter()
            .map(|text| to_percent(placeholder_probability(text)))
            .collect();

        debug!(batch = texts.len(), "Computed scores (stub)");

        Ok(scores)
    }

    fn score_with_model(
        &self,
        texts: &[&str],
        model: &MeanPoolClassifier,
        tokenizer: &Tokenizer,
    ) -> Result<Vec<f32>, DetectorError> {
        let encodings = tokenizer.encode_batch(texts.to_vec(), true).map_err(|e| {
            DetectorError::TokenizationFailed {
                reason: e.to_string(),
            }
        })?;

        let input_ids = self.stack_rows(&encodings, Encoding::get_ids)?;
        let type_ids = self.stack_rows(&encodings, Encoding::get_type_ids)?;
        let attention_mask = self.stack_rows(&encodings, Encoding::get_attention_mask)?;

        debug!(
            batch = texts.len(),
            seq_len = encodings.first().map(Encoding::len).unwrap_or(0),
            "Running detector forward pass"
        );

        let logits = model
            .forward(&input_ids, &type_ids, &attention_mask)
            .map_err(|e| DetectorError::InferenceFailed {
                reason: e.to_string(),
            })?;

        let probabilities = candle_nn::ops::sigmoid(&logits)?
            .flatten_all()?
            .to_vec1::<f32>()?;

        if probabilities.len() != texts.len() {
            return Err(DetectorError::InferenceFailed {
                reason: format!(
                    "classifier returned {} scores for {} texts",
                    probabilities.len(),
                    texts.len()
                ),
            });
        }

        probabilities
            .into_iter()
            .map(|p| {
                if p.is_finite() {
                    Ok(to_percent(p))
                } else {
                    Err(DetectorError::InferenceFailed {
                        reason: format!("non-finite probability {p}"),
                    })
                }
            })
            .collect()
    }

    fn stack_rows(
        &self,
        encodings: &[Encoding],
        field: fn(&Encoding) -> &[u32],
    ) -> Result<Tensor, DetectorError> {
        let rows = encodings
            .iter()
            .map(|encoding| Tensor::new(field(encoding), &self.device))
            .collect::<candle_core::Result<Vec<_>>>()?;
        Ok(Tensor::stack(&rows, 0)?)
    }
}

impl TextScorer for AiTextDetector {
    fn score_batch(&self, texts: &[&str]) -> Result<Vec<f32>, DetectorError> {
        AiTextDetector::score_batch(self, texts)
    }

    fn is_model_loaded(&self) -> bool {
        AiTextDetector::is_model_loaded(self)
    }
}

/// Lexical stand-in for the classifier: repetitive vocabulary and long words
/// push the probability up. Deterministic and always in `(0, 1)`.
fn placeholder_probability(text: &str) -> f32 {
    let lower = text.to_lowercase();
    let words: Vec<&str> = lower
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect();

    if words.is_empty() {
        return 1.0 / (1.0 + 4.0f32.exp());
    }

    let unique: HashSet<&str> = words.iter().copied().collect();
    let repetition = 1.0 - unique.len() as f32 / words.len() as f32;

    let avg_word_len =
        words.iter().map(|w| w.chars().count()).sum::<usize>() as f32 / words.len() as f32;
    let length_signal = (avg_word_len / 10.0).min(1.0);

    let base = 0.6 * repetition + 0.4 * length_signal;

    1.0 / (1.0 + (-8.0 * (base - 0.5)).exp())
}
