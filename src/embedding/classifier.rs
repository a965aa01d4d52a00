use candle::{DType, Device, Result, Tensor};
use candle_core as candle;
use candle_nn::{Linear, Module, VarBuilder};
use candle_transformers::models::bert::{self, BertModel};
use candle_transformers::models::debertav2::{self, DebertaV2Model};
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;

use crate::constants::{BERT_MAX_SEQ_LEN, DEBERTA_MAX_SEQ_LEN};

/// Prefixes under which checkpoints store the encoder weights.
const ENCODER_PREFIXES: [&str; 4] = ["model", "bert", "roberta", "deberta"];

/// Encoder family, read from `model_type` in `config.json`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncoderKind {
    Bert,
    DebertaV2,
}

impl EncoderKind {
    /// A missing `model_type` is treated as BERT.
    pub fn from_model_type(model_type: Option<&str>) -> Result<Self> {
        match model_type {
            None | Some("bert") | Some("roberta") | Some("xlm-roberta") => Ok(Self::Bert),
            Some("deberta-v2") => Ok(Self::DebertaV2),
            Some(other) => Err(candle::Error::Msg(format!("Unsupported model_type: {other}"))),
        }
    }

    /// Truncation length used when none is configured.
    pub fn default_max_seq_len(self) -> usize {
        match self {
            Self::Bert => BERT_MAX_SEQ_LEN,
            Self::DebertaV2 => DEBERTA_MAX_SEQ_LEN,
        }
    }
}

#[derive(Deserialize)]
struct ModelTypeField {
    model_type: Option<String>,
}

enum Encoder {
    Bert(BertModel),
    DebertaV2(DebertaV2Model),
}

impl Encoder {
    fn forward(
        &self,
        input_ids: &Tensor,
        token_type_ids: &Tensor,
        attention_mask: &Tensor,
    ) -> Result<Tensor> {
        match self {
            Self::Bert(model) => model.forward(input_ids, token_type_ids, Some(attention_mask)),
            Self::DebertaV2(model) => model.forward(
                input_ids,
                Some(token_type_ids.clone()),
                Some(attention_mask.clone()),
            ),
        }
    }
}

struct MeanPoolClassifierImpl {
    kind: EncoderKind,
    encoder: Encoder,
    classifier: Linear,
}

impl MeanPoolClassifierImpl {
    fn load(vb: VarBuilder, config_json: &str) -> Result<Self> {
        let parse_err = |e: serde_json::Error| {
            candle::Error::Msg(format!("Failed to parse config: {}", e))
        };

        let field: ModelTypeField = serde_json::from_str(config_json).map_err(parse_err)?;
        let kind = EncoderKind::from_model_type(field.model_type.as_deref())?;

        let prefix = ENCODER_PREFIXES.into_iter().find(|prefix| {
            vb.contains_tensor(&format!("{prefix}.embeddings.word_embeddings.weight"))
        });
        let encoder_vb = match prefix {
            Some(prefix) => vb.pp(prefix),
            None => vb.clone(),
        };

        let (encoder, hidden_size) = match kind {
            EncoderKind::Bert => {
                let config: bert::Config = serde_json::from_str(config_json).map_err(parse_err)?;
                (
                    Encoder::Bert(BertModel::load(encoder_vb, &config)?),
                    config.hidden_size,
                )
            }
            EncoderKind::DebertaV2 => {
                let config: debertav2::Config =
                    serde_json::from_str(config_json).map_err(parse_err)?;
                (
                    Encoder::DebertaV2(DebertaV2Model::load(encoder_vb, &config)?),
                    config.hidden_size,
                )
            }
        };

        let classifier = candle_nn::linear(hidden_size, 1, vb.pp("classifier"))?;

        Ok(Self {
            kind,
            encoder,
            classifier,
        })
    }

    fn forward(
        &self,
        input_ids: &Tensor,
        token_type_ids: &Tensor,
        attention_mask: &Tensor,
    ) -> Result<Tensor> {
        // [batch, seq, hidden]
        let hidden = self
            .encoder
            .forward(input_ids, token_type_ids, attention_mask)?;

        // Padding positions must not dilute the mean.
        let mask = attention_mask.to_dtype(DType::F32)?.unsqueeze(2)?;
        let summed = hidden.broadcast_mul(&mask)?.sum(1)?;
        let counts = mask.sum(1)?.clamp(1e-9f32, f32::MAX)?;
        let pooled = summed.broadcast_div(&counts)?;

        self.classifier.forward(&pooled)
    }
}

/// Transformer encoder (BERT-family or DeBERTa-v2/v3) with masked mean
/// pooling and a single-logit head.
///
/// Cheap to clone; the weights are shared behind an `Arc`.
#[derive(Clone)]
pub struct MeanPoolClassifier(Arc<MeanPoolClassifierImpl>);

impl MeanPoolClassifier {
    pub fn load<P: AsRef<Path>>(model_dir: P, device: &Device) -> Result<Self> {
        let model_dir = model_dir.as_ref();
        let config_path = model_dir.join("config.json");
        let weights_path = model_dir.join("model.safetensors");

        let config_content = std::fs::read_to_string(config_path)?;

        // SAFETY: the weights file is opened read-only and not modified while mapped.
        let vb =
            unsafe { VarBuilder::from_mmaped_safetensors(&[weights_path], DType::F32, device)? };

        Self::from_var_builder(vb, &config_content)
    }

    /// Builds the classifier from `config.json` contents and an arbitrary
    /// weight source.
    pub fn from_var_builder(vb: VarBuilder, config_json: &str) -> Result<Self> {
        let model = MeanPoolClassifierImpl::load(vb, config_json)?;
        Ok(Self(Arc::new(model)))
    }

    pub fn kind(&self) -> EncoderKind {
        self.0.kind
    }

    /// Returns raw logits of shape `[batch, 1]`.
    pub fn forward(
        &self,
        input_ids: &Tensor,
        token_type_ids: &Tensor,
        attention_mask: &Tensor,
    ) -> Result<Tensor> {
        self.0.forward(input_ids, token_type_ids, attention_mask)
    }
}
