use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, instrument};

use crate::gateway::error::GatewayError;
use crate::gateway::state::HandlerState;
use crate::gateway::types::{RewriteRequest, RewriteResponse, ScoreRequest, ScoreResponse};
use crate::scoring::TextScorer;

/// Raises a cancellation flag when dropped unless disarmed first.
///
/// Axum drops the handler future when the client goes away; the flag then
/// stops the blocking scoring task before its next chunk.
struct CancelOnDrop {
    flag: Arc<AtomicBool>,
    armed: bool,
}

impl CancelOnDrop {
    fn new() -> Self {
        Self {
            flag: Arc::new(AtomicBool::new(false)),
            armed: true,
        }
    }

    fn flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.flag)
    }

    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for CancelOnDrop {
    fn drop(&mut self) {
        if self.armed {
            debug!("Score request dropped, cancelling remaining chunks");
            self.flag.store(true, Ordering::Release);
        }
    }
}

fn parse_body<T: DeserializeOwned>(
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<T, GatewayError> {
    let Json(value) = payload.map_err(|e| GatewayError::InvalidRequest(e.body_text()))?;
    serde_json::from_value(value)
        .map_err(|e| GatewayError::InvalidRequest(format!("Invalid request schema: {}", e)))
}

#[instrument(skip(state, payload), fields(blocks = tracing::field::Empty))]
pub async fn score_handler<S>(
    State(state): State<HandlerState<S>>,
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Json<ScoreResponse>, GatewayError>
where
    S: TextScorer + 'static,
{
    let request: ScoreRequest = parse_body(payload)?;
    tracing::Span::current().record("blocks", request.blocks.len());

    if request.blocks.len() > state.max_blocks {
        return Err(GatewayError::InvalidRequest(format!(
            "too many blocks: {} (max {})",
            request.blocks.len(),
            state.max_blocks
        )));
    }

    if request.blocks.is_empty() {
        debug!("Empty score request");
        return Ok(Json(ScoreResponse::from_positional(Vec::new(), Vec::new())));
    }

    let scheduler = Arc::clone(&state.scheduler);
    let guard = CancelOnDrop::new();
    let cancelled = guard.flag();

    let (blocks, scores) = tokio::task::spawn_blocking(move || {
        let scores = {
            let texts: Vec<&str> = request.blocks.iter().map(|b| b.text.as_str()).collect();
            scheduler.score_texts_cancellable(&texts, &cancelled)
        };
        (request.blocks, scores)
    })
    .await
    .map_err(|e| GatewayError::InternalError(format!("scoring task failed: {}", e)))?;

    guard.disarm();
    let scores = scores?;

    debug!(
        scored = scores.iter().filter(|s| s.is_some()).count(),
        skipped = scores.iter().filter(|s| s.is_none()).count(),
        "Score request complete"
    );

    Ok(Json(ScoreResponse::from_positional(blocks, scores)))
}

#[instrument(skip(state, payload))]
pub async fn rewrite_handler<S>(
    State(state): State<HandlerState<S>>,
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Json<RewriteResponse>, GatewayError>
where
    S: TextScorer + 'static,
{
    let request: RewriteRequest = parse_body(payload)?;
    let text = request.text.unwrap_or_default();

    debug!(text_len = text.len(), "Rewriting text");

    Ok(Json(RewriteResponse {
        text: state.rewriter.rewrite(&text),
    }))
}
