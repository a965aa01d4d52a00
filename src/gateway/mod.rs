//! HTTP gateway (Axum) for scoring and rewriting.
//!
//! Routes: `GET /health`, `GET /ready`, `POST /score`, `POST /rewrite`.
//! Every route is reachable cross-origin (browser extensions, arbitrary pages).

pub mod error;
pub mod handler;
pub mod state;
pub mod types;


use std::time::Duration;

use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

pub use error::GatewayError;
pub use handler::{rewrite_handler, score_handler};
pub use state::HandlerState;
pub use types::{
    HealthResponse, ReadyResponse, RewriteRequest, RewriteResponse, ScoreRequest, ScoreResponse,
    ScoredBlock, TextBlock,
};

use crate::scoring::TextScorer;

const CORS_MAX_AGE: Duration = Duration::from_secs(600);

pub fn create_router_with_state<S>(state: HandlerState<S>) -> Router
where
    S: TextScorer + 'static,
{
    Router::new()
        .route("/health", get(health_handler))
        .route("/ready", get(ready_handler::<S>))
        .route("/score", post(score_handler::<S>))
        .route("/rewrite", post(rewrite_handler::<S>))
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Any origin, method and header, with credentials.
///
/// Wildcards cannot be combined with credentials, so the request's own values
/// are mirrored back instead.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
        .max_age(CORS_MAX_AGE)
}

#[tracing::instrument]
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

#[tracing::instrument(skip(state))]
pub async fn ready_handler<S>(State(state): State<HandlerState<S>>) -> Json<ReadyResponse>
where
    S: TextScorer + 'static,
{
    let scheduler = &state.scheduler;
    let scorer = if scheduler.scorer().is_model_loaded() {
        "model"
    } else {
        "stub"
    };

    Json(ReadyResponse {
        status: "ok",
        scorer,
        batch_size: scheduler.config().batch_size,
        ignore_length: scheduler.config().ignore_length,
    })
}
