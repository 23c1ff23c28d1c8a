//! HTTP server.
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `POST` | `/predict` | Augment `prompt` with facts, run inference, return `{"response": ..}` |
//! | `GET`  | `/health` | Liveness, version, fact count, engine name |
//!
//! Provides [`setup_predictor`] to wire config into a [`Predictor`], [`router`]
//! to mount it, and [`serve`] to run it until Ctrl-C.

use anyhow::{Context, Result};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::Instrument;

use crate::config::LoreConfig;
use crate::facts::FactStore;
use crate::inference;
use crate::predict::{PredictRequest, PredictResponse, Predictor};

/// Shared setup: load facts, pick the matcher, create the inference engine.
pub fn setup_predictor(config: &LoreConfig) -> Result<Predictor> {
    let facts_path = config.resolved_facts_path();
    let facts = FactStore::open(facts_path.as_deref()).context("failed to load fact store")?;
    tracing::info!(matching = %config.facts.matching, "relevance filter ready");

    let engine = inference::create_engine(&config.inference)?;

    Ok(Predictor::new(
        Arc::new(facts),
        config.facts.matching.matcher(),
        engine,
        config.inference.max_tokens,
    ))
}

/// Build the application router around a predictor.
pub fn router(predictor: Arc<Predictor>) -> Router {
    Router::new()
        .route("/predict", post(handle_predict))
        .route("/health", get(handle_health))
        .layer(TraceLayer::new_for_http())
        .with_state(predictor)
}

/// Start the HTTP server on `server.host:server.port`.
pub async fn serve(config: LoreConfig) -> Result<()> {
    let bind_addr = config.bind_addr();
    tracing::info!(addr = %bind_addr, "starting lore server");

    let predictor = Arc::new(setup_predictor(&config)?);
    let app = router(predictor);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;
    tracing::info!(addr = %bind_addr, "listening at http://{bind_addr}/predict");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "failed to listen for ctrl-c");
                std::future::pending::<()>().await;
            }
            tracing::info!("shutting down server");
        })
        .await?;

    Ok(())
}

/// Failure surfaced to HTTP clients. The cause is logged, never returned.
struct InternalError;

impl IntoResponse for InternalError {
    fn into_response(self) -> Response {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "error": "internal server error" })),
        )
            .into_response()
    }
}

/// POST /predict
async fn handle_predict(
    State(predictor): State<Arc<Predictor>>,
    Json(request): Json<PredictRequest>,
) -> Result<Json<PredictResponse>, InternalError> {
    let request_id = uuid::Uuid::now_v7();
    let span = tracing::info_span!("predict", %request_id);

    async move {
        tracing::info!(
            prompt_len = request.prompt.len(),
            sys_msg_len = request.sys_msg.len(),
            "predict request"
        );
        match predictor.predict(&request).await {
            Ok(response) => Ok(Json(PredictResponse { response })),
            Err(e) => {
                tracing::error!(error = %e, "inference failed");
                Err(InternalError)
            }
        }
    }
    .instrument(span)
    .await
}

/// GET /health
async fn handle_health(State(predictor): State<Arc<Predictor>>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "facts": predictor.facts().len(),
        "engine": predictor.engine().name(),
    }))
}
