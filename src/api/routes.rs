//! HTTP routes — thin plumbing around the response pipeline.
//!
//! `POST /ask` is the only operation with substance: it forwards the
//! query to Ollama and hands the raw reply to `pipeline::assemble`.
//! Everything else is health checks and static assets.

use axum::Json;
use axum::extract::State;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, HealthResponse, QueryRequest};
use crate::config;
use crate::pipeline::{self, ExtractedAnswer};

/// Build the service router. The static UI is served for any path not
/// claimed by an API route.
pub fn service_router(ctx: ApiContext) -> Router {
    Router::new()
        .route("/ask", post(ask))
        .route("/api/health", get(health))
        .with_state(ctx)
        .fallback_service(ServeDir::new("static"))
        .layer(CorsLayer::permissive())
}

/// `POST /ask`: answer a single free-text medical query.
async fn ask(
    State(ctx): State<ApiContext>,
    Json(req): Json<QueryRequest>,
) -> Result<Json<ExtractedAnswer>, ApiError> {
    let query = req.query.trim().to_string();
    if query.is_empty() {
        return Err(ApiError::EmptyQuery);
    }

    tracing::info!(query_chars = query.chars().count(), "Handling /ask request");

    let llm = ctx.llm.clone();
    let model = ctx.config.model.clone();
    let raw = tokio::task::spawn_blocking(move || {
        llm.chat(&model, config::SYSTEM_PROMPT, &query)
    })
    .await
    .map_err(|e| ApiError::Internal(e.to_string()))??;

    let answer = pipeline::assemble(&raw, &ctx.config.extractor);
    Ok(Json(answer))
}

/// `GET /api/health`: liveness and configuration echo.
async fn health(State(ctx): State<ApiContext>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: config::APP_NAME,
        model: ctx.config.model.clone(),
        version: config::APP_VERSION,
    })
}
