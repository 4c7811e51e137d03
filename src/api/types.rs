//! Shared state and wire types for the HTTP layer.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::ServiceConfig;
use crate::ollama::LlmClient;

/// Shared per-process context injected into handlers.
#[derive(Clone)]
pub struct ApiContext {
    pub llm: Arc<dyn LlmClient>,
    pub config: Arc<ServiceConfig>,
}

impl ApiContext {
    pub fn new(llm: Arc<dyn LlmClient>, config: ServiceConfig) -> Self {
        Self {
            llm,
            config: Arc::new(config),
        }
    }
}

/// Body of `POST /ask`.
#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    pub query: String,
}

/// Body of `GET /api/health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub model: String,
    pub version: &'static str,
}
