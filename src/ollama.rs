//! Ollama HTTP client for local model inference.
//!
//! The service never hosts or warms the model itself; it only submits
//! chat requests to a running Ollama instance and hands the raw reply to
//! the response pipeline.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from the local model client.
#[derive(Error, Debug)]
pub enum LlmError {
    #[error("Ollama is not running at {0}")]
    Connection(String),

    #[error("Ollama returned error (status {status}): {body}")]
    Upstream { status: u16, body: String },

    #[error("Model '{0}' is not available on Ollama")]
    ModelMissing(String),

    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("Response parsing error: {0}")]
    ResponseParsing(String),
}

/// Abstraction over the model backend so handlers can be tested with a
/// mock instead of a live Ollama instance.
pub trait LlmClient: Send + Sync {
    /// Run one chat turn and return the raw model reply.
    fn chat(&self, model: &str, system: &str, prompt: &str) -> Result<String, LlmError>;

    /// Names of all models the backend currently serves.
    fn list_models(&self) -> Result<Vec<String>, LlmError>;

    fn is_model_available(&self, model: &str) -> Result<bool, LlmError> {
        let models = self.list_models()?;
        Ok(models.iter().any(|m| m.starts_with(model)))
    }
}

/// Blocking Ollama client. Callers in async contexts bridge it with
/// `tokio::task::spawn_blocking`.
pub struct OllamaClient {
    base_url: String,
    client: reqwest::blocking::Client,
    timeout_secs: u64,
}

impl OllamaClient {
    pub fn new(base_url: &str, timeout_secs: u64) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            timeout_secs,
        }
    }

    /// Default Ollama instance at localhost:11434 with 5-minute timeout.
    pub fn default_local() -> Self {
        Self::new("http://localhost:11434", 300)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn map_send_error(&self, e: reqwest::Error) -> LlmError {
        if e.is_connect() {
            LlmError::Connection(self.base_url.clone())
        } else if e.is_timeout() {
            LlmError::HttpClient(format!("Request timed out after {}s", self.timeout_secs))
        } else {
            LlmError::HttpClient(e.to_string())
        }
    }
}

/// Request body for Ollama /api/chat
#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    stream: bool,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Response body from Ollama /api/chat
#[derive(Deserialize)]
struct ChatResponse {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: String,
}

/// Response body from Ollama /api/tags
#[derive(Deserialize)]
struct TagsResponse {
    models: Vec<ModelEntry>,
}

#[derive(Deserialize)]
struct ModelEntry {
    name: String,
}

impl LlmClient for OllamaClient {
    fn chat(&self, model: &str, system: &str, prompt: &str) -> Result<String, LlmError> {
        let url = format!("{}/api/chat", self.base_url);
        let body = ChatRequest {
            model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            stream: false,
        };

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(LlmError::ModelMissing(model.to_string()));
        }
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(LlmError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = response
            .json()
            .map_err(|e| LlmError::ResponseParsing(e.to_string()))?;

        Ok(parsed.message.content)
    }

    fn list_models(&self) -> Result<Vec<String>, LlmError> {
        let url = format!("{}/api/tags", self.base_url);

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(LlmError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: TagsResponse = response
            .json()
            .map_err(|e| LlmError::ResponseParsing(e.to_string()))?;

        Ok(parsed.models.into_iter().map(|m| m.name).collect())
    }
}

/// Startup connectivity probe: logs whether Ollama and the configured
/// model are reachable. Never fails startup; a cold Ollama instance can
/// still come up after the service does.
pub fn probe_model(client: &dyn LlmClient, model: &str) {
    match client.list_models() {
        Ok(models) => {
            if models.iter().any(|m| m.starts_with(model)) {
                tracing::info!(model, "Startup probe: model available");
            } else {
                tracing::warn!(
                    model,
                    available = models.len(),
                    "Startup probe: configured model not found on Ollama"
                );
            }
        }
        Err(e) => {
            tracing::warn!(error = %e, "Startup probe: cannot reach Ollama");
        }
    }
}

/// Mock client for tests, returns a configurable reply.
pub struct MockLlmClient {
    reply: String,
    available_models: Vec<String>,
    fail_with_connection: bool,
}

impl MockLlmClient {
    pub fn new(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            available_models: vec!["phi3:mini".to_string()],
            fail_with_connection: false,
        }
    }

    pub fn with_models(mut self, models: Vec<String>) -> Self {
        self.available_models = models;
        self
    }

    /// Simulate an unreachable Ollama instance.
    pub fn unreachable() -> Self {
        Self {
            reply: String::new(),
            available_models: vec![],
            fail_with_connection: true,
        }
    }
}

impl LlmClient for MockLlmClient {
    fn chat(&self, model: &str, _system: &str, _prompt: &str) -> Result<String, LlmError> {
        if self.fail_with_connection {
            return Err(LlmError::Connection("http://localhost:11434".into()));
        }
        if !self.available_models.iter().any(|m| m.starts_with(model)) {
            return Err(LlmError::ModelMissing(model.to_string()));
        }
        Ok(self.reply.clone())
    }

    fn list_models(&self) -> Result<Vec<String>, LlmError> {
        if self.fail_with_connection {
            return Err(LlmError::Connection("http://localhost:11434".into()));
        }
        Ok(self.available_models.clone())
    }
}
