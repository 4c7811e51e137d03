use crate::pipeline::ExtractorConfig;

/// Application-level constants
pub const APP_NAME: &str = "MedAssist";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// System prompt sent with every chat turn.
pub const SYSTEM_PROMPT: &str =
    "You are a helpful medical assistant. Provide clear, concise, and accurate \
     medical information. Always remind users to consult with healthcare \
     professionals for serious concerns.";

/// Default tracing filter when RUST_LOG is unset.
pub fn default_log_filter() -> &'static str {
    "medassist=info,tower_http=warn"
}

/// Runtime configuration, read once at startup from the environment.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Socket address the HTTP server binds to.
    pub bind_addr: String,
    /// Base URL of the local Ollama instance.
    pub ollama_url: String,
    /// Model served by Ollama.
    pub model: String,
    /// Per-request timeout for model calls, in seconds.
    pub request_timeout_secs: u64,
    /// Extractor policy knobs.
    pub extractor: ExtractorConfig,
}

impl ServiceConfig {
    pub fn from_env() -> Self {
        Self {
            bind_addr: env_or("MEDASSIST_BIND", "0.0.0.0:8000"),
            ollama_url: env_or("OLLAMA_URL", "http://localhost:11434"),
            model: env_or("MEDASSIST_MODEL", "phi3:mini"),
            request_timeout_secs: env_parse("MEDASSIST_TIMEOUT_SECS", 300),
            extractor: ExtractorConfig {
                max_field_chars: std::env::var("MEDASSIST_MAX_FIELD_CHARS")
                    .ok()
                    .and_then(|v| v.parse().ok()),
                include_confidence: env_parse("MEDASSIST_INCLUDE_CONFIDENCE", true),
            },
        }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8000".to_string(),
            ollama_url: "http://localhost:11434".to_string(),
            model: "phi3:mini".to_string(),
            request_timeout_secs: 300,
            extractor: ExtractorConfig::default(),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
