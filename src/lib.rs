pub mod api;
pub mod config;
pub mod ollama;
pub mod pipeline;

use tracing_subscriber::EnvFilter;

/// Initialize tracing from RUST_LOG, with a service default.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();
}
