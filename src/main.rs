use std::sync::Arc;

use medassist::api::{ApiContext, service_router};
use medassist::config::{self, ServiceConfig};
use medassist::ollama::{self, OllamaClient};

#[tokio::main]
async fn main() {
    medassist::init_tracing();

    let service_config = ServiceConfig::from_env();
    tracing::info!(
        version = config::APP_VERSION,
        bind = %service_config.bind_addr,
        model = %service_config.model,
        "{} starting",
        config::APP_NAME
    );

    let client = Arc::new(OllamaClient::new(
        &service_config.ollama_url,
        service_config.request_timeout_secs,
    ));

    // Connectivity probe: log model availability, never block startup.
    {
        let client = client.clone();
        let model = service_config.model.clone();
        tokio::task::spawn_blocking(move || ollama::probe_model(client.as_ref(), &model));
    }

    let bind_addr = service_config.bind_addr.clone();
    let app = service_router(ApiContext::new(client, service_config));

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("Cannot bind {bind_addr}: {e}"));
    axum::serve(listener, app)
        .await
        .expect("HTTP server terminated unexpectedly");
}
