mod config;
mod llm;
mod routes;
mod services;
mod state;

use std::sync::Arc;

use services::relay::{ChatRelay, LlmRelay};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let config = config::ServerConfig::from_env().expect("invalid server config");

    let dashboard = services::dataset::load(&config.data_path)
        .await
        .expect("dataset load failed");

    // Initialize LLM client (non-fatal: chat relay disabled if config missing).
    let relay: Option<Arc<dyn ChatRelay>> = match llm::OpenAiClient::from_env() {
        Ok(client) => {
            tracing::info!(model = client.model(), mode = ?client.mode(), max_tokens = config.relay_max_tokens, "LLM client initialized");
            Some(Arc::new(LlmRelay::new(Arc::new(client), config.relay_max_tokens)))
        }
        Err(e) => {
            tracing::warn!(error = %e, "LLM client not configured; chat relay disabled");
            None
        }
    };

    let state = state::AppState::new(dashboard, relay);
    let app = routes::app(state, &config.data_path);

    let port = config.port;
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "salary dashboard listening");
    axum::serve(listener, app).await.expect("server failed");
}
