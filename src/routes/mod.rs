//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! One Axum router serves the chat relay endpoint, the raw dataset file, the
//! server-rendered dashboard page and its JSON views. CORS is wide open so a
//! page hosted elsewhere can call `/api/chat`.

pub mod chat;
pub mod dashboard;

use std::path::Path;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeFile;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the application router. `data_path` is served verbatim at `/data.json`.
pub fn app(state: AppState, data_path: &Path) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(dashboard::index))
        .route("/api/chat", post(chat::chat))
        .route("/api/aggregates", get(dashboard::aggregates))
        .route("/api/years/{year}/titles", get(dashboard::year_titles))
        .route_service("/data.json", ServeFile::new(data_path))
        .route("/healthz", get(healthz))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
#[path = "app_test.rs"]
mod tests;
