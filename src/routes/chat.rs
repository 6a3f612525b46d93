//! Chat relay endpoint.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use dashboard::api::{ChatReply, ChatRequest, ErrorBody};
use tracing::error;

use crate::llm::types::LlmError;
use crate::services::relay::RelayError;
use crate::state::AppState;

/// Body text of every relay failure. Details stay in the server log.
pub const RELAY_FAILURE: &str = "Failed to get response from the language model";

/// `POST /api/chat`: relay one message and return the model's reply.
///
/// # Errors
///
/// Any relay failure, including a server started without an LLM, answers
/// 500 with [`RELAY_FAILURE`].
pub async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatReply>, (StatusCode, Json<ErrorBody>)> {
    let result = match &state.relay {
        Some(relay) => relay.submit(&request.message).await,
        None => Err(RelayError::NotConfigured),
    };

    match result {
        Ok(reply) => Ok(Json(ChatReply { reply })),
        Err(e) => {
            if let RelayError::Llm(LlmError::ApiResponse { status, body }) = &e {
                error!(status, body = %body, "chat: upstream rejected request");
            }
            error!(error = %e, "chat: relay failed");
            Err((StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorBody { error: RELAY_FAILURE.to_string() })))
        }
    }
}

#[cfg(test)]
#[path = "chat_test.rs"]
mod tests;
