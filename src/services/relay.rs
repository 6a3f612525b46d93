//! Chat relay: one user message in, one model reply out.
//!
//! DESIGN
//! ======
//! Routes depend only on [`ChatRelay`]. `LlmRelay` is the single place that
//! knows how a salary question is framed for the model and how the reply is
//! extracted; the provider wire formats live behind [`LlmChat`].
//!
//! The relay is stateless: each call sends the fixed system framing plus the
//! latest message only. No transcript is carried across calls.

use std::sync::Arc;

use tracing::info;

use crate::llm::LlmChat;
use crate::llm::types::{LlmError, Message};

pub const SYSTEM_PROMPT: &str = "You are an expert in analyzing ML Engineer salaries data. \
Provide insights based on the user's query and respond to it directly.";

pub const DEFAULT_MAX_TOKENS: u32 = 150;

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("chat relay not configured")]
    NotConfigured,
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),
    #[error("LLM reply contained no text")]
    EmptyReply,
}

/// Adapter seam between the HTTP surface and whichever model API is in use.
#[async_trait::async_trait]
pub trait ChatRelay: Send + Sync {
    /// Relay `message` and return the reply text, trimmed.
    ///
    /// # Errors
    ///
    /// Returns a [`RelayError`] when the upstream call fails or yields no text.
    async fn submit(&self, message: &str) -> Result<String, RelayError>;
}

// =============================================================================
// LLM RELAY
// =============================================================================

pub struct LlmRelay {
    llm: Arc<dyn LlmChat>,
    max_tokens: u32,
}

impl LlmRelay {
    #[must_use]
    pub fn new(llm: Arc<dyn LlmChat>, max_tokens: u32) -> Self {
        Self { llm, max_tokens }
    }
}

#[async_trait::async_trait]
impl ChatRelay for LlmRelay {
    async fn submit(&self, message: &str) -> Result<String, RelayError> {
        info!(message_len = message.len(), "relay: message received");

        let response = self
            .llm
            .chat(self.max_tokens, SYSTEM_PROMPT, &[Message::user(message)])
            .await?;

        info!(
            model = %response.model,
            stop_reason = %response.stop_reason,
            input_tokens = response.usage.input,
            output_tokens = response.usage.output,
            "relay: LLM response"
        );

        let text = response.text().ok_or(RelayError::EmptyReply)?;
        let reply = text.trim();
        if reply.is_empty() {
            return Err(RelayError::EmptyReply);
        }
        Ok(reply.to_string())
    }
}

#[cfg(test)]
#[path = "relay_test.rs"]
mod tests;
