//! Reply and error types shared by the model client and the chat relay.
//!
//! Every `OpenAI` API generation is parsed into one [`ChatResponse`], so the
//! relay never sees upstream field paths.

use std::fmt;

#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("config parse failed: {0}")]
    ConfigParse(String),

    #[error("missing API key: env var {var} not set")]
    MissingApiKey { var: String },

    #[error("API request failed: {0}")]
    ApiRequest(String),

    /// Non-success status. The body is kept for the server log only.
    #[error("API response error: status {status}")]
    ApiResponse { status: u16, body: String },

    #[error("API response parse failed: {0}")]
    ApiParse(String),

    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

/// One turn sent to the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub role: String,
    pub content: String,
}

impl Message {
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self { role: "user".into(), content: content.into() }
    }
}

/// Why generation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    Complete,
    MaxTokens,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Complete => "complete",
            Self::MaxTokens => "max_tokens",
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenUsage {
    pub input: u64,
    pub output: u64,
}

/// A parsed model reply. `segments` holds the non-empty text parts in the
/// order the API returned them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatResponse {
    pub segments: Vec<String>,
    pub model: String,
    pub stop_reason: StopReason,
    pub usage: TokenUsage,
}

impl ChatResponse {
    /// Text segments joined by newlines, or `None` when there are none.
    #[must_use]
    pub fn text(&self) -> Option<String> {
        if self.segments.is_empty() { None } else { Some(self.segments.join("\n")) }
    }
}

/// Chat completion seam. The relay depends on this, tests mock it.
#[async_trait::async_trait]
pub trait LlmChat: Send + Sync {
    /// # Errors
    ///
    /// Returns an [`LlmError`] if the request fails or the reply is malformed.
    async fn chat(&self, max_tokens: u32, system: &str, messages: &[Message]) -> Result<ChatResponse, LlmError>;
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
