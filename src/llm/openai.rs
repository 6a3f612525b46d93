//! OpenAI-compatible API client.
//!
//! Speaks three generations of the API: legacy `/completions` (single prompt
//! string), `/chat/completions`, and `/responses`. Each has its own request
//! builder and response parser; all of them produce a [`ChatResponse`].
//! The API generation is picked once from [`LlmConfig::openai_mode`].

use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

use super::config::{LlmConfig, OpenAiApiMode};
use super::types::{ChatResponse, LlmChat, LlmError, Message, StopReason, TokenUsage};

pub struct OpenAiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
    mode: OpenAiApiMode,
}

impl OpenAiClient {
    /// Build a client from environment variables (see [`LlmConfig::from_env`]).
    ///
    /// # Errors
    ///
    /// Returns an error if the config is invalid or the HTTP client fails.
    pub fn from_env() -> Result<Self, LlmError> {
        Self::from_config(LlmConfig::from_env()?)
    }

    /// # Errors
    ///
    /// Returns [`LlmError::HttpClientBuild`] if the HTTP client fails to build.
    pub fn from_config(config: LlmConfig) -> Result<Self, LlmError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| LlmError::HttpClientBuild(e.to_string()))?;
        Ok(Self {
            http,
            api_key: config.api_key,
            base_url: config.openai_base_url,
            model: config.model,
            mode: config.openai_mode,
        })
    }

    /// Configured model name (e.g. `"gpt-4o"`).
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    #[must_use]
    pub fn mode(&self) -> OpenAiApiMode {
        self.mode
    }

    async fn completions(
        &self,
        max_tokens: u32,
        system: &str,
        messages: &[Message],
    ) -> Result<ChatResponse, LlmError> {
        let prompt = build_completion_prompt(system, messages);
        let body = CompletionRequest { model: &self.model, prompt: &prompt, max_tokens };
        let text = self.send_json("/completions", &body).await?;
        parse_completions_response(&text)
    }

    async fn chat_completions(
        &self,
        max_tokens: u32,
        system: &str,
        messages: &[Message],
    ) -> Result<ChatResponse, LlmError> {
        let msgs = build_chat_completions_messages(system, messages);
        let body = CcRequest { model: &self.model, max_tokens, messages: &msgs };
        let text = self.send_json("/chat/completions", &body).await?;
        parse_chat_completions_response(&text)
    }

    async fn responses(
        &self,
        max_tokens: u32,
        system: &str,
        messages: &[Message],
    ) -> Result<ChatResponse, LlmError> {
        let input = build_responses_input(messages);
        let body = RespRequest { model: &self.model, max_output_tokens: max_tokens, instructions: system, input: &input };
        let text = self.send_json("/responses", &body).await?;
        parse_responses_response(&text)
    }

    async fn send_json(&self, path: &str, body: &impl Serialize) -> Result<String, LlmError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .http
            .post(url)
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| LlmError::ApiRequest(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| LlmError::ApiRequest(e.to_string()))?;
        if status != 200 {
            return Err(LlmError::ApiResponse { status, body: text });
        }
        Ok(text)
    }
}

#[async_trait::async_trait]
impl LlmChat for OpenAiClient {
    async fn chat(&self, max_tokens: u32, system: &str, messages: &[Message]) -> Result<ChatResponse, LlmError> {
        match self.mode {
            OpenAiApiMode::Completions => self.completions(max_tokens, system, messages).await,
            OpenAiApiMode::ChatCompletions => self.chat_completions(max_tokens, system, messages).await,
            OpenAiApiMode::Responses => self.responses(max_tokens, system, messages).await,
        }
    }
}

// =============================================================================
// COMPLETIONS (legacy) WIRE TYPES
// =============================================================================

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    max_tokens: u32,
}

/// Fold the system framing and messages into one prompt string.
pub(crate) fn build_completion_prompt(system: &str, messages: &[Message]) -> String {
    let mut prompt = system.trim().to_string();
    for message in messages {
        if !prompt.is_empty() {
            prompt.push_str("\n\n");
        }
        if message.role == "user" {
            prompt.push_str(&format!("User query: \"{}\"", message.content));
        } else {
            prompt.push_str(&format!("{}: {}", message.role, message.content));
        }
    }
    prompt
}

// =============================================================================
// CHAT COMPLETIONS WIRE TYPES
// =============================================================================

#[derive(Serialize)]
struct CcRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: &'a [CcMessage<'a>],
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub(crate) struct CcMessage<'a> {
    role: &'a str,
    content: &'a str,
}

pub(crate) fn build_chat_completions_messages<'a>(system: &'a str, messages: &'a [Message]) -> Vec<CcMessage<'a>> {
    let mut out = Vec::with_capacity(messages.len() + 1);
    if !system.trim().is_empty() {
        out.push(CcMessage { role: "system", content: system });
    }
    out.extend(messages.iter().map(|m| CcMessage { role: &m.role, content: &m.content }));
    out
}

// =============================================================================
// RESPONSES WIRE TYPES
// =============================================================================

#[derive(Serialize)]
struct RespRequest<'a> {
    model: &'a str,
    max_output_tokens: u32,
    instructions: &'a str,
    input: &'a [RespInputItem<'a>],
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename = "message")]
pub(crate) struct RespInputItem<'a> {
    role: &'a str,
    content: Vec<RespTextContent<'a>>,
}

#[derive(Debug, Serialize)]
struct RespTextContent<'a> {
    #[serde(rename = "type")]
    content_type: &'static str,
    text: &'a str,
}

pub(crate) fn build_responses_input(messages: &[Message]) -> Vec<RespInputItem<'_>> {
    messages
        .iter()
        .map(|m| RespInputItem {
            role: &m.role,
            content: vec![RespTextContent { content_type: "input_text", text: &m.content }],
        })
        .collect()
}

// =============================================================================
// RESPONSE PARSING
// =============================================================================

fn usage(root: &Value, input: &str, output: &str) -> TokenUsage {
    let field = |name: &str| {
        root.get("usage")
            .and_then(|u| u.get(name))
            .and_then(Value::as_u64)
            .unwrap_or(0)
    };
    TokenUsage { input: field(input), output: field(output) }
}

fn model_name(root: &Value) -> String {
    root.get("model")
        .and_then(Value::as_str)
        .map(str::to_owned)
        .unwrap_or_default()
}

fn finish_to_stop_reason(finish_reason: Option<&str>) -> StopReason {
    if finish_reason == Some("length") { StopReason::MaxTokens } else { StopReason::Complete }
}

pub(crate) fn parse_completions_response(json_text: &str) -> Result<ChatResponse, LlmError> {
    let root: Value = serde_json::from_str(json_text).map_err(|e| LlmError::ApiParse(e.to_string()))?;

    let Some(choice) = root
        .get("choices")
        .and_then(Value::as_array)
        .and_then(|arr| arr.first())
    else {
        return Err(LlmError::ApiParse("completions: missing choices[0]".to_string()));
    };
    let Some(text) = choice.get("text").and_then(Value::as_str) else {
        return Err(LlmError::ApiParse("completions: missing choices[0].text".to_string()));
    };

    let mut segments = Vec::new();
    if !text.is_empty() {
        segments.push(text.to_string());
    }

    Ok(ChatResponse {
        segments,
        model: model_name(&root),
        stop_reason: finish_to_stop_reason(choice.get("finish_reason").and_then(Value::as_str)),
        usage: usage(&root, "prompt_tokens", "completion_tokens"),
    })
}

pub(crate) fn parse_chat_completions_response(json_text: &str) -> Result<ChatResponse, LlmError> {
    let root: Value = serde_json::from_str(json_text).map_err(|e| LlmError::ApiParse(e.to_string()))?;

    let Some(choice) = root
        .get("choices")
        .and_then(Value::as_array)
        .and_then(|arr| arr.first())
    else {
        return Err(LlmError::ApiParse("chat_completions: missing choices[0]".to_string()));
    };
    let message = choice.get("message").cloned().unwrap_or(Value::Null);

    let mut segments = Vec::new();
    if let Some(text) = message.get("content").and_then(Value::as_str) {
        if !text.is_empty() {
            segments.push(text.to_string());
        }
    }

    Ok(ChatResponse {
        segments,
        model: model_name(&root),
        stop_reason: finish_to_stop_reason(choice.get("finish_reason").and_then(Value::as_str)),
        usage: usage(&root, "prompt_tokens", "completion_tokens"),
    })
}

pub(crate) fn parse_responses_response(json_text: &str) -> Result<ChatResponse, LlmError> {
    let root: Value = serde_json::from_str(json_text).map_err(|e| LlmError::ApiParse(e.to_string()))?;

    let mut segments = Vec::new();
    if let Some(items) = root.get("output").and_then(Value::as_array) {
        for item in items {
            if item.get("type").and_then(Value::as_str) != Some("message") {
                continue;
            }
            let Some(parts) = item.get("content").and_then(Value::as_array) else {
                continue;
            };
            for part in parts {
                let kind = part.get("type").and_then(Value::as_str);
                let text = part
                    .get("text")
                    .or_else(|| part.get("output_text"))
                    .and_then(Value::as_str)
                    .unwrap_or("");
                if matches!(kind, Some("output_text" | "text")) && !text.is_empty() {
                    segments.push(text.to_string());
                }
            }
        }
    } else if let Some(output_text) = root.get("output_text").and_then(Value::as_str) {
        if !output_text.is_empty() {
            segments.push(output_text.to_string());
        }
    }

    let stop_reason = if root
        .get("incomplete_details")
        .and_then(|d| d.get("reason"))
        .and_then(Value::as_str)
        == Some("max_output_tokens")
    {
        StopReason::MaxTokens
    } else {
        StopReason::Complete
    };

    Ok(ChatResponse {
        segments,
        model: model_name(&root),
        stop_reason,
        usage: usage(&root, "input_tokens", "output_tokens"),
    })
}

#[cfg(test)]
#[path = "openai_test.rs"]
mod tests;
