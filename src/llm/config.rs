//! LLM configuration parsed from environment variables.

use super::types::LlmError;

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_LLM_REQUEST_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_LLM_CONNECT_TIMEOUT_SECS: u64 = 10;
/// Key variable read when `LLM_API_KEY_ENV` is unset.
pub const DEFAULT_API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Which generation of the `OpenAI` API to speak.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenAiApiMode {
    /// Legacy `/completions`: one prompt string, reply at `choices[0].text`.
    Completions,
    /// `/chat/completions`: role-tagged messages, reply at `choices[0].message.content`.
    ChatCompletions,
    /// `/responses`: instructions + input items, reply under `output[].content[]`.
    Responses,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LlmTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Default for LlmTimeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_LLM_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_LLM_CONNECT_TIMEOUT_SECS }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LlmConfig {
    pub api_key: String,
    pub model: String,
    pub openai_mode: OpenAiApiMode,
    pub openai_base_url: String,
    pub timeouts: LlmTimeouts,
}

impl LlmConfig {
    /// Build typed LLM config from environment variables.
    ///
    /// Required:
    /// - the API key, read from the variable named by `LLM_API_KEY_ENV`
    ///   (`OPENAI_API_KEY` when unset)
    ///
    /// Optional:
    /// - `LLM_PROVIDER`: only `openai` is accepted
    /// - `LLM_MODEL`: mode default when absent
    /// - `LLM_OPENAI_MODE`: `chat_completions` (default), `responses` or `completions`
    /// - `LLM_OPENAI_BASE_URL`: default `OpenAI` API base URL
    /// - `LLM_REQUEST_TIMEOUT_SECS`: default 120
    /// - `LLM_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::MissingApiKey`] when the key variable is unset and
    /// [`LlmError::ConfigParse`] for an unknown provider or mode, or a
    /// malformed timeout.
    pub fn from_env() -> Result<Self, LlmError> {
        check_provider(std::env::var("LLM_PROVIDER").ok().as_deref())?;
        let openai_mode = parse_openai_mode(std::env::var("LLM_OPENAI_MODE").ok().as_deref())?;

        let key_var = std::env::var("LLM_API_KEY_ENV")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_KEY_ENV.to_string());
        let api_key = std::env::var(&key_var).map_err(|_| LlmError::MissingApiKey { var: key_var.clone() })?;

        let model = std::env::var("LLM_MODEL").unwrap_or_else(|_| default_model(openai_mode).to_string());
        let openai_base_url = std::env::var("LLM_OPENAI_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_OPENAI_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        let timeouts = LlmTimeouts {
            request_secs: env_parse_u64("LLM_REQUEST_TIMEOUT_SECS", DEFAULT_LLM_REQUEST_TIMEOUT_SECS)?,
            connect_secs: env_parse_u64("LLM_CONNECT_TIMEOUT_SECS", DEFAULT_LLM_CONNECT_TIMEOUT_SECS)?,
        };

        Ok(Self { api_key, model, openai_mode, openai_base_url, timeouts })
    }
}

fn env_parse_u64(key: &str, default: u64) -> Result<u64, LlmError> {
    match std::env::var(key) {
        Ok(value) => value
            .trim()
            .parse::<u64>()
            .map_err(|_| LlmError::ConfigParse(format!("invalid {key}: '{value}'"))),
        Err(_) => Ok(default),
    }
}

fn check_provider(raw: Option<&str>) -> Result<(), LlmError> {
    match raw.unwrap_or("openai") {
        "openai" => Ok(()),
        other => Err(LlmError::ConfigParse(format!("unknown LLM_PROVIDER: {other}"))),
    }
}

fn parse_openai_mode(raw: Option<&str>) -> Result<OpenAiApiMode, LlmError> {
    match raw.unwrap_or("chat_completions") {
        "chat_completions" => Ok(OpenAiApiMode::ChatCompletions),
        "responses" => Ok(OpenAiApiMode::Responses),
        "completions" => Ok(OpenAiApiMode::Completions),
        other => Err(LlmError::ConfigParse(format!(
            "unsupported openai_api mode '{other}' (expected 'chat_completions', 'responses' or 'completions')"
        ))),
    }
}

fn default_model(mode: OpenAiApiMode) -> &'static str {
    match mode {
        OpenAiApiMode::Completions => "gpt-3.5-turbo-instruct",
        OpenAiApiMode::ChatCompletions | OpenAiApiMode::Responses => "gpt-4o",
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
