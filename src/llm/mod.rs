//! LLM: `OpenAI` adapter for the chat relay.
//!
//! DESIGN
//! ======
//! Configured from environment variables. [`OpenAiClient`] speaks one API
//! generation picked by `LLM_OPENAI_MODE`; every request/response shape stays
//! inside `openai.rs` and callers only see [`LlmChat`].

pub mod config;
pub mod openai;
pub mod types;

pub use openai::OpenAiClient;
pub use types::LlmChat;
