//! Chat widget state: transcript, pending input, in-flight submissions.
//!
//! DESIGN
//! ======
//! Submissions are not serialized: every submit hands the caller a
//! [`PendingRequest`] tagged with a sequence number, and any number may be
//! in flight at once. Bot replies are appended in submission order. A reply
//! that settles early is parked until every earlier submission has settled,
//! so the transcript stays append-only and each user message is answered by
//! exactly one bot message.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::api::ChatRequest;

/// Transcript entry shown when a relay call fails for any reason.
pub const FALLBACK_REPLY: &str = "Sorry, something went wrong.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub sender: Sender,
    pub text: String,
}

impl ChatMessage {
    #[must_use]
    pub fn user(text: impl Into<String>) -> Self {
        Self { sender: Sender::User, text: text.into() }
    }

    #[must_use]
    pub fn bot(text: impl Into<String>) -> Self {
        Self { sender: Sender::Bot, text: text.into() }
    }
}

/// A submission the caller must relay exactly once and then settle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRequest {
    pub seq: u64,
    pub message: String,
}

impl PendingRequest {
    #[must_use]
    pub fn body(&self) -> ChatRequest {
        ChatRequest { message: self.message.clone() }
    }
}

#[derive(Debug, Default)]
pub struct ChatSession {
    messages: Vec<ChatMessage>,
    input: String,
    next_seq: u64,
    /// Lowest sequence number whose bot message has not been appended yet.
    next_to_append: u64,
    /// Settled replies waiting on an earlier submission.
    parked: BTreeMap<u64, String>,
}

impl ChatSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// Submissions whose bot message is not in the transcript yet.
    #[must_use]
    pub fn in_flight(&self) -> u64 {
        self.next_seq - self.next_to_append
    }

    /// Submit the current input.
    ///
    /// Returns `None` without touching the transcript when the input is empty
    /// after trimming. Otherwise appends the trimmed user message, clears the
    /// input, and returns the request to relay.
    pub fn submit(&mut self) -> Option<PendingRequest> {
        let message = self.input.trim();
        if message.is_empty() {
            return None;
        }
        let message = message.to_string();
        self.input.clear();
        self.messages.push(ChatMessage::user(message.clone()));

        let seq = self.next_seq;
        self.next_seq += 1;
        Some(PendingRequest { seq, message })
    }

    /// Keyboard entry point: `Enter` submits, every other key is ignored.
    pub fn key_down(&mut self, key: &str) -> Option<PendingRequest> {
        if key == "Enter" { self.submit() } else { None }
    }

    /// Record the outcome of a relay call.
    ///
    /// Failures become [`FALLBACK_REPLY`]; the error itself is the caller's to
    /// log. Returns how many bot messages were appended, which is zero when
    /// an earlier submission is still outstanding or `seq` is unknown or
    /// already settled.
    pub fn settle<E>(&mut self, seq: u64, outcome: Result<String, E>) -> usize {
        if seq < self.next_to_append || seq >= self.next_seq || self.parked.contains_key(&seq) {
            return 0;
        }
        let text = outcome.unwrap_or_else(|_| FALLBACK_REPLY.to_string());
        self.parked.insert(seq, text);

        let mut appended = 0;
        while let Some(text) = self.parked.remove(&self.next_to_append) {
            self.messages.push(ChatMessage::bot(text));
            self.next_to_append += 1;
            appended += 1;
        }
        appended
    }
}

#[cfg(test)]
#[path = "chat_test.rs"]
mod tests;
