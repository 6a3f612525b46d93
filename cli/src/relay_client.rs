//! HTTP client for the dashboard server.

use dashboard::api::{ChatReply, ChatRequest, ErrorBody};

#[derive(Debug, thiserror::Error)]
pub enum RelayClientError {
    #[error("http request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("server returned HTTP {status}: {message}")]
    Status { status: u16, message: String },
    #[error("invalid reply body: {0}")]
    Body(#[from] serde_json::Error),
    #[error("relay task failed: {0}")]
    Task(String),
}

/// Talks to one server. Cloning is cheap; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct RelayClient {
    http: reqwest::Client,
    base_url: String,
}

impl RelayClient {
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self { http: reqwest::Client::new(), base_url: base_url.trim_end_matches('/').to_string() }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// `POST /api/chat` with one message.
    ///
    /// # Errors
    ///
    /// Network failures, non-2xx statuses and unparseable bodies all fail.
    pub async fn chat(&self, request: &ChatRequest) -> Result<String, RelayClientError> {
        let response = self.http.post(self.url("/api/chat")).json(request).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        parse_reply(status, &body)
    }

    /// Fetch the raw dataset text from `/data.json`.
    ///
    /// # Errors
    ///
    /// Fails on network errors and non-2xx statuses.
    pub async fn dataset(&self) -> Result<String, RelayClientError> {
        let response = self.http.get(self.url("/data.json")).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        if !(200..300).contains(&status) {
            return Err(RelayClientError::Status { status, message: body });
        }
        Ok(body)
    }

    /// `GET /healthz`.
    ///
    /// # Errors
    ///
    /// Fails on network errors and non-2xx statuses.
    pub async fn healthz(&self) -> Result<(), RelayClientError> {
        let response = self.http.get(self.url("/healthz")).send().await?;
        let status = response.status().as_u16();
        if !(200..300).contains(&status) {
            return Err(RelayClientError::Status { status, message: "health check failed".to_owned() });
        }
        Ok(())
    }
}

/// Interpret a `/api/chat` response.
///
/// # Errors
///
/// Non-2xx statuses report the server's `error` text when the body carries
/// one; 2xx bodies without a string `reply` are [`RelayClientError::Body`].
pub fn parse_reply(status: u16, body: &str) -> Result<String, RelayClientError> {
    if !(200..300).contains(&status) {
        let message = serde_json::from_str::<ErrorBody>(body).map_or_else(|_| body.to_string(), |e| e.error);
        return Err(RelayClientError::Status { status, message });
    }
    let reply: ChatReply = serde_json::from_str(body)?;
    Ok(reply.reply)
}
