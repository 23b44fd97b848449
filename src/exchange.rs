//! Client side of the chat exchange: one `POST /api/chat` per turn.

use crate::forms::ChatRequest;
use crate::models::ChatTurn;
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

pub const CHAT_PATH: &str = "/api/chat";

#[derive(Debug, Error)]
pub enum ExchangeError {
    /// The proxy could not be reached or the body could not be read
    #[error("transport error: {0}")]
    Transport(String),
    /// The proxy answered with a non-2xx status
    #[error("proxy answered {status}: {body}")]
    Status { status: u16, body: String },
    /// Success status, but no assistant text in the body
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

#[async_trait]
pub trait ChatExchange: Send + Sync {
    /// Send the full history and return the assistant's reply text.
    async fn exchange(&self, history: Vec<ChatTurn>) -> Result<String, ExchangeError>;
}

/// Pull the assistant text out of a provider response body
/// (`{ content: [{ type: "text", text: "..." }, ...] }`).
pub fn extract_assistant_text(body: &Value) -> Result<String, ExchangeError> {
    let blocks = body
        .get("content")
        .and_then(Value::as_array)
        .ok_or_else(|| ExchangeError::MalformedResponse("missing content array".to_string()))?;

    blocks
        .iter()
        .filter(|block| {
            block
                .get("type")
                .and_then(Value::as_str)
                .map_or(true, |kind| kind == "text")
        })
        .find_map(|block| block.get("text").and_then(Value::as_str))
        .filter(|text| !text.trim().is_empty())
        .map(str::to_string)
        .ok_or_else(|| ExchangeError::MalformedResponse("no text block in content".to_string()))
}

pub struct HttpChatExchange {
    endpoint: String,
    http_client: reqwest::Client,
}

impl HttpChatExchange {
    pub fn new(server_url: &str) -> Result<Self, ExchangeError> {
        // No explicit request timeout: a send runs until the transport gives up.
        let http_client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|err| ExchangeError::Transport(format!("HTTP client error: {}", err)))?;

        Ok(Self {
            endpoint: format!("{}{}", server_url.trim_end_matches('/'), CHAT_PATH),
            http_client,
        })
    }
}

#[async_trait]
impl ChatExchange for HttpChatExchange {
    async fn exchange(&self, history: Vec<ChatTurn>) -> Result<String, ExchangeError> {
        let resp = self
            .http_client
            .post(&self.endpoint)
            .json(&ChatRequest { messages: history })
            .send()
            .await
            .map_err(|err| ExchangeError::Transport(err.to_string()))?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|err| ExchangeError::Transport(err.to_string()))?;

        if !status.is_success() {
            return Err(ExchangeError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        let body: Value = serde_json::from_str(&text)
            .map_err(|err| ExchangeError::MalformedResponse(format!("invalid JSON: {}", err)))?;
        extract_assistant_text(&body)
    }
}
