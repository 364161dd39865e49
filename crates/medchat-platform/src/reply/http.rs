//! HTTP reply adapter.
//!
//! POSTs `{"message": ...}` to the chat endpoint and reads `reply` from the
//! JSON answer. Uses browser `fetch()` via gloo-net for WASM compatibility.
//! No timeout and no retry: the request resolves or the caller falls back.

use async_trait::async_trait;
use gloo_net::http::Request;
use serde::{Deserialize, Serialize};

use medchat_core::ports::ReplyPort;
use medchat_types::{config::ChatConfig, ChatError, Result};

pub struct HttpReplyClient {
    endpoint: String,
}

impl HttpReplyClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }

    pub fn from_config(config: &ChatConfig) -> Self {
        Self::new(config.endpoint.clone())
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait(?Send)]
impl ReplyPort for HttpReplyClient {
    async fn ask(&self, message: &str) -> Result<String> {
        log::debug!("POST {} ({} chars)", self.endpoint, message.chars().count());

        let response = Request::post(&self.endpoint)
            .header("Content-Type", "application/json")
            .body(request_body(message)?)
            .map_err(|e| ChatError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| ChatError::Network(e.to_string()))?;

        if !response.ok() {
            return Err(ChatError::Reply(format!("HTTP {}", response.status())));
        }

        let text = response
            .text()
            .await
            .map_err(|e| ChatError::Network(e.to_string()))?;

        parse_reply(&text)
    }
}

// ─── Wire format ─────────────────────────────────────────────

#[derive(Serialize)]
struct ReplyRequest<'a> {
    message: &'a str,
}

#[derive(Deserialize)]
struct ReplyResponse {
    reply: String,
}

/// JSON body for one user turn
pub fn request_body(message: &str) -> Result<String> {
    Ok(serde_json::to_string(&ReplyRequest { message })?)
}

/// Pull the `reply` string out of a success body; other fields are ignored.
pub fn parse_reply(body: &str) -> Result<String> {
    let parsed: ReplyResponse = serde_json::from_str(body)?;
    Ok(parsed.reply)
}
