//! Telegram chat-bot adapter
//!
//! A thin Bot API client over reqwest, the message handler shared by the
//! long-polling bot and the webhook route, and the polling loop itself.

use crate::error::AssistantError;
use crate::Result;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Duration;
use tracing::debug;

pub mod handler;
pub mod polling;
pub mod redact;

#[cfg(test)]
pub(crate) mod fake_api;

pub use handler::TelegramResponder;
pub use polling::run_polling;
pub use redact::redact_token;

const TELEGRAM_API_URL: &str = "https://api.telegram.org";

/// Bot API limit for a single text message
pub const MAX_MESSAGE_CHARS: usize = 4096;

//
// ================= Wire types =================
//

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Update {
    pub update_id: i64,
    #[serde(default)]
    pub message: Option<Message>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub message_id: i64,
    pub chat: Chat,
    #[serde(default)]
    pub from: Option<User>,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
}

#[derive(Debug, Deserialize)]
struct ApiEnvelope<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
}

//
// ================= Client =================
//

pub struct TelegramClient {
    client: Client,
    token: String,
    base_url: String,
}

impl TelegramClient {
    /// `timeout_secs` bounds connect and read; long polls get their own window on top.
    pub fn new(token: String, timeout_secs: u64) -> Result<Self> {
        Self::with_base_url(token, timeout_secs, TELEGRAM_API_URL)
    }

    pub fn with_base_url(token: String, timeout_secs: u64, base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(timeout_secs))
            .timeout(Duration::from_secs(timeout_secs + polling::POLL_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            token,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn call<T: DeserializeOwned>(&self, method: &str, body: &Value) -> Result<T> {
        let url = format!("{}/bot{}/{}", self.base_url, self.token, method);

        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| self.error(method, &e.to_string()))?;

        let status = response.status();
        let envelope: ApiEnvelope<T> = response
            .json()
            .await
            .map_err(|e| self.error(method, &format!("invalid response ({}): {}", status, e)))?;

        if !envelope.ok {
            return Err(self.error(
                method,
                envelope.description.as_deref().unwrap_or("request rejected"),
            ));
        }

        envelope
            .result
            .ok_or_else(|| self.error(method, "missing result"))
    }

    fn error(&self, method: &str, detail: &str) -> AssistantError {
        AssistantError::Telegram(format!("{}: {}", method, redact_token(detail, &self.token)))
    }

    /// Long replies are split into several messages
    pub async fn send_message(&self, chat_id: i64, text: &str) -> Result<()> {
        for chunk in split_message(text, MAX_MESSAGE_CHARS) {
            let _: Value = self
                .call("sendMessage", &json!({ "chat_id": chat_id, "text": chunk }))
                .await?;
        }
        debug!(chat_id, "Reply sent");
        Ok(())
    }

    pub async fn send_chat_action(&self, chat_id: i64, action: &str) -> Result<()> {
        let _: bool = self
            .call("sendChatAction", &json!({ "chat_id": chat_id, "action": action }))
            .await?;
        Ok(())
    }

    pub async fn get_updates(&self, offset: Option<i64>, timeout_secs: u64) -> Result<Vec<Update>> {
        let mut body = json!({
            "timeout": timeout_secs,
            "allowed_updates": ["message"],
        });
        if let Some(offset) = offset {
            body["offset"] = json!(offset);
        }

        self.call("getUpdates", &body).await
    }

    pub async fn delete_webhook(&self, drop_pending_updates: bool) -> Result<()> {
        let _: bool = self
            .call(
                "deleteWebhook",
                &json!({ "drop_pending_updates": drop_pending_updates }),
            )
            .await?;
        Ok(())
    }
}

/// Split on char boundaries, preferring the last newline inside each window.
/// A `max_chars` of zero is treated as one.
pub fn split_message(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= max_chars {
        return vec![text.to_string()];
    }

    let mut chunks = Vec::new();
    let mut start = 0;

    while start < chars.len() {
        let end = (start + max_chars).min(chars.len());
        let cut = if end < chars.len() {
            chars[start..end]
                .iter()
                .rposition(|c| *c == '\n')
                .filter(|pos| *pos > 0)
                .map(|pos| start + pos + 1)
                .unwrap_or(end)
        } else {
            end
        };

        chunks.push(chars[start..cut].iter().collect());
        start = cut;
    }

    chunks
}
