//! Groq backend (OpenAI-compatible chat completions)

use super::TextGenerator;
use crate::error::AssistantError;
use crate::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error};

const GROQ_CHAT_URL: &str = "https://api.groq.com/openai/v1/chat/completions";

pub struct GroqClient {
    client: Client,
    api_key: String,
    model: String,
    temperature: f32,
}

impl GroqClient {
    pub fn new(api_key: String, model: String, temperature: f32, timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .pool_idle_timeout(Duration::from_secs(90))
            .pool_max_idle_per_host(8)
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            client,
            api_key,
            model,
            temperature,
        })
    }

    fn build_request<'a>(&'a self, system_instruction: &'a str, user_content: &'a str) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system_instruction,
                },
                ChatMessage {
                    role: "user",
                    content: user_content,
                },
            ],
            temperature: self.temperature,
        }
    }
}

#[async_trait]
impl TextGenerator for GroqClient {
    async fn generate(&self, system_instruction: &str, user_content: &str) -> Result<String> {
        if self.api_key.is_empty() {
            return Err(AssistantError::Generation(
                "GROQ_API_KEY not configured".to_string(),
            ));
        }

        debug!(model = %self.model, "Calling Groq chat completions");

        let response = self
            .client
            .post(GROQ_CHAT_URL)
            .bearer_auth(&self.api_key)
            .json(&self.build_request(system_instruction, user_content))
            .send()
            .await
            .map_err(|e| {
                error!("Groq request failed: {}", e);
                AssistantError::Generation(format!("Groq API error: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!(%status, "Groq error response: {}", error_text);
            return Err(AssistantError::Generation(format!(
                "Groq API returned {}: {}",
                status, error_text
            )));
        }

        let completion: ChatResponse = response.json().await.map_err(|e| {
            error!("Failed to parse Groq response: {}", e);
            AssistantError::Generation(format!("Groq parse error: {}", e))
        })?;

        extract_content(completion)
    }
}

fn extract_content(completion: ChatResponse) -> Result<String> {
    let content = completion
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| AssistantError::Generation("No completion returned by Groq".to_string()))?;

    Ok(content.trim().to_string())
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}
