//! Text generation backends
//!
//! The pipeline only sees `TextGenerator`: one system instruction, one user
//! turn, one generated string back. Model choice, auth and endpoints belong to
//! the backend.

use crate::config::{LlmProvider, Settings};
use crate::models::GenerationRequest;
use crate::Result;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use tracing::{info, warn};

pub mod gemini;
pub mod groq;
pub use gemini::GeminiClient;
pub use groq::GroqClient;

#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Single round-trip, no retries. Failures surface as `AssistantError::Generation`.
    async fn generate(&self, system_instruction: &str, user_content: &str) -> Result<String>;
}

const OFFLINE_REPLY: &str =
    "This is an offline mock reply. Configure a generation backend for real answers.\n\n\
     Educational purposes only — not investment advice.";

/// Mock generator for offline runs & testing
/// Returns a fixed reply. Only a `recording` mock keeps the requests it was given.
pub struct MockGenerator {
    reply: String,
    requests: Option<Mutex<Vec<GenerationRequest>>>,
}

impl MockGenerator {
    /// Fixed reply, every request kept for inspection
    pub fn recording(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            requests: Some(Mutex::new(Vec::new())),
        }
    }

    /// Fixed reply, nothing kept. Safe for long-running processes.
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            requests: None,
        }
    }

    pub fn requests(&self) -> Vec<GenerationRequest> {
        match &self.requests {
            Some(requests) => requests
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner())
                .clone(),
            None => Vec::new(),
        }
    }
}

impl Default for MockGenerator {
    fn default() -> Self {
        Self::new(OFFLINE_REPLY)
    }
}

#[async_trait]
impl TextGenerator for MockGenerator {
    async fn generate(&self, system_instruction: &str, user_content: &str) -> Result<String> {
        if let Some(requests) = &self.requests {
            requests
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner())
                .push(GenerationRequest {
                    system_instruction: system_instruction.to_string(),
                    user_content: user_content.to_string(),
                });
        }
        Ok(self.reply.clone())
    }
}

/// Pick the backend named by `LLM_PROVIDER`
pub fn build_generator(settings: &Settings) -> Result<Arc<dyn TextGenerator>> {
    let generator: Arc<dyn TextGenerator> = match settings.llm_provider {
        LlmProvider::Groq => {
            if settings.groq_api_key.is_empty() {
                warn!("GROQ_API_KEY not set; generation calls will fail");
            }
            Arc::new(GroqClient::new(
                settings.groq_api_key.clone(),
                settings.groq_model.clone(),
                settings.llm_temperature,
                settings.llm_timeout_secs,
            )?)
        }
        LlmProvider::Gemini => {
            if settings.gemini_api_key.is_empty() {
                warn!("GEMINI_API_KEY not set; generation calls will fail");
            }
            Arc::new(GeminiClient::new(
                settings.gemini_api_key.clone(),
                &settings.gemini_model,
                settings.llm_temperature,
                settings.llm_timeout_secs,
            )?)
        }
        LlmProvider::Mock => Arc::new(MockGenerator::default()),
    };

    info!(provider = ?settings.llm_provider, "Generation backend ready");
    Ok(generator)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_records_requests() {
        let mock = MockGenerator::recording("ok");

        let reply = tokio_test::block_on(mock.generate("system", "user")).unwrap();

        assert_eq!(reply, "ok");
        assert_eq!(
            mock.requests(),
            vec![GenerationRequest {
                system_instruction: "system".to_string(),
                user_content: "user".to_string(),
            }]
        );
    }

    #[test]
    fn test_default_mock_reply_is_not_actionable() {
        let policy = crate::policy::PolicyConfig::standard().unwrap();
        let reply = tokio_test::block_on(MockGenerator::default().generate("s", "u")).unwrap();

        assert!(!policy.actionable_rules.any_match(&reply.to_lowercase()));
    }

    #[test]
    fn test_runtime_mock_keeps_no_history() {
        // the `LLM_PROVIDER=mock` backend
        let mock = MockGenerator::default();

        for i in 0..1_000 {
            tokio_test::block_on(mock.generate("system", &format!("message {}", i))).unwrap();
        }

        assert!(mock.requests.is_none());
        assert!(mock.requests().is_empty());
    }

    #[test]
    fn test_recording_survives_poisoned_lock() {
        let mock = Arc::new(MockGenerator::recording("ok"));
        let poisoner = mock.clone();

        let _ = std::thread::spawn(move || {
            let _guard = poisoner.requests.as_ref().unwrap().lock().unwrap();
            panic!("poison the request log");
        })
        .join();

        tokio_test::block_on(mock.generate("system", "user")).unwrap();
        assert_eq!(mock.requests().len(), 1);
    }
}
