//! Runtime settings loaded from the environment (and `.env` via dotenv)

use crate::error::AssistantError;
use crate::Result;
use std::env;
use std::str::FromStr;

/// Which generation backend answers requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmProvider {
    Groq,
    Gemini,
    Mock,
}

impl FromStr for LlmProvider {
    type Err = AssistantError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "groq" => Ok(LlmProvider::Groq),
            "gemini" => Ok(LlmProvider::Gemini),
            "mock" => Ok(LlmProvider::Mock),
            other => Err(AssistantError::Configuration(format!(
                "unknown LLM_PROVIDER '{}' (expected groq, gemini or mock)",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    // Server
    pub host: String,
    pub port: u16,

    // Logging
    pub log_level: String,

    // Generation
    pub llm_provider: LlmProvider,
    pub groq_api_key: String,
    pub groq_model: String,
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub llm_temperature: f32,
    pub llm_timeout_secs: u64,

    // Telegram
    pub telegram_bot_token: Option<String>,
    pub telegram_timeout_secs: u64,
}

impl Settings {
    /// Load `.env` (if present) and read settings from the process environment
    pub fn load() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_env()
    }

    pub fn from_env() -> Result<Self> {
        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: parse_var(
                "PORT",
                env::var("PORT")
                    .or_else(|_| env::var("API_PORT"))
                    .ok(),
                8080,
            )?,

            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),

            llm_provider: env::var("LLM_PROVIDER")
                .ok()
                .map(|v| v.parse::<LlmProvider>())
                .transpose()?
                .unwrap_or(LlmProvider::Groq),
            groq_api_key: env::var("GROQ_API_KEY").unwrap_or_default(),
            groq_model: env::var("GROQ_MODEL")
                .unwrap_or_else(|_| "llama-3.3-70b-versatile".into()),
            gemini_api_key: env::var("GEMINI_API_KEY").unwrap_or_default(),
            gemini_model: env::var("GEMINI_MODEL").unwrap_or_else(|_| "gemini-2.0-flash".into()),
            llm_temperature: parse_var("LLM_TEMPERATURE", env::var("LLM_TEMPERATURE").ok(), 0.3)?,
            llm_timeout_secs: parse_var("LLM_TIMEOUT_SECS", env::var("LLM_TIMEOUT_SECS").ok(), 60)?,

            telegram_bot_token: env::var("TELEGRAM_BOT_TOKEN")
                .ok()
                .filter(|s| !s.trim().is_empty()),
            telegram_timeout_secs: 30,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_var<T: FromStr>(name: &str, raw: Option<String>, default: T) -> Result<T> {
    match raw {
        Some(value) if !value.trim().is_empty() => value.trim().parse().map_err(|_| {
            AssistantError::Configuration(format!("{} has an invalid value: {}", name, value))
        }),
        _ => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_parsing() {
        assert_eq!("groq".parse::<LlmProvider>().unwrap(), LlmProvider::Groq);
        assert_eq!(" Gemini ".parse::<LlmProvider>().unwrap(), LlmProvider::Gemini);
        assert_eq!("MOCK".parse::<LlmProvider>().unwrap(), LlmProvider::Mock);
        assert!("openai".parse::<LlmProvider>().is_err());
    }

    #[test]
    fn test_parse_var_defaults_and_errors() {
        assert_eq!(parse_var::<u16>("PORT", None, 8080).unwrap(), 8080);
        assert_eq!(parse_var::<u16>("PORT", Some("  ".into()), 8080).unwrap(), 8080);
        assert_eq!(parse_var::<u16>("PORT", Some("9000".into()), 8080).unwrap(), 9000);
        assert!(matches!(
            parse_var::<u16>("PORT", Some("nope".into()), 8080),
            Err(AssistantError::Configuration(_))
        ));
        assert_eq!(parse_var::<f32>("LLM_TEMPERATURE", Some("0.7".into()), 0.3).unwrap(), 0.7);
    }
}
