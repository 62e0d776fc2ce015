//! Error types for the market commentary assistant

use thiserror::Error;

/// Result type alias for assistant operations
pub type Result<T> = std::result::Result<T, AssistantError>;

#[derive(Error, Debug)]
pub enum AssistantError {

    // =============================
    // Core Pipeline Errors
    // =============================

    #[error("Generation error: {0}")]
    Generation(String),

    #[error("News source error: {0}")]
    NewsSource(String),

    #[error("Invalid rule in {rule_set}: {pattern} ({reason})")]
    InvalidRule {
        rule_set: &'static str,
        pattern: String,
        reason: String,
    },

    #[error("Configuration error: {0}")]
    Configuration(String),

    // =============================
    // Transport Adapter Errors
    // =============================

    #[error("Telegram error: {0}")]
    Telegram(String),

    // =============================
    // External Library Conversions
    // =============================

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
