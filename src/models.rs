//! Core data models for the assistant pipeline

use serde::{Deserialize, Serialize};
use std::fmt;

//
// ================= Mode =================
//

/// Handling mode chosen for a single request.
///
/// Priority when routing is fixed: `Guardrail` > `Commentary` > `Coach`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum Mode {
    Guardrail,
    Commentary,
    Coach,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Guardrail => "GUARDRAIL",
            Mode::Commentary => "COMMENTARY",
            Mode::Coach => "COACH",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//
// ================= News =================
//

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewsItem {
    pub category: String,
    pub headline: String,
    pub source: String,
}

/// Today's auxiliary context for commentary requests
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsDigest {
    pub as_of: String,
    pub items: Vec<NewsItem>,
}

impl NewsDigest {
    /// One `- [category] headline (source: source)` line per item
    pub fn render_bullets(&self) -> String {
        self.items
            .iter()
            .map(|item| {
                format!(
                    "- [{}] {} (source: {})",
                    item.category, item.headline, item.source
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

//
// ================= Generation =================
//

/// Instruction pair sent to the generation service. Built per call, never reused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub system_instruction: String,
    pub user_content: String,
}

//
// ================= Final Result =================
//

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineOutcome {
    pub mode: Mode,
    pub response: String,
}
