//! Market Commentary Assistant
//!
//! A guarded generation pipeline for an investing assistant that:
//! - Routes each message to GUARDRAIL, COMMENTARY or COACH handling
//! - Builds a mode-specific prompt (commentary is grounded on today's news)
//! - Delegates text generation to an external model
//! - Re-scans the generated text and replaces actionable advice with a refusal
//!
//! PIPELINE:
//! TEXT → ROUTE → PROMPT → GENERATE → SANITIZE → RESPONSE

pub mod agent;
pub mod api;
pub mod classifier;
pub mod config;
pub mod error;
pub mod llm;
pub mod logging;
pub mod models;
pub mod news;
pub mod policy;
pub mod rules;
pub mod safety;
pub mod telegram;

pub use error::Result;

// Re-export common types
pub use models::*;
pub use agent::Orchestrator;
pub use classifier::{IntentRouter, RouteDecision};
pub use policy::PolicyConfig;
pub use safety::{OutputSafetyFilter, SafetyVerdict};
