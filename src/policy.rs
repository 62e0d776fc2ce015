//! Policy configuration
//!
//! Rule sets and prompt texts are loaded once at startup into a `PolicyConfig`
//! and shared read-only (behind `Arc`) by the router, the safety filter and
//! the orchestrator.

use crate::error::AssistantError;
use crate::rules::{RuleSet, ACTIONABLE_PATTERNS, ADVICE_PATTERNS, COMMENTARY_PATTERNS};
use crate::Result;

pub const COACH_SYSTEM: &str = r#"You are an Investment Coach.
Goal: teach investing concepts from beginner to intermediate with simple language and analogies.

Hard rules:
- EDUCATIONAL ONLY. Not financial advice.
- Do NOT recommend any specific stock/ETF/crypto.
- Do NOT say "buy", "sell", "hold", "enter", "exit", "target", or give trade timing.
- No promises/guarantees of returns.
- If user asks for recommendations or tips, refuse and redirect to an educational framework.

Style:
- Clear, friendly, structured (bullets, steps).
- Ask 1 short follow-up question only if it improves learning.
"#;

pub const COMMENTARY_SYSTEM: &str = r#"You are a Market Commentary Assistant (neutral journalist tone).
Goal: summarize market-moving news neutrally (macro, rates, earnings, geopolitics, commodities).

Hard rules:
- EDUCATIONAL ONLY. Not financial advice.
- No buy/sell calls, no stock tips, no personalization.
- Focus on "what happened" and "common drivers".
- Always include a short disclaimer at the end.
"#;

pub const GUARDRAIL_SYSTEM: &str = r#"You are a compliance-first assistant.
If the user asks for: stock picks, buy/sell recommendations, intraday tips, guaranteed returns, or personalized advice:
- Refuse clearly and briefly.
- Provide an educational alternative: a checklist/framework to evaluate investments.
- Include: "Educational purposes only — not investment advice."
"#;

pub const COMMENTARY_DIRECTIVE: &str =
    "Write a neutral market wrap in 6-10 bullets + 2-line summary. End with disclaimer.";

pub const DISCLAIMER: &str = "Educational purposes only — not investment advice.";

pub const REFUSAL: &str = "I can’t help with buy/sell recommendations, stock tips, or personalized investing advice.\n\n\
If you want, I *can* teach a simple evaluation framework (business, valuation, risk, diversification) \
or explain concepts like ETFs, SIPs, and risk management.\n\n\
Educational purposes only — not investment advice.";

/// System instruction per handling mode
#[derive(Debug, Clone)]
pub struct SystemPrompts {
    pub coach: String,
    pub commentary: String,
    pub guardrail: String,
}

impl Default for SystemPrompts {
    fn default() -> Self {
        Self {
            coach: COACH_SYSTEM.to_string(),
            commentary: COMMENTARY_SYSTEM.to_string(),
            guardrail: GUARDRAIL_SYSTEM.to_string(),
        }
    }
}

/// Immutable policy shared by every request
#[derive(Debug, Clone)]
pub struct PolicyConfig {
    pub advice_rules: RuleSet,
    pub commentary_rules: RuleSet,
    pub actionable_rules: RuleSet,
    pub prompts: SystemPrompts,
    pub commentary_directive: String,
    pub refusal: String,
}

impl PolicyConfig {
    /// Built-in rule sets and prompts
    pub fn standard() -> Result<Self> {
        Self::new(
            RuleSet::compile("advice", ADVICE_PATTERNS)?,
            RuleSet::compile("commentary", COMMENTARY_PATTERNS)?,
            RuleSet::compile("actionable", ACTIONABLE_PATTERNS)?,
            SystemPrompts::default(),
            COMMENTARY_DIRECTIVE,
            REFUSAL,
        )
    }

    pub fn new(
        advice_rules: RuleSet,
        commentary_rules: RuleSet,
        actionable_rules: RuleSet,
        prompts: SystemPrompts,
        commentary_directive: impl Into<String>,
        refusal: impl Into<String>,
    ) -> Result<Self> {
        let refusal = refusal.into();

        // The refusal must survive its own filter or sanitize stops being idempotent.
        if let Some(rule) = actionable_rules.first_match(&refusal.to_lowercase()) {
            return Err(AssistantError::Configuration(format!(
                "refusal text is suppressed by {} rule {}",
                actionable_rules.name(),
                rule
            )));
        }

        Ok(Self {
            advice_rules,
            commentary_rules,
            actionable_rules,
            prompts,
            commentary_directive: commentary_directive.into(),
            refusal,
        })
    }
}
