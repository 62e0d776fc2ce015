//! Intent Router
//!
//! Classifies a raw user message into a handling mode:
//! - Guardrail: requests for picks, buy/sell timing, targets, intraday tips
//! - Commentary: "why is the market moving" / "summarize today" questions
//! - Coach: everything else (educational fallback)

use crate::models::Mode;
use crate::policy::PolicyConfig;
use crate::rules::RuleSet;

/// Routing outcome plus the rule that decided it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDecision {
    pub mode: Mode,
    /// `None` when the message fell through to `Coach`
    pub matched_rule: Option<String>,
}

#[derive(Debug, Clone)]
pub struct IntentRouter {
    advice: RuleSet,
    commentary: RuleSet,
}

impl IntentRouter {
    pub fn new(policy: &PolicyConfig) -> Self {
        Self {
            advice: policy.advice_rules.clone(),
            commentary: policy.commentary_rules.clone(),
        }
    }

    /// Total over any input; empty or odd input routes to `Coach`.
    pub fn classify(&self, text: &str) -> Mode {
        self.explain(text).mode
    }

    pub fn explain(&self, text: &str) -> RouteDecision {
        let normalized = normalize(text);

        if let Some(rule) = self.advice.first_match(&normalized) {
            return RouteDecision {
                mode: Mode::Guardrail,
                matched_rule: Some(rule.to_string()),
            };
        }

        if let Some(rule) = self.commentary.first_match(&normalized) {
            return RouteDecision {
                mode: Mode::Commentary,
                matched_rule: Some(rule.to_string()),
            };
        }

        RouteDecision {
            mode: Mode::Coach,
            matched_rule: None,
        }
    }
}

fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn router() -> IntentRouter {
        IntentRouter::new(&PolicyConfig::standard().unwrap())
    }

    #[test]
    fn test_advice_requests_hit_guardrail() {
        let router = router();
        let cases = vec![
            "What stock should I buy today?",
            "which stock will double?",
            "give me an intraday tip",
            "Should I sell my shares?",
            "what's the target price for this?",
            "best entry for gold?",
            "Can you recommend a fund?",
        ];

        for c in cases {
            assert_eq!(router.classify(c), Mode::Guardrail, "input: {c}");
        }
    }

    #[test]
    fn test_guardrail_outranks_commentary() {
        let router = router();

        // matches both "why is the market" and "should i buy"
        let decision = router.explain("Why is the market down today, should I buy?");
        assert_eq!(decision.mode, Mode::Guardrail);
        assert_eq!(decision.matched_rule.as_deref(), Some(r"\bshould i buy\b"));
    }

    #[test]
    fn test_commentary_questions() {
        let router = router();
        let cases = vec![
            "Why is the market down today?",
            "Why are the market indices falling?",
            "market up again?",
            "Summarize today please",
            "what happened today in equities",
            "anything in today's news?",
        ];

        for c in cases {
            assert_eq!(router.classify(c), Mode::Commentary, "input: {c}");
        }
    }

    #[test]
    fn test_coach_fallback() {
        let router = router();

        assert_eq!(router.classify("Explain what an ETF is"), Mode::Coach);
        assert_eq!(router.classify("What is SIP?"), Mode::Coach);
        assert_eq!(router.classify(""), Mode::Coach);
        assert_eq!(router.classify("   \n\t "), Mode::Coach);
        assert_eq!(router.explain("hi").matched_rule, None);
    }

    #[test]
    fn test_case_and_whitespace_insensitive() {
        let router = router();

        assert_eq!(
            router.classify("Should I BUY now?"),
            router.classify("  should i buy now?  ")
        );
        assert_eq!(router.classify("  WHY IS THE MARKET UP  "), Mode::Commentary);
    }

    #[test]
    fn test_word_boundaries() {
        let router = router();

        // "picking" and "exiting" are not the bare words "pick" / "exit"
        assert_eq!(router.classify("tips on picking a broker account type"), Mode::Coach);
        assert_eq!(router.classify("exiting a lease early"), Mode::Coach);
    }
}
