//! Output Safety Filter
//!
//! Re-scans generated text for actionable advice phrasing, independent of how
//! the request was routed. The decision is all-or-nothing: a match replaces the
//! whole response with the fixed refusal, otherwise the text passes unchanged.

use crate::policy::PolicyConfig;
use crate::rules::RuleSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SafetyVerdict {
    Pass,
    Suppressed { rule: String },
}

impl SafetyVerdict {
    pub fn is_suppressed(&self) -> bool {
        matches!(self, SafetyVerdict::Suppressed { .. })
    }
}

#[derive(Debug, Clone)]
pub struct OutputSafetyFilter {
    actionable: RuleSet,
    refusal: String,
}

impl OutputSafetyFilter {
    pub fn new(policy: &PolicyConfig) -> Self {
        Self {
            actionable: policy.actionable_rules.clone(),
            refusal: policy.refusal.clone(),
        }
    }

    pub fn refusal(&self) -> &str {
        &self.refusal
    }

    pub fn inspect(&self, generated: &str) -> SafetyVerdict {
        match self.actionable.first_match(&generated.to_lowercase()) {
            Some(rule) => SafetyVerdict::Suppressed {
                rule: rule.to_string(),
            },
            None => SafetyVerdict::Pass,
        }
    }

    pub fn sanitize(&self, generated: &str) -> String {
        match self.inspect(generated) {
            SafetyVerdict::Pass => generated.to_string(),
            SafetyVerdict::Suppressed { .. } => self.refusal.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter() -> OutputSafetyFilter {
        OutputSafetyFilter::new(&PolicyConfig::standard().unwrap())
    }

    #[test]
    fn test_actionable_output_is_replaced() {
        let filter = filter();
        let cases = vec![
            "Honestly, you should buy the dip.",
            "YOU SHOULD HOLD through earnings",
            "I recommend a 60/40 split.",
            "My recommendation: wait.",
            "Enter at 101.5 and exit at 110.",
            "Set a stop-loss at 95",
            "a stop loss keeps you safe",
            "Our target price is 250.",
            "This is a strong buy.",
            "My top pick for 2024",
            "The best stock in the sector",
            "buy now before it runs",
        ];

        for c in cases {
            assert_eq!(filter.sanitize(c), filter.refusal(), "input: {c}");
            assert!(filter.inspect(c).is_suppressed(), "input: {c}");
        }
    }

    #[test]
    fn test_educational_output_passes_unchanged() {
        let filter = filter();
        let text = "An ETF is a basket of securities that trades on an exchange.\n\n\
                    - Diversification\n- Low costs\n\nEducational purposes only — not investment advice.";

        assert_eq!(filter.sanitize(text), text);
        assert_eq!(filter.inspect(text), SafetyVerdict::Pass);
    }

    #[test]
    fn test_no_partial_redaction() {
        let filter = filter();
        let out = filter.sanitize("Great overview of bonds. Also, you should sell your tech shares.");

        assert_eq!(out, filter.refusal());
        assert!(!out.contains("bonds"));
    }

    #[test]
    fn test_sanitize_is_idempotent() {
        let filter = filter();
        let inputs = [
            "you should buy X",
            "Index funds track a market index.",
            "",
        ];

        for input in inputs {
            let once = filter.sanitize(input);
            assert_eq!(filter.sanitize(&once), once);
        }
        assert_eq!(filter.inspect(filter.refusal()), SafetyVerdict::Pass);
    }

    #[test]
    fn test_reports_matching_rule() {
        let filter = filter();

        assert_eq!(
            filter.inspect("This is a Strong Sell"),
            SafetyVerdict::Suppressed {
                rule: r"\bstrong (buy|sell)\b".to_string()
            }
        );
    }
}
