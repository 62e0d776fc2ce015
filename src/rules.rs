//! Pattern matcher
//!
//! A rule set is a named, ordered list of case-insensitive regular expressions.
//! Rules are unanchored: one match anywhere in the text is enough.

use crate::error::AssistantError;
use crate::Result;
use regex::{Regex, RegexBuilder};

/// Requests for specific picks, timing, targets or intraday tips
pub const ADVICE_PATTERNS: &[&str] = &[
    r"\bwhich stock\b",
    r"\bwhat stock\b",
    r"\bbest stock\b",
    r"\bpick\b",
    r"\brecommend\b",
    r"\bintraday\b",
    r"\btoday buy\b",
    r"\bshould i buy\b",
    r"\bshould i sell\b",
    r"\btarget price\b",
    r"\bentry\b|\bexit\b",
];

/// "Why is the market moving" / "summarize today" phrasing
pub const COMMENTARY_PATTERNS: &[&str] = &[
    r"\bwhy (is|are) the market\b",
    r"\bmarket (down|up)\b",
    r"\btoday's news\b|\bsummarize (today|todays)\b",
    r"\bwhat happened today\b",
];

/// Directive, price-action and endorsement phrasing in generated text
pub const ACTIONABLE_PATTERNS: &[&str] = &[
    r"\byou should (buy|sell|hold)\b",
    r"\bi recommend\b",
    r"\bmy recommendation\b",
    r"\benter at\b",
    r"\bexit at\b",
    r"\btarget (price)?\b",
    r"\bstop[- ]loss\b",
    r"\bbuy now\b",
    r"\bsell now\b",
    r"\bstrong (buy|sell)\b",
    r"\btop pick\b",
    r"\bbest stock\b",
];

/// Compiled, immutable rule set
#[derive(Debug, Clone)]
pub struct RuleSet {
    name: &'static str,
    rules: Vec<Regex>,
}

impl RuleSet {
    /// Compile patterns in order. Any invalid pattern fails the whole set.
    pub fn compile(name: &'static str, patterns: &[&str]) -> Result<Self> {
        let rules = patterns
            .iter()
            .map(|pattern| {
                RegexBuilder::new(pattern)
                    .case_insensitive(true)
                    .build()
                    .map_err(|e| AssistantError::InvalidRule {
                        rule_set: name,
                        pattern: pattern.to_string(),
                        reason: e.to_string(),
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { name, rules })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Source of the first rule (in declaration order) that matches
    pub fn first_match(&self, text: &str) -> Option<&str> {
        self.rules
            .iter()
            .find(|rule| rule.is_match(text))
            .map(Regex::as_str)
    }

    pub fn any_match(&self, text: &str) -> bool {
        self.rules.iter().any(|rule| rule.is_match(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_sets_compile() {
        let advice = RuleSet::compile("advice", ADVICE_PATTERNS).unwrap();
        let commentary = RuleSet::compile("commentary", COMMENTARY_PATTERNS).unwrap();
        let actionable = RuleSet::compile("actionable", ACTIONABLE_PATTERNS).unwrap();

        assert_eq!(advice.len(), ADVICE_PATTERNS.len());
        assert_eq!(commentary.len(), COMMENTARY_PATTERNS.len());
        assert_eq!(actionable.len(), ACTIONABLE_PATTERNS.len());
        assert_eq!(actionable.name(), "actionable");
    }

    #[test]
    fn test_invalid_pattern_names_rule_set() {
        let err = RuleSet::compile("broken", &[r"\bok\b", r"(unclosed"]).unwrap_err();

        match err {
            AssistantError::InvalidRule { rule_set, pattern, .. } => {
                assert_eq!(rule_set, "broken");
                assert_eq!(pattern, "(unclosed");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_case_insensitive_unanchored() {
        let set = RuleSet::compile("t", &[r"\bstop[- ]loss\b"]).unwrap();

        assert!(set.any_match("Place a STOP-LOSS below support"));
        assert!(set.any_match("a stop loss"));
        assert!(!set.any_match("nonstop losses"));
    }

    #[test]
    fn test_first_match_follows_declaration_order() {
        let set = RuleSet::compile("t", &[r"\bbeta\b", r"\balpha\b"]).unwrap();

        assert_eq!(set.first_match("alpha and beta"), Some(r"\bbeta\b"));
        assert_eq!(set.first_match("only alpha"), Some(r"\balpha\b"));
        assert_eq!(set.first_match("gamma"), None);
    }

    #[test]
    fn test_empty_set_never_matches() {
        let set = RuleSet::compile("empty", &[]).unwrap();

        assert!(set.is_empty());
        assert!(!set.any_match("anything at all"));
    }
}
