//! Bot token redaction for anything that reaches the logs
//!
//! Bot API URLs embed the token (`https://api.telegram.org/bot<token>/...`),
//! and reqwest errors print the URL.

use lazy_static::lazy_static;
use regex::Regex;

pub const REDACTED: &str = "[REDACTED_TELEGRAM_TOKEN]";

lazy_static! {
    /// `<digits>:<letters_numbers_-...>`
    static ref TOKEN_PATTERN: Regex = Regex::new(r"\b\d{6,}:[A-Za-z0-9_-]{20,}\b")
        .expect("token pattern is valid");
}

/// Replace the known token and anything token-shaped. Never fails.
pub fn redact_token(text: &str, token: &str) -> String {
    let known = if token.is_empty() {
        text.to_string()
    } else {
        text.replace(token, REDACTED)
    };

    TOKEN_PATTERN.replace_all(&known, REDACTED).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOKEN: &str = "123456789:AAHdqTcvCH1vGWJxfSeofSAs0K5PALDsaw";

    #[test]
    fn test_known_token_in_url() {
        let msg = format!("error sending request for url (https://api.telegram.org/bot{}/getUpdates)", TOKEN);

        let out = redact_token(&msg, TOKEN);

        assert!(!out.contains(TOKEN));
        assert!(out.contains("/bot[REDACTED_TELEGRAM_TOKEN]/getUpdates"));
    }

    #[test]
    fn test_unknown_token_shape() {
        let out = redact_token("leaked 987654321:ZZZZZZZZZZZZZZZZZZZZZZZZZ here", "");

        assert_eq!(out, "leaked [REDACTED_TELEGRAM_TOKEN] here");
    }

    #[test]
    fn test_plain_text_untouched() {
        let msg = "ratio 12:30 at 10:45, chat 42";
        assert_eq!(redact_token(msg, TOKEN), msg);
    }
}
