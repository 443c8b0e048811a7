//! PII redaction via regex substitution.
//!
//! Matches bare 10-digit runs and email-like tokens. No context awareness:
//! the pattern may over- or under-redact, which is acceptable for
//! consultation comments where recall matters more than precision.

use econsult_core::REDACTED_MARKER;
use once_cell::sync::Lazy;
use regex::Regex;

static PII_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:\b\d{10}\b)|(?:[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,})").unwrap()
});

/// Replace every PII-like span with `[REDACTED]`. Always succeeds.
pub fn redact(text: &str) -> String {
    PII_RE.replace_all(text, REDACTED_MARKER).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redact_phone() {
        assert_eq!(redact("Call me at 1234567890"), "Call me at [REDACTED]");
    }

    #[test]
    fn test_redact_email() {
        assert_eq!(
            redact("Email me at test@example.com"),
            "Email me at [REDACTED]"
        );
    }

    #[test]
    fn test_no_pii_unchanged() {
        assert_eq!(redact("This is a normal comment"), "This is a normal comment");
    }

    #[test]
    fn test_empty() {
        assert_eq!(redact(""), "");
    }

    #[test]
    fn test_multiple_matches() {
        let out = redact("a@b.com and 0123456789 and c@d.org");
        assert_eq!(out, "[REDACTED] and [REDACTED] and [REDACTED]");
    }

    #[test]
    fn test_eleven_digits_not_redacted() {
        // Word boundaries restrict the digit rule to exactly ten digits.
        assert_eq!(redact("ref 12345678901"), "ref 12345678901");
    }
}
