//! Input sanitization and validation helpers.
//!
//! Validation failures are user errors, reported back directly by the
//! handler that caught them; they never reach the store or the logs as
//! system faults.

use crate::errors::{Error, Result};

/// Strips control characters (newlines, carriage returns, and tabs
/// excepted) and truncates to `max_length`, appending an ellipsis when
/// anything was cut.
#[must_use]
pub fn sanitize_text(text: &str, max_length: usize) -> String {
    let cleaned: String = text
        .chars()
        .filter(|c| !c.is_control() || matches!(c, '\n' | '\r' | '\t'))
        .collect();

    if cleaned.chars().count() <= max_length {
        return cleaned;
    }

    let kept: String = cleaned.chars().take(max_length.saturating_sub(3)).collect();
    format!("{kept}...")
}

/// Validates an integer against an inclusive range.
///
/// # Errors
/// Returns [`Error::InvalidAmount`] when the value falls outside the range.
pub fn int_in_range(value: i64, min: i64, max: i64) -> Result<i64> {
    if value < min || value > max {
        return Err(Error::InvalidAmount { amount: value });
    }
    Ok(value)
}

/// Cheap spam heuristics for inbound message content: mass mentions,
/// excessive character repetition, and long all-caps runs.
#[must_use]
pub fn looks_like_spam(content: &str) -> bool {
    if content.contains("@everyone") || content.contains("@here") {
        return true;
    }

    // A single character repeated more than ten times in a row
    let mut run_char = None;
    let mut run_len = 0_usize;
    for c in content.chars() {
        if Some(c) == run_char {
            run_len += 1;
            if run_len > 10 {
                return true;
            }
        } else {
            run_char = Some(c);
            run_len = 1;
        }
    }

    // Ten or more consecutive uppercase letters
    let mut caps_run = 0_usize;
    for c in content.chars() {
        if c.is_uppercase() {
            caps_run += 1;
            if caps_run >= 10 {
                return true;
            }
        } else {
            caps_run = 0;
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_text_strips_control_characters() {
        assert_eq!(sanitize_text("a\u{0}b\u{7}c", 100), "abc");
        // Whitespace control characters survive
        assert_eq!(sanitize_text("a\nb\tc", 100), "a\nb\tc");
    }

    #[test]
    fn test_sanitize_text_truncates_with_ellipsis() {
        let long = "x".repeat(50);
        let result = sanitize_text(&long, 10);
        assert_eq!(result, "xxxxxxx...");
        assert_eq!(result.chars().count(), 10);
    }

    #[test]
    fn test_sanitize_text_short_input_unchanged() {
        assert_eq!(sanitize_text("hello", 10), "hello");
    }

    #[test]
    fn test_int_in_range_bounds() {
        assert_eq!(int_in_range(5, 1, 10).ok(), Some(5));
        assert_eq!(int_in_range(1, 1, 10).ok(), Some(1));
        assert_eq!(int_in_range(10, 1, 10).ok(), Some(10));
        assert!(matches!(
            int_in_range(0, 1, 10),
            Err(Error::InvalidAmount { amount: 0 })
        ));
        assert!(matches!(
            int_in_range(11, 1, 10),
            Err(Error::InvalidAmount { amount: 11 })
        ));
    }

    #[test]
    fn test_looks_like_spam_mass_mentions() {
        assert!(looks_like_spam("free nitro @everyone"));
        assert!(looks_like_spam("hello @here"));
        assert!(!looks_like_spam("hello world"));
    }

    #[test]
    fn test_looks_like_spam_repetition_and_caps() {
        assert!(looks_like_spam("aaaaaaaaaaaaaaa"));
        assert!(looks_like_spam("PLEASE READ THISMESSAGE"));
        assert!(!looks_like_spam("normal sentence with Some Caps"));
    }
}
