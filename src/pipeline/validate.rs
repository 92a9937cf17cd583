//! Final validation gate — the only stage that can reject a candidate.

use serde::Serialize;

use super::normalize::ends_with_terminal;

/// Default length bounds for a publishable post, in code points.
pub const MIN_LEN: usize = 20;
pub const MAX_LEN: usize = 500;

/// Why a candidate was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RejectReason {
    TooShort,
    TooLong,
    ForbiddenWord,
    NoTerminalPunctuation,
}

/// Check a repaired candidate against the hard publishing constraints.
///
/// Forbidden-word matching is a plain case-sensitive substring scan with no
/// word-boundary logic. That makes it prone to false positives on embedded
/// substrings, which is intentional; the tests pin this looseness down.
pub fn validate(
    text: &str,
    forbidden_words: &[String],
    min_len: usize,
    max_len: usize,
) -> Result<(), RejectReason> {
    let len = text.chars().count();
    if len < min_len {
        return Err(RejectReason::TooShort);
    }
    if len > max_len {
        return Err(RejectReason::TooLong);
    }
    if forbidden_words.iter().any(|w| !w.is_empty() && text.contains(w.as_str())) {
        return Err(RejectReason::ForbiddenWord);
    }
    if !ends_with_terminal(text) {
        return Err(RejectReason::NoTerminalPunctuation);
    }
    Ok(())
}
