//! Draft normalization — strips role-play artifacts and closes the sentence.

use super::TERMINAL_MARKS;

/// Role tags the model sometimes prefixes to its own output. Only stripped
/// at the very start of the draft.
const ROLE_TAGS: &[&str] = &["Luna:", "Luna："];

/// Clean up a raw draft: trim whitespace, drop a leading speaker tag, and
/// guarantee the text ends with a terminal punctuation mark.
///
/// Total function — the worst case is the trimmed input plus a full-width
/// period.
pub fn normalize(raw: &str) -> String {
    let mut text = raw.trim();
    for tag in ROLE_TAGS {
        if let Some(rest) = text.strip_prefix(tag) {
            text = rest.trim_start();
            break;
        }
    }

    let mut text = text.to_string();
    if !ends_with_terminal(&text) {
        text.push('。');
    }
    text
}

/// Whether `text` ends with one of the recognized terminal marks.
pub(crate) fn ends_with_terminal(text: &str) -> bool {
    text.chars().last().is_some_and(|c| TERMINAL_MARKS.contains(&c))
}
