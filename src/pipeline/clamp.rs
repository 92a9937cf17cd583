//! Length clamper — rebuilds over-long drafts from whole sentences.

use rand::seq::SliceRandom;
use rand::Rng;

use super::closer::has_interactive_tail;
use super::{CLAMP_CLOSING_PHRASES, SENTENCE_MARKS};

/// Re-clamp threshold. Drafts at or under this length pass untouched.
pub const HARD_CAP: usize = 280;
/// Target length the rebuilt draft aims for.
pub const TARGET_CAP: usize = 250;
/// Minimum accumulated length before a sentence mark closes a segment.
pub const MIN_SENTENCE_LEN: usize = 100;

/// Clamp an over-long draft with the default caps.
pub fn clamp_length(text: &str, rng: &mut impl Rng) -> String {
    clamp_length_with(text, HARD_CAP, TARGET_CAP, MIN_SENTENCE_LEN, rng)
}

/// Clamp `text` to roughly `target_cap` code points when it exceeds
/// `hard_cap`, keeping whole sentences only.
///
/// Segmentation closes a sentence at every sentence mark once the running
/// segment exceeds `min_sentence_len`; a trailing partial segment becomes a
/// final fragment. The first sentence is always kept, even when it alone
/// overflows the target, so the post never loses its opening. After
/// rebuilding, a closing question from the reduced pool is appended when the
/// trim dropped the interactive ending.
///
/// Idempotent: anything at or under `hard_cap` is returned unchanged.
pub fn clamp_length_with(
    text: &str,
    hard_cap: usize,
    target_cap: usize,
    min_sentence_len: usize,
    rng: &mut impl Rng,
) -> String {
    if text.chars().count() <= hard_cap {
        return text.to_string();
    }

    let mut sentences: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;
    for ch in text.chars() {
        current.push(ch);
        current_len += 1;
        if SENTENCE_MARKS.contains(&ch) && current_len > min_sentence_len {
            sentences.push(std::mem::take(&mut current));
            current_len = 0;
        }
    }
    if !current.is_empty() {
        sentences.push(current);
    }

    // text is longer than hard_cap here, so there is at least one segment.
    let mut rebuilt = sentences[0].clone();
    let mut rebuilt_len = rebuilt.chars().count();
    for sentence in &sentences[1..] {
        let len = sentence.chars().count();
        if rebuilt_len + len > target_cap {
            break;
        }
        rebuilt.push_str(sentence);
        rebuilt_len += len;
    }

    if !has_interactive_tail(&rebuilt) {
        let phrase = CLAMP_CLOSING_PHRASES
            .choose(rng)
            .copied()
            .unwrap_or(CLAMP_CLOSING_PHRASES[0]);
        rebuilt.push(' ');
        rebuilt.push_str(phrase);
    }
    rebuilt
}
