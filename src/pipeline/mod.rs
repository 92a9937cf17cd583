//! Content repair pipeline — turns a raw model draft into a guaranteed-valid post.
//!
//! Every stage is a pure `&str -> String` function; the only non-determinism
//! is the injected `Rng` used to pick pool entries, so tests can run the whole
//! pipeline with a seeded generator. Stages never fail — only the final
//! validator can reject a candidate, and the caller decides whether to ask
//! the model for a fresh draft.

pub mod clamp;
pub mod closer;
pub mod emoji;
pub mod normalize;
pub mod validate;

pub use clamp::clamp_length;
pub use closer::ensure_interactive_close;
pub use emoji::ensure_emoji;
pub use normalize::normalize;
pub use validate::{validate, RejectReason};

use rand::Rng;

/// Complete sentence-ending marks, ASCII and full-width, including the
/// informal wave dashes. Anything ending in one of these counts as closed.
pub const TERMINAL_MARKS: &[char] = &['.', '!', '?', '～', '~', '。', '！', '？'];

/// Strict sentence marks used for sentence segmentation and emoji anchor
/// positions. The wave dashes are deliberately excluded here: they close a
/// post but never split one.
pub const SENTENCE_MARKS: &[char] = &['.', '!', '?', '。', '！', '？'];

/// Phrases that mark a post as already ending interactively. Scanned within
/// the trailing [`TAIL_WINDOW`] code points only.
pub const INTERACTION_MARKERS: &[&str] = &[
    "嗎？", "呢？", "呀？", "哦？", "呢?", "嗎?", "你覺得呢", "有沒有",
];

/// How far back (in code points) the interaction-marker scan looks.
pub const TAIL_WINDOW: usize = 30;

/// Closing phrases appended when a draft lacks an interactive ending.
pub const CLOSING_PHRASES: &[&str] = &[
    "你們有類似經歷嗎？",
    "大家都有什麼想法呢？",
    "你們覺得怎麼樣呢？",
    "有沒有人跟我一樣呀？",
    "想聽聽大家的看法～",
];

/// Reduced pool used on the re-clamp path. Deliberately distinct from
/// [`CLOSING_PHRASES`]: the clamp path never draws the wave-dash phrase.
pub const CLAMP_CLOSING_PHRASES: &[&str] = &[
    "你們有類似經歷嗎？",
    "大家都有什麼想法呢？",
    "你們覺得怎麼樣呢？",
    "有沒有人跟我一樣呀？",
];

/// Emoji the injector may insert when a draft carries none.
pub const EMOJI_POOL: &[&str] = &[
    "✨", "💕", "🌟", "💫", "💖", "😊", "🎮", "📚", "🌙", "💭",
];

/// Run the full repair-and-validate sequence on a raw draft.
///
/// `normalize → ensure_interactive_close → ensure_emoji → clamp_length →
/// validate`. On rejection the candidate is discarded; there is no internal
/// retry — a fresh model call is the only path to a new attempt.
pub fn process(
    raw: &str,
    rng: &mut impl Rng,
    forbidden_words: &[String],
    min_len: usize,
    max_len: usize,
) -> Result<String, RejectReason> {
    let text = normalize(raw);
    let text = ensure_interactive_close(&text, rng);
    let text = ensure_emoji(&text, rng);
    let text = clamp_length(&text, rng);
    // Clamping keeps whole sentences only, so the rebuild can drop the one
    // segment that carried the injected emoji. A second pass is a no-op
    // whenever the emoji survived.
    let text = ensure_emoji(&text, rng);
    validate(&text, forbidden_words, min_len, max_len)?;
    Ok(text)
}

/// Last `n` code points of `text`, as an owned string. All tail inspection
/// goes through this so the window is counted in characters, never bytes.
pub(crate) fn tail(text: &str, n: usize) -> String {
    let total = text.chars().count();
    text.chars().skip(total.saturating_sub(n)).collect()
}
