//! Emoji injector — guarantees at least one emoji glyph per post.
//!
//! Detection uses the scalar > 0x1F000 heuristic. That misses the legacy
//! 0x2600–0x27BF emoticon block on purpose; see DESIGN.md before widening it.

use rand::seq::SliceRandom;
use rand::Rng;

use super::{EMOJI_POOL, SENTENCE_MARKS, TERMINAL_MARKS};

/// Whether `c` counts as an emoji under the pipeline's heuristic.
///
/// U+2728 sparkles sits below the threshold but belongs to the injection
/// pool, so it must count or injection would not be idempotent.
fn is_emoji(c: char) -> bool {
    c as u32 > 0x1F000 || c == '✨'
}

/// Insert a pool emoji at the earliest safe position when the draft has
/// none. Drafts that already contain an emoji pass through untouched.
///
/// The insertion point is the position right after the first occurrence of
/// any sentence mark, or the end of the string when the draft has no marks
/// at all. All indices are code points, so multi-byte characters are never
/// split.
pub fn ensure_emoji(text: &str, rng: &mut impl Rng) -> String {
    if text.chars().any(is_emoji) {
        return text.to_string();
    }

    let chars: Vec<char> = text.chars().collect();
    let mut position = SENTENCE_MARKS
        .iter()
        .filter_map(|mark| chars.iter().position(|c| c == mark).map(|i| i + 1))
        .min()
        .unwrap_or(chars.len());
    if position == 0 {
        // Empty input: nowhere valid to insert.
        return text.to_string();
    }
    // Inserting at the very end would strand the terminal mark behind the
    // emoji, so slot the emoji in front of it instead.
    if position == chars.len() && TERMINAL_MARKS.contains(&chars[position - 1]) {
        position -= 1;
    }

    let emoji = EMOJI_POOL.choose(rng).copied().unwrap_or(EMOJI_POOL[0]);
    let mut out: String = chars[..position].iter().collect();
    out.push(' ');
    out.push_str(emoji);
    if position < chars.len() {
        out.push(' ');
        out.extend(&chars[position..]);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(3)
    }

    fn has_emoji(text: &str) -> bool {
        text.chars().any(is_emoji)
    }

    #[test]
    fn existing_emoji_passes_through() {
        let text = "今天好開心 😊 一起出去玩吧。";
        assert_eq!(ensure_emoji(text, &mut rng()), text);
    }

    #[test]
    fn inserted_after_first_sentence_mark() {
        let out = ensure_emoji("早安！今天也要加油。", &mut rng());
        assert!(has_emoji(&out));
        // The emoji lands right behind the first mark, framed by spaces.
        assert!(out.starts_with("早安！ "), "got {out}");
        assert!(out.contains(" 今天也要加油。"), "got {out}");
    }

    #[test]
    fn terminal_mark_stays_terminal_when_only_mark_is_last() {
        let out = ensure_emoji("今天天氣很好。", &mut rng());
        assert!(has_emoji(&out));
        assert!(out.ends_with('。'), "terminal mark must stay last: {out}");
        assert!(out.starts_with("今天天氣很好 "), "got {out}");
    }

    #[test]
    fn unpunctuated_text_gets_emoji_at_the_end() {
        let out = ensure_emoji("今天天氣很好", &mut rng());
        assert!(has_emoji(&out));
        assert!(out.starts_with("今天天氣很好 "), "got {out}");
    }

    #[test]
    fn empty_input_is_untouched() {
        assert_eq!(ensure_emoji("", &mut rng()), "");
    }

    #[test]
    fn pool_glyphs_count_as_emoji() {
        for glyph in EMOJI_POOL {
            assert!(
                glyph.chars().all(is_emoji),
                "pool glyph {glyph} would not satisfy the detector"
            );
        }
    }

    proptest! {
        /// Emoji guarantee: every non-empty draft carries an emoji afterwards.
        #[test]
        fn nonempty_output_has_emoji(s in "\\PC{1,200}") {
            prop_assert!(has_emoji(&ensure_emoji(&s, &mut rng())));
        }

        /// Idempotence: a second pass never inserts again.
        #[test]
        fn second_pass_is_identity(s in "\\PC{1,200}") {
            let once = ensure_emoji(&s, &mut rng());
            prop_assert_eq!(ensure_emoji(&once, &mut rng()), once);
        }
    }
}
