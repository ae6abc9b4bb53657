//! Japanese text analysis: character classes, sentences and heuristic tokens.
//!
//! ## Token Heuristic
//!
//! Tokens here are a sizing aid, not a model tokenizer. The count is
//! language-aware so that Japanese prose (no spaces between words) is not
//! measured as a handful of giant "words":
//!
//! ```text
//! "東京は晴れ。Hello world"
//!
//! spacing:  "東京は晴れ 。 Hello world"
//! words:    ["東京は晴れ", "。", "Hello", "world"]
//! tokens:    5 (one per rune)  + 1 + 1 + 1  = 8
//! ```
//!
//! A word that is exactly a particle (`は`, `を`, ...) or a topic marker
//! (`について`, ...) multiplies the running total by the configured weight.
//! The multiplier applies to everything counted so far in the fragment, not
//! just the word itself, so particles late in a long paragraph weigh more.
//! Downstream sizing decisions depend on this exact behaviour; keep it.

use crate::config::JapaneseConfig;

/// Particles recognised by the token weighting.
pub const PARTICLES: &[&str] = &["は", "が", "を", "に", "へ", "と", "で", "から", "まで", "より"];

/// Topic markers recognised by the token weighting.
pub const TOPIC_MARKERS: &[&str] = &["は", "が", "について", "に関して"];

/// Glyphs that are padded with spaces before words are split.
const SPACED_GLYPHS: &[char] = &[
    '、', '。', '（', '）', '「', '」', '『', '』', '［', '］', '#', '-',
];

/// Whether `c` is Hiragana, Katakana or Han.
#[must_use]
pub fn is_japanese_char(c: char) -> bool {
    is_hiragana(c) || is_katakana(c) || is_han(c)
}

fn is_hiragana(c: char) -> bool {
    matches!(
        c,
        '\u{3041}'..='\u{3096}' | '\u{309D}'..='\u{309F}' | '\u{1B001}'..='\u{1B11F}' | '\u{1F200}'
    )
}

fn is_katakana(c: char) -> bool {
    matches!(
        c,
        '\u{30A1}'..='\u{30FA}'
            | '\u{30FD}'..='\u{30FF}'
            | '\u{31F0}'..='\u{31FF}'
            | '\u{32D0}'..='\u{32FE}'
            | '\u{3300}'..='\u{3357}'
            | '\u{FF66}'..='\u{FF6F}'
            | '\u{FF71}'..='\u{FF9D}'
            | '\u{1B000}'
    )
}

fn is_han(c: char) -> bool {
    matches!(
        c,
        '\u{2E80}'..='\u{2E99}'
            | '\u{2E9B}'..='\u{2EF3}'
            | '\u{2F00}'..='\u{2FD5}'
            | '\u{3005}'
            | '\u{3007}'
            | '\u{3021}'..='\u{3029}'
            | '\u{3038}'..='\u{303B}'
            | '\u{3400}'..='\u{4DBF}'
            | '\u{4E00}'..='\u{9FFF}'
            | '\u{F900}'..='\u{FA6D}'
            | '\u{FA70}'..='\u{FAD9}'
            | '\u{20000}'..='\u{2A6DF}'
            | '\u{2A700}'..='\u{2EBE0}'
            | '\u{2F800}'..='\u{2FA1D}'
            | '\u{30000}'..='\u{3134A}'
    )
}

/// Whether `text` contains at least one Japanese character.
#[must_use]
pub fn contains_japanese(text: &str) -> bool {
    text.chars().any(is_japanese_char)
}

/// Whether `word` is exactly one of [`PARTICLES`].
#[must_use]
pub fn is_particle(word: &str) -> bool {
    PARTICLES.contains(&word)
}

/// Whether `word` is exactly one of [`TOPIC_MARKERS`].
#[must_use]
pub fn is_topic_marker(word: &str) -> bool {
    TOPIC_MARKERS.contains(&word)
}

/// Replace full-width spaces with ASCII spaces and pad punctuation, brackets,
/// `#` and `-` with spaces so they split into words of their own.
#[must_use]
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / 4);
    for c in text.chars() {
        if c == '\u{3000}' {
            out.push(' ');
        } else if SPACED_GLYPHS.contains(&c) {
            out.push(' ');
            out.push(c);
            out.push(' ');
        } else {
            out.push(c);
        }
    }
    out
}

/// Heuristic token count for a text fragment.
///
/// Japanese words count one token per rune, other words one token each.
/// With a [`JapaneseConfig`], particle and topic-marker words scale the
/// running total by `key_particle_weight` / `topic_marker_weight` (both may
/// apply to the same word), truncating after each multiplication. The total
/// saturates at `usize::MAX`.
///
/// # Examples
///
/// ```rust
/// use danraku::japanese::count_tokens;
///
/// assert_eq!(count_tokens("Hello world", None), 2);
/// assert_eq!(count_tokens("日本語のテキスト", None), 8);
/// // 「 + 東京 + 」 + へ行く + 。
/// assert_eq!(count_tokens("「東京」へ行く。", None), 8);
/// ```
#[must_use]
pub fn count_tokens(text: &str, japanese: Option<&JapaneseConfig>) -> usize {
    let normalized = normalize(text);
    let mut total: usize = 0;

    for word in normalized.split_whitespace() {
        if !contains_japanese(word) {
            total = total.saturating_add(1);
            continue;
        }

        total = total.saturating_add(word.chars().count());

        if let Some(jp) = japanese {
            if is_particle(word) {
                total = scale(total, jp.key_particle_weight);
            }
            if is_topic_marker(word) {
                total = scale(total, jp.topic_marker_weight);
            }
        }
    }

    total
}

fn scale(total: usize, weight: f64) -> usize {
    (total as f64 * weight) as usize
}

/// Split a fragment into sentences after each sentence-ending glyph.
///
/// A glyph in the final position does not open a new (empty) sentence.
/// Sentences are trimmed; a whitespace-only tail is dropped.
///
/// # Examples
///
/// ```rust
/// use danraku::{japanese::split_sentences, JapaneseConfig};
///
/// let jp = JapaneseConfig::default();
/// let sentences = split_sentences("晴れです。 散歩に行きます！", &jp);
/// assert_eq!(sentences, vec!["晴れです。", "散歩に行きます！"]);
/// ```
#[must_use]
pub fn split_sentences(text: &str, japanese: &JapaneseConfig) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        current.push(c);
        if chars.peek().is_some() && japanese.is_sentence_end(c) {
            sentences.push(current.trim().to_string());
            current.clear();
        }
    }

    let tail = current.trim();
    if !tail.is_empty() {
        sentences.push(tail.to_string());
    }

    sentences
}

/// Whether the last rune of `text` is a configured sentence-ending glyph.
#[must_use]
pub fn ends_with_sentence_end(text: &str, japanese: &JapaneseConfig) -> bool {
    text.chars().next_back().is_some_and(|c| japanese.is_sentence_end(c))
}
