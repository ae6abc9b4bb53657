//! Paragraph accumulation within one section.
//!
//! ## The Algorithm
//!
//! A section's content is split on the paragraph separator and walked in
//! order, accumulating paragraphs into the current chunk:
//!
//! ```text
//! for each paragraph p (trimmed, empty skipped):
//!     tokens = trunc(count_tokens(p) × structure weight)
//!
//!     heading?          flush; seed a new chunk with p; next
//!     over the ceiling? flush (only if the chunk is non-empty)
//!     append p
//!     Japanese on, p ends a sentence, chunk >= min?  flush
//! flush the rest
//! ```
//!
//! ## Structure Weights
//!
//! Some content is denser or sparser than its raw count suggests. The first
//! matching rule picks the multiplier:
//!
//! | Paragraph | Weight |
//! |-----------|--------|
//! | starts with `- ` or `* ` | `listItemWeight` |
//! | starts with a code fence | `codeBlockWeight` |
//! | contains `\|` and a `-+-` row separator | `tableWeight` |
//! | anything else | 1.0 |
//!
//! ## Oversized Paragraphs
//!
//! Paragraphs are never cut. One that alone exceeds `maxTokens` becomes a
//! chunk of its own, over the ceiling; every other chunk stays within it.

use tracing::{debug, trace};

use crate::budget::TokenBudget;
use crate::config::ChunkConfig;
use crate::japanese::{count_tokens, ends_with_sentence_end};
use crate::section::parse_heading;
use crate::Chunk;

/// Separator placed between paragraphs accumulated into one chunk.
const PARAGRAPH_JOINER: &str = "\n\n";

const CODE_FENCE: &str = "```";

const TABLE_ROW_SEPARATOR: &str = "-+-";

/// Structural class of a paragraph, used to pick its token weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructureKind {
    /// Starts with `- ` or `* `.
    ListItem,
    /// Starts with a code fence.
    CodeBlock,
    /// Contains `|` and a `-+-` row separator.
    Table,
    /// Anything else.
    Prose,
}

impl StructureKind {
    /// Classify a trimmed paragraph.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use danraku::StructureKind;
    ///
    /// assert_eq!(StructureKind::classify("- 項目"), StructureKind::ListItem);
    /// assert_eq!(StructureKind::classify("```rust\nfn main() {}\n```"), StructureKind::CodeBlock);
    /// assert_eq!(StructureKind::classify("a | b\n--+--\n1 | 2"), StructureKind::Table);
    /// assert_eq!(StructureKind::classify("普通の段落。"), StructureKind::Prose);
    /// ```
    #[must_use]
    pub fn classify(paragraph: &str) -> Self {
        if paragraph.starts_with("- ") || paragraph.starts_with("* ") {
            Self::ListItem
        } else if paragraph.starts_with(CODE_FENCE) {
            Self::CodeBlock
        } else if paragraph.contains('|') && paragraph.contains(TABLE_ROW_SEPARATOR) {
            Self::Table
        } else {
            Self::Prose
        }
    }

    /// The configured multiplier for this class.
    #[must_use]
    pub fn weight(self, config: &ChunkConfig) -> f64 {
        match self {
            Self::ListItem => config.list_item_weight(),
            Self::CodeBlock => config.code_block_weight(),
            Self::Table => config.table_weight(),
            Self::Prose => 1.0,
        }
    }
}

/// Splits one section's content into provisional chunks.
///
/// The chunks carry only `content` and `token_count`; positions, heading
/// references, precedence and metadata are stamped on by
/// [`DocumentChunker`](crate::DocumentChunker).
///
/// # Examples
///
/// ```rust
/// use danraku::{ChunkConfig, ContentChunker};
///
/// let config = ChunkConfig::builder()
///     .max_tokens(8)
///     .min_tokens(1)
///     .overlap_tokens(0)
///     .build()
///     .unwrap();
/// let chunker = ContentChunker::new(&config);
///
/// let chunks = chunker.chunk("# 見出し\n\n短い文です。\n\nもう一つの段落です。");
/// assert_eq!(chunks.len(), 3);
/// assert_eq!(chunks[0].content, "# 見出し");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ContentChunker<'a> {
    config: &'a ChunkConfig,
    budget: TokenBudget,
}

impl<'a> ContentChunker<'a> {
    /// Create a chunker bound to a configuration.
    #[must_use]
    pub fn new(config: &'a ChunkConfig) -> Self {
        Self {
            config,
            budget: TokenBudget::for_chunks(config),
        }
    }

    /// Weighted token count of one trimmed paragraph.
    #[must_use]
    pub fn paragraph_tokens(&self, paragraph: &str) -> usize {
        let base = count_tokens(paragraph, self.config.japanese());
        let weight = StructureKind::classify(paragraph).weight(self.config);
        (base as f64 * weight) as usize
    }

    /// Split section content into chunks.
    ///
    /// Returns an empty vector for empty or whitespace-only content.
    #[must_use]
    pub fn chunk(&self, content: &str) -> Vec<Chunk> {
        let content = content.trim();
        if content.is_empty() {
            return Vec::new();
        }

        let mut chunks = Vec::new();
        let mut current = Accumulator::default();

        let paragraphs = content
            .split(self.config.paragraph_separator())
            .map(str::trim)
            .filter(|p| !p.is_empty());

        for paragraph in paragraphs {
            let tokens = self.paragraph_tokens(paragraph);
            trace!(chars = paragraph.chars().count(), tokens, "paragraph");

            if parse_heading(paragraph).is_some() {
                current.flush_into(&mut chunks, "heading");
                current.seed(paragraph, tokens);
                continue;
            }

            if !current.is_empty() && self.budget.would_overflow(current.tokens, tokens) {
                current.flush_into(&mut chunks, "max_tokens");
            }

            current.push(paragraph, tokens);

            if let Some(jp) = self.config.japanese() {
                if ends_with_sentence_end(paragraph, jp) && self.budget.reached_floor(current.tokens)
                {
                    current.flush_into(&mut chunks, "sentence_end");
                }
            }
        }

        current.flush_into(&mut chunks, "final");
        chunks
    }
}

/// The chunk being built.
#[derive(Debug, Default)]
struct Accumulator {
    text: String,
    tokens: usize,
}

impl Accumulator {
    fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    fn seed(&mut self, paragraph: &str, tokens: usize) {
        self.text.push_str(paragraph);
        self.tokens = tokens;
    }

    fn push(&mut self, paragraph: &str, tokens: usize) {
        if !self.text.is_empty() {
            self.text.push_str(PARAGRAPH_JOINER);
        }
        self.text.push_str(paragraph);
        self.tokens = self.tokens.saturating_add(tokens);
    }

    fn flush_into(&mut self, chunks: &mut Vec<Chunk>, reason: &'static str) {
        let text = std::mem::take(&mut self.text);
        let tokens = std::mem::take(&mut self.tokens);
        if text.is_empty() {
            return;
        }
        debug!(reason, tokens, chars = text.chars().count(), "chunk closed");
        chunks.push(Chunk::new(text.trim(), tokens));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::JapaneseConfig;

    fn config(max: usize, min: usize) -> ChunkConfig {
        ChunkConfig::builder()
            .max_tokens(max)
            .min_tokens(min)
            .overlap_tokens(0)
            .build()
            .unwrap()
    }

    #[test]
    fn test_empty_content() {
        let config = ChunkConfig::default();
        let chunker = ContentChunker::new(&config);
        assert!(chunker.chunk("").is_empty());
        assert!(chunker.chunk("  \n\n \t ").is_empty());
    }

    #[test]
    fn test_paragraphs_accumulate_under_budget() {
        let config = config(100, 50);
        let chunker = ContentChunker::new(&config);

        let chunks = chunker.chunk("alpha beta\n\ngamma delta\n\n\n\nepsilon");
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].content, "alpha beta\n\ngamma delta\n\nepsilon");
        assert_eq!(chunks[0].token_count, 5);
    }

    #[test]
    fn test_ceiling_forces_split() {
        let config = config(4, 1);
        let chunker = ContentChunker::new(&config);

        let chunks = chunker.chunk("a b c\n\nd e\n\nf");
        let contents: Vec<_> = chunks.iter().map(|c| c.content.as_str()).collect();
        assert_eq!(contents, ["a b c", "d e\n\nf"]);
        assert_eq!(chunks[0].token_count, 3);
        assert_eq!(chunks[1].token_count, 3);
    }

    #[test]
    fn test_oversized_paragraph_stands_alone() {
        let config = config(3, 1);
        let chunker = ContentChunker::new(&config);

        let chunks = chunker.chunk("x\n\none two three four five\n\ny");
        let contents: Vec<_> = chunks.iter().map(|c| c.content.as_str()).collect();
        assert_eq!(contents, ["x", "one two three four five", "y"]);
        assert_eq!(chunks[1].token_count, 5);
    }

    #[test]
    fn test_heading_seeds_next_chunk() {
        let config = config(100, 50);
        let chunker = ContentChunker::new(&config);

        let chunks = chunker.chunk("intro text\n\n# Title\n\nbody text");
        let contents: Vec<_> = chunks.iter().map(|c| c.content.as_str()).collect();
        assert_eq!(contents, ["intro text", "# Title\n\nbody text"]);
        // " # " padding: "#" and "Title" are separate words
        assert_eq!(chunks[1].token_count, 4);
    }

    #[test]
    fn test_sentence_end_closes_chunk_once_floor_met() {
        let config = config(100, 5);
        let chunker = ContentChunker::new(&config);

        // 今日は晴れ。 → 5 + 1 = 6 tokens, reaches the floor
        let chunks = chunker.chunk("今日は晴れ。\n\n明日は雨。");
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].content, "今日は晴れ。");
        assert_eq!(chunks[0].token_count, 6);
    }

    #[test]
    fn test_sentence_end_below_floor_keeps_going() {
        let config = config(100, 50);
        let chunker = ContentChunker::new(&config);

        let chunks = chunker.chunk("今日は晴れ。\n\n明日は雨。");
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].content, "今日は晴れ。\n\n明日は雨。");
    }

    #[test]
    fn test_sentence_end_needs_japanese_config() {
        let config = ChunkConfig::builder()
            .max_tokens(100)
            .min_tokens(1)
            .no_japanese()
            .build()
            .unwrap();
        let chunker = ContentChunker::new(&config);

        assert_eq!(chunker.chunk("今日は晴れ。\n\n明日は雨。").len(), 1);
    }

    #[test]
    fn test_custom_sentence_endings() {
        let jp = JapaneseConfig {
            sentence_endings: vec![".".into()],
            ..JapaneseConfig::default()
        };
        let config = ChunkConfig::builder()
            .max_tokens(100)
            .min_tokens(1)
            .japanese(jp)
            .build()
            .unwrap();
        let chunker = ContentChunker::new(&config);

        let chunks = chunker.chunk("First one.\n\nSecond one.\n\n今日は晴れ。");
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[2].content, "今日は晴れ。");
    }

    #[test]
    fn test_structure_weights() {
        let config = ChunkConfig::builder()
            .list_item_weight(0.5)
            .code_block_weight(2.0)
            .table_weight(3.0)
            .build()
            .unwrap();
        let chunker = ContentChunker::new(&config);

        // "- a b c" → "-", "a", "b", "c" = 4; × 0.5
        assert_eq!(chunker.paragraph_tokens("- a b c"), 2);
        // "```", "fn" = 2; × 2.0
        assert_eq!(chunker.paragraph_tokens("```\nfn"), 4);
        // "a", "|", "b", "-", "+", "-" = 6; × 3.0
        assert_eq!(chunker.paragraph_tokens("a | b -+-"), 18);
        assert_eq!(chunker.paragraph_tokens("plain words"), 2);
    }

    #[test]
    fn test_weight_truncates() {
        let config = ChunkConfig::builder().list_item_weight(0.8).build().unwrap();
        let chunker = ContentChunker::new(&config);

        // 4 × 0.8 = 3.2 → 3
        assert_eq!(chunker.paragraph_tokens("* a b c"), 3);
    }

    #[test]
    fn test_classify_priority() {
        assert_eq!(StructureKind::classify("- a | b -+-"), StructureKind::ListItem);
        assert_eq!(StructureKind::classify("```\n| x -+- |"), StructureKind::CodeBlock);
        assert_eq!(StructureKind::classify("| a | b |\n|---|---|"), StructureKind::Prose);
        assert_eq!(StructureKind::classify("-no space"), StructureKind::Prose);
    }

    #[test]
    fn test_custom_separator() {
        let config = ChunkConfig::builder()
            .max_tokens(2)
            .min_tokens(1)
            .overlap_tokens(0)
            .paragraph_separator("\n")
            .build()
            .unwrap();
        let chunker = ContentChunker::new(&config);

        let chunks = chunker.chunk("a b\nc d");
        assert_eq!(chunks.len(), 2);
    }
}
