//! Post-pass fusion of adjacent chunks under the same top-level heading.
//!
//! ```text
//! maxMergedTokens = 100
//!
//! [A] 40   [A, B] 30   [A, C] 50   [D] 10
//!  └── 70 ───┘            │
//!  └──── 120 > 100 ───────┘ stop
//!                      [A, C] 50   [D] 10   different top heading
//!
//! result: [A, B] 70, [A, C] 50, [D] 10
//! ```
//!
//! The pass is greedy and single left-to-right: a freshly merged chunk stays
//! the current candidate and may absorb the next chunk.

use tracing::debug;

use crate::budget::TokenBudget;
use crate::config::ChunkConfig;
use crate::Chunk;

/// Fuses consecutive chunks sharing an outermost heading.
#[derive(Debug, Clone, Copy)]
pub struct ChunkMerger {
    ceiling: TokenBudget,
}

impl ChunkMerger {
    /// A merger bounded by the configuration's `maxMergedTokens`.
    #[must_use]
    pub fn new(config: &ChunkConfig) -> Self {
        Self {
            ceiling: TokenBudget::for_merging(config),
        }
    }

    /// A merger bounded by an explicit token ceiling.
    #[must_use]
    pub const fn with_ceiling(max_merged_tokens: usize) -> Self {
        Self {
            ceiling: TokenBudget::new(max_merged_tokens),
        }
    }

    /// Whether `next` may be fused into `current`.
    ///
    /// Both need at least one heading reference, with the same outermost
    /// one, and their summed tokens must stay within the ceiling.
    #[must_use]
    pub fn can_merge(&self, current: &Chunk, next: &Chunk) -> bool {
        if self.ceiling.would_overflow(current.token_count, next.token_count) {
            return false;
        }
        match (current.top_heading(), next.top_heading()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }

    /// Run the merge pass. Indices are left for the caller to reassign.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use danraku::{Chunk, ChunkMerger};
    ///
    /// let mut a = Chunk::new("一つ目", 3);
    /// a.references = vec!["A".into()];
    /// let mut b = Chunk::new("二つ目", 3);
    /// b.references = vec!["A".into(), "B".into()];
    ///
    /// let merged = ChunkMerger::with_ceiling(10).merge(vec![a, b]);
    /// assert_eq!(merged.len(), 1);
    /// assert_eq!(merged[0].content, "一つ目\n\n二つ目");
    /// assert_eq!(merged[0].references, ["A", "B"]);
    /// ```
    #[must_use]
    pub fn merge(&self, chunks: Vec<Chunk>) -> Vec<Chunk> {
        let before = chunks.len();
        let mut merged: Vec<Chunk> = Vec::with_capacity(before);

        for chunk in chunks {
            if let Some(current) = merged.last_mut() {
                if self.can_merge(current, &chunk) {
                    fuse(current, chunk);
                    continue;
                }
            }
            merged.push(chunk);
        }

        debug!(before, after = merged.len(), "merge pass");
        merged
    }
}

/// Fold `next` into `current`.
fn fuse(current: &mut Chunk, next: Chunk) {
    current.content.push_str("\n\n");
    current.content.push_str(&next.content);
    current.end_char = next.end_char;
    current.token_count = current.token_count.saturating_add(next.token_count);
    current.precedence = (current.precedence + next.precedence) / 2;

    for (key, value) in next.metadata {
        current.metadata.entry(key).or_insert(value);
    }

    let mut references: Vec<String> = Vec::with_capacity(current.references.len());
    for reference in std::mem::take(&mut current.references).into_iter().chain(next.references) {
        if !references.contains(&reference) {
            references.push(reference);
        }
    }
    current.references = references;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(content: &str, tokens: usize, refs: &[&str]) -> Chunk {
        let mut chunk = Chunk::new(content, tokens);
        chunk.references = refs.iter().map(|r| (*r).to_string()).collect();
        chunk
    }

    #[test]
    fn test_merges_same_top_heading() {
        let mut a = chunk("a", 10, &["A"]);
        a.start_char = 0;
        a.end_char = 1;
        a.precedence = 80;
        let mut b = chunk("b", 20, &["A", "B"]);
        b.start_char = 3;
        b.end_char = 4;
        b.precedence = 61;

        let merged = ChunkMerger::with_ceiling(100).merge(vec![a, b]);
        assert_eq!(merged.len(), 1);

        let m = &merged[0];
        assert_eq!(m.content, "a\n\nb");
        assert_eq!(m.span(), 0..4);
        assert_eq!(m.token_count, 30);
        assert_eq!(m.precedence, 70);
        assert_eq!(m.references, ["A", "B"]);
    }

    #[test]
    fn test_greedy_absorption_stops_at_ceiling() {
        let chunks = vec![
            chunk("1", 40, &["A"]),
            chunk("2", 30, &["A", "B"]),
            chunk("3", 50, &["A", "C"]),
            chunk("4", 10, &["D"]),
        ];
        let merged = ChunkMerger::with_ceiling(100).merge(chunks);

        let tokens: Vec<_> = merged.iter().map(|c| c.token_count).collect();
        assert_eq!(tokens, [70, 50, 10]);
        assert_eq!(merged[0].references, ["A", "B"]);
    }

    #[test]
    fn test_merged_chunk_keeps_absorbing() {
        let chunks = vec![
            chunk("1", 10, &["A"]),
            chunk("2", 10, &["A"]),
            chunk("3", 10, &["A"]),
        ];
        let merged = ChunkMerger::with_ceiling(30).merge(chunks);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].content, "1\n\n2\n\n3");
    }

    #[test]
    fn test_no_references_never_merge() {
        let chunks = vec![chunk("1", 1, &[]), chunk("2", 1, &[])];
        assert_eq!(ChunkMerger::with_ceiling(100).merge(chunks).len(), 2);

        let chunks = vec![chunk("1", 1, &["A"]), chunk("2", 1, &[])];
        assert_eq!(ChunkMerger::with_ceiling(100).merge(chunks).len(), 2);
    }

    #[test]
    fn test_precedence_mean_truncates_toward_zero() {
        let mut a = chunk("a", 1, &["A"]);
        a.precedence = -20;
        let mut b = chunk("b", 1, &["A"]);
        b.precedence = -1;

        let merged = ChunkMerger::with_ceiling(10).merge(vec![a, b]);
        assert_eq!(merged[0].precedence, -10);
    }

    #[test]
    fn test_metadata_first_wins() {
        let mut a = chunk("a", 1, &["A"]);
        a.metadata.insert("title".into(), "first".into());
        let mut b = chunk("b", 1, &["A"]);
        b.metadata.insert("title".into(), "second".into());
        b.metadata.insert("category".into(), "c".into());

        let merged = ChunkMerger::with_ceiling(10).merge(vec![a, b]);
        assert_eq!(merged[0].metadata["title"], "first");
        assert_eq!(merged[0].metadata["category"], "c");
    }

    #[test]
    fn test_references_deduplicated_across_both() {
        let a = chunk("a", 1, &["概要", "概要"]);
        let b = chunk("b", 1, &["概要", "詳細", "概要"]);

        let merged = ChunkMerger::with_ceiling(10).merge(vec![a, b]);
        assert_eq!(merged[0].references, ["概要", "詳細"]);
    }

    #[test]
    fn test_token_sum_saturates() {
        let a = chunk("a", usize::MAX, &["A"]);
        let b = chunk("b", 1, &["A"]);
        let c = chunk("c", 1, &["A"]);

        let merged = ChunkMerger::with_ceiling(usize::MAX).merge(vec![a, b, c]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].token_count, usize::MAX);
    }

    #[test]
    fn test_empty_and_single() {
        let merger = ChunkMerger::with_ceiling(10);
        assert!(merger.merge(Vec::new()).is_empty());
        assert_eq!(merger.merge(vec![chunk("a", 50, &["A"])]).len(), 1);
    }

    #[test]
    fn test_from_config() {
        let config = ChunkConfig::default();
        let merger = ChunkMerger::new(&config);
        assert!(merger.can_merge(&chunk("a", 700, &["A"]), &chunk("b", 68, &["A"])));
        assert!(!merger.can_merge(&chunk("a", 700, &["A"]), &chunk("b", 69, &["A"])));
    }
}
