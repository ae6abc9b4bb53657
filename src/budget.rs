//! Token budget for a chunk under construction.
//!
//! ## Two Pressures
//!
//! A chunk is pulled in two directions while paragraphs are accumulated:
//!
//! - the ceiling: adding the next paragraph must not push it past `max`
//! - coherence: a finished Japanese sentence is a good place to stop, but
//!   only once the chunk holds at least `min` tokens
//!
//! ```text
//! min = 100, max = 512
//!
//! [para 60 tokens, ends "。"]     60 < min   → keep going
//! [para 80 tokens, ends "。"]    140 >= min  → close at the sentence end
//! [para 300][para 250]           550 > max  → close before para 250
//! ```
//!
//! The same type bounds the merge pass, with `max` set to the merge ceiling.

use crate::config::ChunkConfig;

/// Lower and upper token bounds.
///
/// # Examples
///
/// ```rust
/// use danraku::{ChunkConfig, TokenBudget};
///
/// let config = ChunkConfig::default();
/// let budget = TokenBudget::for_chunks(&config);
/// assert_eq!((budget.min(), budget.max()), (100, 512));
/// assert!(budget.would_overflow(500, 13));
/// assert!(!budget.would_overflow(500, 12));
/// assert!(budget.reached_floor(100));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenBudget {
    min: usize,
    max: usize,
}

impl TokenBudget {
    /// A budget with only a ceiling.
    #[must_use]
    pub const fn new(max: usize) -> Self {
        Self { min: 0, max }
    }

    /// The chunk budget described by a configuration.
    #[must_use]
    pub fn for_chunks(config: &ChunkConfig) -> Self {
        Self {
            min: config.min_tokens(),
            max: config.max_tokens(),
        }
    }

    /// The merge ceiling described by a configuration.
    #[must_use]
    pub fn for_merging(config: &ChunkConfig) -> Self {
        Self::new(config.max_merged_tokens())
    }

    /// The floor.
    #[must_use]
    pub const fn min(&self) -> usize {
        self.min
    }

    /// The ceiling.
    #[must_use]
    pub const fn max(&self) -> usize {
        self.max
    }

    /// Whether adding `additional` tokens to `current` would pass the ceiling.
    #[must_use]
    pub fn would_overflow(&self, current: usize, additional: usize) -> bool {
        current.saturating_add(additional) > self.max
    }

    /// Whether `current` has reached the floor.
    #[must_use]
    pub fn reached_floor(&self, current: usize) -> bool {
        current >= self.min
    }
}
