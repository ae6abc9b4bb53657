//! Chunk importance scoring.

/// Importance score from the owning section's heading level and the
/// chunk's character length.
///
/// `100 - 20 * level + len / 100`: shallow headings and long chunks rank
/// higher. The result is not clamped and goes negative for deep, short
/// chunks; callers only compare scores.
///
/// # Examples
///
/// ```rust
/// use danraku::precedence;
///
/// assert_eq!(precedence(1, 50), 80);
/// assert_eq!(precedence(0, 250), 102);
/// assert_eq!(precedence(6, 10), -20);
/// ```
#[must_use]
#[allow(clippy::cast_possible_wrap)]
pub fn precedence(level: usize, content_len: usize) -> i64 {
    let base = 100 - (level as i64) * 20;
    base + (content_len / 100) as i64
}
