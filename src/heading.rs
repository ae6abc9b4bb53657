//! Heading path tracking.
//!
//! Sections arrive flat and in document order; the stack rebuilds the path
//! of ancestor titles for each one:
//!
//! ```text
//! # A        → [A]
//! ## B       → [A, B]
//! ### C      → [A, B, C]
//! ## D       → [A, D]        truncated to level - 1, then pushed
//! # E        → [E]
//! ```

/// The ordered path of ancestor heading titles, outermost first.
///
/// # Examples
///
/// ```rust
/// use danraku::HeadingStack;
///
/// let mut stack = HeadingStack::new();
/// stack.enter(1, "募集要項");
/// stack.enter(2, "出願資格");
/// assert_eq!(stack.titles(), ["募集要項", "出願資格"]);
///
/// stack.enter(2, "試験日程");
/// assert_eq!(stack.titles(), ["募集要項", "試験日程"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeadingStack {
    titles: Vec<String>,
}

impl HeadingStack {
    /// An empty stack.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Update the stack for a section at `level` titled `title`.
    ///
    /// - level 0 (text outside any heading) resets the stack to just the
    ///   title, or to nothing when the title is empty
    /// - a level deeper than the current depth pushes the title
    /// - otherwise the stack is cut to `level - 1` entries and the title
    ///   appended, leaving exactly `level` entries
    pub fn enter(&mut self, level: usize, title: &str) {
        if level < 1 {
            self.titles.clear();
            if !title.is_empty() {
                self.titles.push(title.to_string());
            }
            return;
        }

        if level <= self.titles.len() {
            self.titles.truncate(level - 1);
        }
        self.titles.push(title.to_string());
    }

    /// The current path.
    #[must_use]
    pub fn titles(&self) -> &[String] {
        &self.titles
    }

    /// An owned copy of the current path.
    #[must_use]
    pub fn snapshot(&self) -> Vec<String> {
        self.titles.clone()
    }

    /// Number of titles on the path.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.titles.len()
    }

    /// Whether the path is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }
}
