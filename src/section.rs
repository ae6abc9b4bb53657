//! Markdown section parsing.
//!
//! Sections are flat: a `##` section following a `#` section is its own
//! entry, and the nesting is recovered later by the heading stack.
//!
//! ```text
//! intro line          ┐ level 0 (implicit, only if non-empty)
//! # A                 ┐ level 1 "A"
//! text a              ┘
//! ## B                ┐ level 2 "B"
//! text b              ┘
//! ```

/// A run of lines headed by one heading line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Section {
    /// Heading text with the `#` markers removed.
    pub title: String,
    /// Number of leading `#`; 0 for text before the first heading.
    pub level: usize,
    /// The section's lines, heading line included, each ending in `\n`.
    pub content: String,
}

impl Section {
    fn new(title: impl Into<String>, level: usize) -> Self {
        Self {
            title: title.into(),
            level,
            content: String::new(),
        }
    }

    /// Whether no lines were collected.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// Parse a heading line into its level and title.
///
/// Any line starting with `#` is a heading; the level is the number of
/// leading `#` and the title is the rest with leading `#`/spaces and
/// surrounding whitespace removed.
///
/// # Examples
///
/// ```rust
/// use danraku::parse_heading;
///
/// assert_eq!(parse_heading("## 出願資格"), Some((2, "出願資格")));
/// assert_eq!(parse_heading("#タグ"), Some((1, "タグ")));
/// assert_eq!(parse_heading("本文"), None);
/// ```
#[must_use]
pub fn parse_heading(line: &str) -> Option<(usize, &str)> {
    if !line.starts_with('#') {
        return None;
    }
    let level = line.chars().take_while(|&c| c == '#').count();
    let title = line.trim_start_matches(['#', ' ']).trim();
    Some((level, title))
}

/// Split a body into sections in document order.
///
/// Text before the first heading becomes a level-0 section titled
/// `document_title`.
pub(crate) fn parse_sections(body: &str, document_title: &str) -> Vec<Section> {
    let mut sections = Vec::new();
    let mut current = Section::new(document_title, 0);

    for line in body.split('\n') {
        if let Some((level, title)) = parse_heading(line) {
            let previous = std::mem::replace(&mut current, Section::new(title, level));
            if !previous.is_empty() {
                sections.push(previous);
            }
        }
        current.content.push_str(line);
        current.content.push('\n');
    }

    if !current.is_empty() {
        sections.push(current);
    }

    sections
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_levels() {
        assert_eq!(parse_heading("# A"), Some((1, "A")));
        assert_eq!(parse_heading("### C  "), Some((3, "C")));
        assert_eq!(parse_heading("#"), Some((1, "")));
        // only leading markers count towards the level
        assert_eq!(parse_heading("# C# と F#"), Some((1, "C# と F#")));
        assert_eq!(parse_heading(" # indented"), None);
    }

    #[test]
    fn test_sections_in_order() {
        let body = "# A\n\nHello.\n\n## B\n\nFoo.";
        let sections = parse_sections(body, "");

        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].title, "A");
        assert_eq!(sections[0].level, 1);
        assert_eq!(sections[0].content, "# A\n\nHello.\n\n");
        assert_eq!(sections[1].title, "B");
        assert_eq!(sections[1].level, 2);
        assert_eq!(sections[1].content, "## B\n\nFoo.\n");
    }

    #[test]
    fn test_leading_text_is_level_zero() {
        let sections = parse_sections("前書き\n# A\n本文", "案内");

        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].level, 0);
        assert_eq!(sections[0].title, "案内");
        assert_eq!(sections[0].content, "前書き\n");
        assert_eq!(sections[1].title, "A");
    }

    #[test]
    fn test_no_headings_single_section() {
        let sections = parse_sections("one\n\ntwo", "T");
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].level, 0);
        assert_eq!(sections[0].title, "T");
        assert_eq!(sections[0].content, "one\n\ntwo\n");
    }

    #[test]
    fn test_consecutive_headings() {
        let sections = parse_sections("# A\n## B\n### C", "");
        let titles: Vec<_> = sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, ["A", "B", "C"]);
        assert!(sections.iter().all(|s| !s.is_empty()));
    }

    #[test]
    fn test_empty_body() {
        // a lone "\n" is still collected; the chunker trims it away
        assert_eq!(parse_sections("", "").len(), 1);
    }
}
