//! The Chunk type: a piece of a document with its position and context.

use serde::{Deserialize, Serialize};

use crate::front_matter::Metadata;

/// A self-contained unit of document text, ready to embed and index.
///
/// ## Character Offsets
///
/// `start_char` and `end_char` count characters (Unicode scalar values), not
/// bytes, and are measured against the body that remains after the front
/// matter is removed. `end_char` is always `start_char` plus the character
/// length of `content`:
///
/// ```rust
/// use danraku::Chunk;
///
/// let mut chunk = Chunk::new("日本語の本文", 3);
/// chunk.start_char = 10;
/// chunk.end_char = chunk.start_char + chunk.char_len();
/// assert_eq!(chunk.span(), 10..16);
/// ```
///
/// Since paragraphs are trimmed and re-joined, offsets locate a chunk
/// within the sequence rather than slicing the body byte-for-byte.
///
/// ## Serialized Form
///
/// Fields use camelCase; empty `metadata` and `references` are omitted:
///
/// ```text
/// {"index":0,"content":"…","startChar":0,"endChar":42,"tokenCount":37,
///  "metadata":{"title":"…"},"precedence":80,"references":["A","B"]}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chunk {
    /// Zero-based position in the final sequence.
    pub index: usize,
    /// The chunk text, trimmed.
    pub content: String,
    /// Character offset where this chunk starts.
    pub start_char: usize,
    /// Character offset where this chunk ends (exclusive).
    pub end_char: usize,
    /// Weighted heuristic token count.
    pub token_count: usize,
    /// Front-matter metadata of the source document.
    #[serde(default, skip_serializing_if = "Metadata::is_empty")]
    pub metadata: Metadata,
    /// Importance score; higher is more important. May be negative.
    pub precedence: i64,
    /// Ancestor heading titles, outermost first.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub references: Vec<String>,
}

impl Chunk {
    /// Create a chunk holding only its content and token count.
    ///
    /// Position, references, precedence and metadata are filled in later by
    /// the document pipeline.
    #[must_use]
    pub fn new(content: impl Into<String>, token_count: usize) -> Self {
        Self {
            index: 0,
            content: content.into(),
            start_char: 0,
            end_char: 0,
            token_count,
            metadata: Metadata::new(),
            precedence: 0,
            references: Vec::new(),
        }
    }

    /// The length of the content in characters.
    #[must_use]
    pub fn char_len(&self) -> usize {
        self.content.chars().count()
    }

    /// Whether the content is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// The character span of this chunk.
    #[must_use]
    pub fn span(&self) -> std::ops::Range<usize> {
        self.start_char..self.end_char
    }

    /// The outermost heading this chunk sits under, if any.
    #[must_use]
    pub fn top_heading(&self) -> Option<&str> {
        self.references.first().map(String::as_str)
    }
}

impl std::fmt::Display for Chunk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Chunk {{ index: {}, span: {}..{}, tokens: {}, precedence: {} }}",
            self.index, self.start_char, self.end_char, self.token_count, self.precedence
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_len_counts_runes() {
        let chunk = Chunk::new("日本語abc", 6);
        assert_eq!(chunk.char_len(), 6);
        assert_eq!(chunk.content.len(), 12);
    }

    #[test]
    fn test_top_heading() {
        let mut chunk = Chunk::new("x", 1);
        assert_eq!(chunk.top_heading(), None);

        chunk.references = vec!["A".into(), "B".into()];
        assert_eq!(chunk.top_heading(), Some("A"));
    }

    #[test]
    fn test_serialization_omits_empty_fields() {
        let chunk = Chunk::new("本文", 2);
        let json = serde_json::to_value(&chunk).unwrap();

        assert_eq!(json["content"], "本文");
        assert_eq!(json["tokenCount"], 2);
        assert_eq!(json["startChar"], 0);
        assert!(json.get("metadata").is_none());
        assert!(json.get("references").is_none());
    }

    #[test]
    fn test_serialization_includes_context() {
        let mut chunk = Chunk::new("本文", 2);
        chunk.metadata.insert("title".into(), "T".into());
        chunk.references.push("A".into());
        chunk.precedence = -20;

        let json = serde_json::to_string(&chunk).unwrap();
        assert!(json.contains(r#""metadata":{"title":"T"}"#), "{json}");
        assert!(json.contains(r#""references":["A"]"#), "{json}");
        assert!(json.contains(r#""precedence":-20"#), "{json}");

        let back: Chunk = serde_json::from_str(&json).unwrap();
        assert_eq!(back, chunk);
    }

    #[test]
    fn test_display() {
        let chunk = Chunk::new("x", 1);
        assert_eq!(
            chunk.to_string(),
            "Chunk { index: 0, span: 0..0, tokens: 1, precedence: 0 }"
        );
    }
}
