//! The document pipeline.
//!
//! ```text
//! raw text
//!   → front matter         (metadata, body)
//!   → sections             flat, in document order
//!   → per section:         heading stack update, content chunking,
//!                          offsets, references, precedence, metadata
//!   → merge pass           unless preserveSections
//!   → indices              0..n
//! ```

use tracing::debug;

use crate::config::ChunkConfig;
use crate::content::ContentChunker;
use crate::front_matter::{extract_front_matter, Metadata};
use crate::heading::HeadingStack;
use crate::merge::ChunkMerger;
use crate::precedence::precedence;
use crate::section::{parse_sections, Section};
use crate::{Chunk, Error, Result};

/// Front-matter key whose value titles text that precedes the first heading.
const TITLE_KEY: &str = "title";

/// Splits whole documents into ordered, enriched chunks.
///
/// The chunker is a pure function of its configuration and input: it keeps
/// no state between calls and can be shared across threads.
///
/// # Examples
///
/// ```rust
/// use danraku::{ChunkConfig, DocumentChunker};
///
/// let config = ChunkConfig::builder().min_tokens(1).build().unwrap();
/// let chunker = DocumentChunker::new(config);
///
/// let chunks = chunker
///     .chunk("# A\n\nHello world.\n\n## B\n\nFoo bar baz.")
///     .unwrap();
///
/// assert_eq!(chunks[0].references, ["A"]);
/// assert_eq!(chunks.last().unwrap().references, ["A", "B"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct DocumentChunker {
    config: ChunkConfig,
}

impl DocumentChunker {
    /// Create a chunker with a validated configuration.
    #[must_use]
    pub fn new(config: ChunkConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &ChunkConfig {
        &self.config
    }

    /// Replace the active configuration.
    pub fn configure(&mut self, config: ChunkConfig) {
        self.config = config;
    }

    /// Chunk a document.
    ///
    /// # Errors
    ///
    /// - [`Error::EmptyContent`] if `text` is empty or whitespace-only
    /// - [`Error::NoChunks`] if the body yields no chunks
    pub fn chunk(&self, text: &str) -> Result<Vec<Chunk>> {
        if text.trim().is_empty() {
            return Err(Error::EmptyContent);
        }

        let (metadata, body) = extract_front_matter(text);
        let title = metadata.get(TITLE_KEY).map_or("", String::as_str);
        let sections = parse_sections(body, title);
        debug!(
            metadata_keys = metadata.len(),
            sections = sections.len(),
            "parsed document"
        );

        let mut chunks = self.chunk_sections(&sections, &metadata);
        if chunks.is_empty() {
            return Err(Error::NoChunks);
        }

        if !self.config.preserve_sections() {
            chunks = ChunkMerger::new(&self.config).merge(chunks);
        }

        for (index, chunk) in chunks.iter_mut().enumerate() {
            chunk.index = index;
        }

        debug!(chunks = chunks.len(), "document chunked");
        Ok(chunks)
    }

    /// Chunk each section and stamp positions and context onto the results.
    ///
    /// Within a section each chunk starts one character past the previous
    /// chunk's end; the next section starts a separator's length past the
    /// last chunk of the previous one.
    fn chunk_sections(&self, sections: &[Section], metadata: &Metadata) -> Vec<Chunk> {
        let content_chunker = ContentChunker::new(&self.config);
        let separator_len = self.config.paragraph_separator().chars().count();

        let mut headings = HeadingStack::new();
        let mut chunks: Vec<Chunk> = Vec::new();
        let mut section_start = 0;

        for section in sections {
            headings.enter(section.level, &section.title);

            let mut next_start = section_start;
            for mut chunk in content_chunker.chunk(&section.content) {
                let len = chunk.char_len();
                chunk.start_char = next_start;
                chunk.end_char = next_start + len;
                chunk.references = headings.snapshot();
                chunk.precedence = precedence(section.level, len);
                chunk.metadata = metadata.clone();

                next_start = chunk.end_char + 1;
                chunks.push(chunk);
            }

            if let Some(last) = chunks.last() {
                section_start = last.end_char + separator_len;
            }
        }

        chunks
    }
}
