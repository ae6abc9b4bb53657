//! # danraku
//!
//! Japanese-aware Markdown chunking for retrieval pipelines.
//!
//! ## The Problem
//!
//! Retrieval needs documents cut into pieces small enough to embed and large
//! enough to mean something. Generic splitters count bytes or whitespace
//! words, which goes wrong on Japanese prose:
//!
//! - there are no spaces, so a whole paragraph looks like one "word"
//! - sentences end in `。！？…`, not `.`
//! - handbooks and FAQs are deeply structured: headings, lists, tables, code
//!
//! A chunk cut from the middle of `## 出願資格` is also far less useful if it
//! no longer knows it belongs under `# 募集要項`.
//!
//! ## The Pipeline
//!
//! ```text
//! ---                          front matter → metadata on every chunk
//! title: 入学案内
//! ---
//! # 募集要項                   sections, flat, in order
//! ## 出願資格                  heading stack → references ["募集要項", "出願資格"]
//!
//! 本学の出願資格は…。          paragraphs → weighted tokens → chunks
//! ```
//!
//! 1. **Front matter**: a leading `---` block becomes a metadata map.
//! 2. **Sections**: every `#` line opens a new section.
//! 3. **Heading stack**: each section's path of ancestor titles.
//! 4. **Content chunking**: paragraphs accumulate until the token ceiling,
//!    or until a Japanese sentence end once the floor is reached.
//! 5. **Precedence**: shallow headings and long chunks score higher.
//! 6. **Merging**: optionally fuse neighbours under the same top heading.
//!
//! ## Tokens
//!
//! Token counts come from a deliberately simple, language-aware heuristic
//! ([`japanese::count_tokens`]): one token per Japanese character, one per
//! other word, with particle and structure weights. It is for sizing only
//! and does not match any model tokenizer.
//!
//! ## Quick Start
//!
//! ```rust
//! use danraku::{ChunkConfig, DocumentChunker};
//!
//! let document = "---\ntitle: \"入学案内\"\n---\n\
//!                 # 募集要項\n\n本学の募集要項を説明します。\n\n\
//!                 ## 出願資格\n\n高等学校を卒業した者。";
//!
//! let config = ChunkConfig::builder()
//!     .max_tokens(256)
//!     .min_tokens(8)
//!     .build()?;
//! let chunks = DocumentChunker::new(config).chunk(document)?;
//!
//! for chunk in &chunks {
//!     assert_eq!(chunk.metadata["title"], "入学案内");
//! }
//! assert_eq!(chunks.last().unwrap().references, ["募集要項", "出願資格"]);
//! # Ok::<(), danraku::Error>(())
//! ```
//!
//! ## Configuration from JSON
//!
//! ```rust
//! use danraku::ChunkConfig;
//!
//! let config = ChunkConfig::from_json(r#"{
//!     "maxTokens": 300,
//!     "minTokens": 50,
//!     "preserveSections": false,
//!     "japaneseConfig": { "keyParticleWeight": 1.0, "topicMarkerWeight": 1.0 }
//! }"#)?;
//! assert_eq!(config.max_tokens(), 300);
//! # Ok::<(), danraku::Error>(())
//! ```

mod budget;
mod chunk;
mod config;
mod content;
mod document;
mod error;
mod front_matter;
mod heading;
pub mod japanese;
mod merge;
mod precedence;
mod section;

pub use budget::TokenBudget;
pub use chunk::Chunk;
pub use config::{ChunkConfig, ChunkConfigBuilder, ConfigError, JapaneseConfig};
pub use content::{ContentChunker, StructureKind};
pub use document::DocumentChunker;
pub use error::{Error, Operation, Result};
pub use front_matter::{extract_front_matter, Metadata};
pub use heading::HeadingStack;
pub use merge::ChunkMerger;
pub use precedence::precedence;
pub use section::parse_heading;
