//! Chunking configuration.
//!
//! ## Sizes Are Weighted Tokens
//!
//! Every size here is measured in the heuristic tokens produced by
//! [`count_tokens`](crate::japanese::count_tokens), after the structural
//! weights have been applied:
//!
//! ```text
//! "- りんごとみかん"   base 7  × listItemWeight 0.8  → 5
//! "```\nfn main()"     base 4  × codeBlockWeight 1.2 → 4
//! "a | b\n--+--"       base 5  × tableWeight 1.5     → 7
//! ```
//!
//! ## Validity
//!
//! A [`ChunkConfig`] can only be obtained through [`ChunkConfig::default`],
//! [`ChunkConfigBuilder::build`] or [`ChunkConfig::from_json`], and all of
//! them validate. The pipeline therefore never sees an out-of-range value,
//! and nothing is clamped behind the caller's back:
//!
//! - `maxTokens >= minTokens`
//! - `overlapTokens < maxTokens`
//! - `maxMergedTokens >= maxTokens`
//! - every weight is strictly positive
//! - the paragraph separator is non-empty

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Japanese-specific tunables.
///
/// Presence of this value on a [`ChunkConfig`] also switches on the
/// sentence-end split heuristic of the content chunker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JapaneseConfig {
    /// Glyphs that close a sentence.
    pub sentence_endings: Vec<String>,
    /// Bracket pairs, each written as a two-glyph string such as `"「」"`.
    pub brackets: Vec<String>,
    /// Multiplier applied when a word is exactly a key particle.
    pub key_particle_weight: f64,
    /// Multiplier applied when a word is exactly a topic marker.
    pub topic_marker_weight: f64,
}

impl Default for JapaneseConfig {
    fn default() -> Self {
        Self {
            sentence_endings: ["。", "！", "？", "…"].map(String::from).to_vec(),
            brackets: ["（）", "「」", "『』", "［］"].map(String::from).to_vec(),
            key_particle_weight: 1.2,
            topic_marker_weight: 1.5,
        }
    }
}

impl JapaneseConfig {
    /// Whether `c` is one of the configured sentence-ending glyphs.
    #[must_use]
    pub fn is_sentence_end(&self, c: char) -> bool {
        let mut buf = [0u8; 4];
        let glyph: &str = c.encode_utf8(&mut buf);
        self.sentence_endings.iter().any(|e| e == glyph)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct Settings {
    max_tokens: usize,
    min_tokens: usize,
    overlap_tokens: usize,
    paragraph_separator: String,
    list_item_weight: f64,
    code_block_weight: f64,
    table_weight: f64,
    merge_threshold: f64,
    max_merged_tokens: usize,
    preserve_sections: bool,
    japanese_config: Option<JapaneseConfig>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_tokens: 512,
            min_tokens: 100,
            overlap_tokens: 50,
            paragraph_separator: "\n\n".to_string(),
            list_item_weight: 0.8,
            code_block_weight: 1.2,
            table_weight: 1.5,
            merge_threshold: 0.7,
            max_merged_tokens: 768,
            preserve_sections: true,
            japanese_config: Some(JapaneseConfig::default()),
        }
    }
}

impl Settings {
    fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.paragraph_separator.is_empty() {
            return Err(ConfigError::EmptySeparator);
        }
        if self.max_tokens < self.min_tokens {
            return Err(ConfigError::MaxLessThanMin {
                min: self.min_tokens,
                max: self.max_tokens,
            });
        }
        if self.overlap_tokens >= self.max_tokens {
            return Err(ConfigError::OverlapNotLessThanMax {
                overlap: self.overlap_tokens,
                max: self.max_tokens,
            });
        }
        if self.max_merged_tokens < self.max_tokens {
            return Err(ConfigError::MergedLessThanMax {
                max: self.max_tokens,
                max_merged: self.max_merged_tokens,
            });
        }

        let mut weights = vec![
            ("listItemWeight", self.list_item_weight),
            ("codeBlockWeight", self.code_block_weight),
            ("tableWeight", self.table_weight),
        ];
        if let Some(jp) = &self.japanese_config {
            weights.push(("keyParticleWeight", jp.key_particle_weight));
            weights.push(("topicMarkerWeight", jp.topic_marker_weight));
        }
        for (name, value) in weights {
            if value.is_nan() || value <= 0.0 {
                return Err(ConfigError::NonPositiveWeight { name, value });
            }
        }

        Ok(())
    }
}

/// Validated, immutable chunking configuration.
///
/// # Examples
///
/// ```rust
/// use danraku::ChunkConfig;
///
/// let config = ChunkConfig::builder()
///     .max_tokens(256)
///     .min_tokens(32)
///     .preserve_sections(false)
///     .build()
///     .unwrap();
///
/// assert_eq!(config.max_tokens(), 256);
/// assert!(!config.preserve_sections());
///
/// // Invalid combinations are rejected at build time.
/// assert!(ChunkConfig::builder().max_tokens(10).min_tokens(20).build().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ChunkConfigBuilder", into = "ChunkConfigBuilder")]
pub struct ChunkConfig {
    settings: Settings,
}

impl Default for ChunkConfig {
    /// A fresh configuration with the recommended defaults.
    fn default() -> Self {
        Self {
            settings: Settings::default(),
        }
    }
}

impl ChunkConfig {
    /// Start a builder seeded with the defaults.
    #[must_use]
    pub fn builder() -> ChunkConfigBuilder {
        ChunkConfigBuilder::new()
    }

    /// Start a builder seeded with this configuration's values.
    #[must_use]
    pub fn to_builder(&self) -> ChunkConfigBuilder {
        ChunkConfigBuilder {
            settings: self.settings.clone(),
        }
    }

    /// Load a configuration from a JSON document.
    ///
    /// Field names are camelCase (`maxTokens`, `japaneseConfig`, ...); missing
    /// fields take their defaults and `"japaneseConfig": null` disables the
    /// Japanese heuristics.
    ///
    /// # Errors
    ///
    /// [`Error::ConfigParse`] if the JSON is malformed, or
    /// [`Error::InvalidConfig`] if the values fail validation.
    pub fn from_json(json: &str) -> Result<Self> {
        let builder: ChunkConfigBuilder = serde_json::from_str(json).map_err(Error::ConfigParse)?;
        builder.build()
    }

    /// Ceiling on a chunk's weighted token count.
    #[must_use]
    pub fn max_tokens(&self) -> usize {
        self.settings.max_tokens
    }

    /// Floor a chunk must reach before a sentence end may close it.
    #[must_use]
    pub fn min_tokens(&self) -> usize {
        self.settings.min_tokens
    }

    /// Requested overlap between chunks.
    ///
    /// Validated but not consulted by the splitting or merging passes.
    #[must_use]
    pub fn overlap_tokens(&self) -> usize {
        self.settings.overlap_tokens
    }

    /// Separator used to split section content into paragraphs.
    #[must_use]
    pub fn paragraph_separator(&self) -> &str {
        &self.settings.paragraph_separator
    }

    /// Weight for paragraphs starting with `- ` or `* `.
    #[must_use]
    pub fn list_item_weight(&self) -> f64 {
        self.settings.list_item_weight
    }

    /// Weight for paragraphs starting with a code fence.
    #[must_use]
    pub fn code_block_weight(&self) -> f64 {
        self.settings.code_block_weight
    }

    /// Weight for table-like paragraphs.
    #[must_use]
    pub fn table_weight(&self) -> f64 {
        self.settings.table_weight
    }

    /// Similarity threshold for merging. Carried for interface compatibility.
    #[must_use]
    pub fn merge_threshold(&self) -> f64 {
        self.settings.merge_threshold
    }

    /// Ceiling on the token count of a merged chunk.
    #[must_use]
    pub fn max_merged_tokens(&self) -> usize {
        self.settings.max_merged_tokens
    }

    /// When true the merge pass is skipped.
    #[must_use]
    pub fn preserve_sections(&self) -> bool {
        self.settings.preserve_sections
    }

    /// Japanese-specific settings, if enabled.
    #[must_use]
    pub fn japanese(&self) -> Option<&JapaneseConfig> {
        self.settings.japanese_config.as_ref()
    }
}

/// Builder for [`ChunkConfig`].
///
/// Each builder is an independent value; cloning one and changing the clone
/// leaves the original untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChunkConfigBuilder {
    settings: Settings,
}

impl ChunkConfigBuilder {
    /// A builder holding the default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum tokens per chunk.
    #[must_use]
    pub fn max_tokens(mut self, max_tokens: usize) -> Self {
        self.settings.max_tokens = max_tokens;
        self
    }

    /// Set the minimum tokens before a sentence end may close a chunk.
    #[must_use]
    pub fn min_tokens(mut self, min_tokens: usize) -> Self {
        self.settings.min_tokens = min_tokens;
        self
    }

    /// Set the overlap tokens.
    #[must_use]
    pub fn overlap_tokens(mut self, overlap_tokens: usize) -> Self {
        self.settings.overlap_tokens = overlap_tokens;
        self
    }

    /// Set the paragraph separator.
    #[must_use]
    pub fn paragraph_separator(mut self, separator: impl Into<String>) -> Self {
        self.settings.paragraph_separator = separator.into();
        self
    }

    /// Set the list item weight.
    #[must_use]
    pub fn list_item_weight(mut self, weight: f64) -> Self {
        self.settings.list_item_weight = weight;
        self
    }

    /// Set the code block weight.
    #[must_use]
    pub fn code_block_weight(mut self, weight: f64) -> Self {
        self.settings.code_block_weight = weight;
        self
    }

    /// Set the table weight.
    #[must_use]
    pub fn table_weight(mut self, weight: f64) -> Self {
        self.settings.table_weight = weight;
        self
    }

    /// Set the merge similarity threshold.
    #[must_use]
    pub fn merge_threshold(mut self, threshold: f64) -> Self {
        self.settings.merge_threshold = threshold;
        self
    }

    /// Set the maximum tokens of a merged chunk.
    #[must_use]
    pub fn max_merged_tokens(mut self, max_merged_tokens: usize) -> Self {
        self.settings.max_merged_tokens = max_merged_tokens;
        self
    }

    /// Keep section boundaries (skip the merge pass).
    #[must_use]
    pub fn preserve_sections(mut self, preserve: bool) -> Self {
        self.settings.preserve_sections = preserve;
        self
    }

    /// Set the Japanese-specific settings.
    #[must_use]
    pub fn japanese(mut self, japanese: JapaneseConfig) -> Self {
        self.settings.japanese_config = Some(japanese);
        self
    }

    /// Disable the Japanese-specific heuristics.
    #[must_use]
    pub fn no_japanese(mut self) -> Self {
        self.settings.japanese_config = None;
        self
    }

    /// Validate and produce the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] naming the first violated invariant.
    pub fn build(self) -> Result<ChunkConfig> {
        self.settings.validate()?;
        Ok(ChunkConfig {
            settings: self.settings,
        })
    }
}

impl TryFrom<ChunkConfigBuilder> for ChunkConfig {
    type Error = Error;

    fn try_from(builder: ChunkConfigBuilder) -> Result<Self> {
        builder.build()
    }
}

impl From<ChunkConfig> for ChunkConfigBuilder {
    fn from(config: ChunkConfig) -> Self {
        Self {
            settings: config.settings,
        }
    }
}

/// Error when validating a chunking configuration.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// `maxTokens` must be >= `minTokens`.
    #[error("maxTokens ({max}) must be >= minTokens ({min})")]
    MaxLessThanMin {
        /// The minimum that was too large.
        min: usize,
        /// The maximum.
        max: usize,
    },

    /// `overlapTokens` must be < `maxTokens`.
    #[error("overlapTokens ({overlap}) must be < maxTokens ({max})")]
    OverlapNotLessThanMax {
        /// The overlap.
        overlap: usize,
        /// The maximum.
        max: usize,
    },

    /// `maxMergedTokens` must be >= `maxTokens`.
    #[error("maxMergedTokens ({max_merged}) must be >= maxTokens ({max})")]
    MergedLessThanMax {
        /// The maximum per chunk.
        max: usize,
        /// The merge ceiling that was too small.
        max_merged: usize,
    },

    /// A structural or Japanese weight was zero, negative or NaN.
    #[error("{name} must be positive, got {value}")]
    NonPositiveWeight {
        /// Field name of the weight.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// The paragraph separator was empty.
    #[error("paragraphSeparator must not be empty")]
    EmptySeparator,
}
