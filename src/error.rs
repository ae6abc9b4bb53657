//! Error types for danraku.

use crate::config::ConfigError;

/// The stage of the pipeline an error was raised from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Turning a document into chunks.
    Processing,
    /// Building or loading a [`ChunkConfig`](crate::ChunkConfig).
    Configuration,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Processing => f.write_str("processing"),
            Self::Configuration => f.write_str("configuration"),
        }
    }
}

/// Errors that can occur while configuring or running the chunker.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The document was empty or contained only whitespace.
    #[error("processing: empty content")]
    EmptyContent,

    /// A non-empty document produced no chunks (e.g. a body made only of separators).
    #[error("processing: no chunks generated from content")]
    NoChunks,

    /// The configuration violates one of the sizing or weight invariants.
    #[error("configuration: invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),

    /// A JSON configuration document could not be decoded.
    #[error("configuration: malformed configuration document: {0}")]
    ConfigParse(#[source] serde_json::Error),
}

impl Error {
    /// The operation label this error belongs to.
    #[must_use]
    pub fn operation(&self) -> Operation {
        match self {
            Self::EmptyContent | Self::NoChunks => Operation::Processing,
            Self::InvalidConfig(_) | Self::ConfigParse(_) => Operation::Configuration,
        }
    }
}

/// Result type for danraku operations.
pub type Result<T> = std::result::Result<T, Error>;
