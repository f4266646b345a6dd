//! Error types for ytqa.

use thiserror::Error;

/// Library-level error type for ytqa operations.
#[derive(Error, Debug)]
pub enum QaError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Captions error: {0}")]
    Captions(String),

    #[error("Chunking error: {0}")]
    Chunking(String),

    #[error("Embedding generation failed: {0}")]
    Embedding(String),

    #[error("Completion failed: {0}")]
    Completion(String),

    #[error("OpenAI API error: {0}")]
    OpenAI(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

/// Result type alias for ytqa operations.
pub type Result<T> = std::result::Result<T, QaError>;
