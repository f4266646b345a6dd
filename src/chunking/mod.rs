//! Splitting transcripts into overlapping chunks for embedding and retrieval.

mod recursive;

pub use recursive::RecursiveSplitter;

use crate::config::ChunkingSettings;
use crate::error::{QaError, Result};
use serde::{Deserialize, Serialize};

/// A contiguous piece of a transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// Text content of this chunk.
    pub content: String,
    /// Position of this chunk in the transcript.
    pub order: usize,
    /// Character offset of the first character in the source text.
    pub start_offset: usize,
    /// Character offset one past the last character.
    pub end_offset: usize,
}

impl Chunk {
    pub fn new(content: String, order: usize, start_offset: usize, end_offset: usize) -> Self {
        Self {
            content,
            order,
            start_offset,
            end_offset,
        }
    }

    /// Length in characters.
    pub fn len(&self) -> usize {
        self.end_offset - self.start_offset
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Configuration for chunking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkingConfig {
    /// Maximum chunk length in characters.
    pub chunk_size: usize,
    /// Characters shared with the previous chunk.
    pub chunk_overlap: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: 1000,
            chunk_overlap: 200,
        }
    }
}

impl ChunkingConfig {
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(QaError::Chunking("chunk_size must be greater than 0".to_string()));
        }
        if self.chunk_overlap >= self.chunk_size {
            return Err(QaError::Chunking(format!(
                "chunk_overlap ({}) must be smaller than chunk_size ({})",
                self.chunk_overlap, self.chunk_size
            )));
        }
        Ok(())
    }
}

impl From<&ChunkingSettings> for ChunkingConfig {
    fn from(settings: &ChunkingSettings) -> Self {
        Self {
            chunk_size: settings.chunk_size,
            chunk_overlap: settings.chunk_overlap,
        }
    }
}

/// Trait for text splitting implementations.
pub trait Chunker: Send + Sync {
    /// Split text into chunks. Empty text yields no chunks.
    fn split(&self, text: &str) -> Vec<Chunk>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_validation() {
        assert!(ChunkingConfig::default().validate().is_ok());
        assert!(ChunkingConfig { chunk_size: 0, chunk_overlap: 0 }.validate().is_err());
        assert!(ChunkingConfig { chunk_size: 10, chunk_overlap: 10 }.validate().is_err());
        assert!(ChunkingConfig { chunk_size: 10, chunk_overlap: 0 }.validate().is_ok());
    }

    #[test]
    fn test_from_settings() {
        let settings = ChunkingSettings {
            chunk_size: 500,
            chunk_overlap: 50,
        };
        let config = ChunkingConfig::from(&settings);
        assert_eq!(config.chunk_size, 500);
        assert_eq!(config.chunk_overlap, 50);
    }
}
