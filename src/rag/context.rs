//! Context retrieval for RAG responses.

use crate::chunking::Chunk;
use crate::embedding::Embedder;
use crate::error::Result;
use crate::vector_store::MemoryIndex;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Separator between chunks in the prompt context.
pub const CONTEXT_SEPARATOR: &str = "\n\n";

/// Builds per-request indexes and retrieves the chunks closest to a question.
#[derive(Clone)]
pub struct Retriever {
    embedder: Arc<dyn Embedder>,
}

impl Retriever {
    pub fn new(embedder: Arc<dyn Embedder>) -> Self {
        Self { embedder }
    }

    /// Embed every chunk and index it.
    #[instrument(skip(self, chunks), fields(chunks = chunks.len()))]
    pub async fn build(&self, chunks: Vec<Chunk>) -> Result<MemoryIndex> {
        let texts: Vec<String> = chunks.iter().map(|c| c.content.clone()).collect();
        let embeddings = self.embedder.embed_batch(&texts).await?;
        let index = MemoryIndex::from_embeddings(chunks, embeddings)?;
        debug!("Indexed {} chunks", index.len());
        Ok(index)
    }

    /// Embed the question and return the `k` most similar chunks, best first.
    #[instrument(skip(self, index, question), fields(k = k))]
    pub async fn query(&self, index: &MemoryIndex, question: &str, k: usize) -> Result<Vec<Chunk>> {
        if index.is_empty() || k == 0 {
            return Ok(Vec::new());
        }

        let query_embedding = self.embedder.embed(question).await?;
        let results = index.search(&query_embedding, k);

        if let Some(best) = results.first() {
            debug!("Retrieved {} chunks, best score {:.3}", results.len(), best.score);
        }

        Ok(results.into_iter().map(|r| r.chunk).collect())
    }
}

/// Join retrieved chunks into the prompt context.
pub fn format_context(chunks: &[Chunk]) -> String {
    chunks
        .iter()
        .map(|c| c.content.as_str())
        .collect::<Vec<_>>()
        .join(CONTEXT_SEPARATOR)
}
