//! In-memory vector index.

use super::{cosine_similarity, SearchResult};
use crate::chunking::Chunk;
use crate::error::{QaError, Result};

/// Chunks paired with their embeddings, in transcript order.
#[derive(Debug, Clone, Default)]
pub struct MemoryIndex {
    entries: Vec<(Chunk, Vec<f32>)>,
}

impl MemoryIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pair chunks with embeddings. Both must have the same length.
    pub fn from_embeddings(chunks: Vec<Chunk>, embeddings: Vec<Vec<f32>>) -> Result<Self> {
        if chunks.len() != embeddings.len() {
            return Err(QaError::Embedding(format!(
                "Got {} embeddings for {} chunks",
                embeddings.len(),
                chunks.len()
            )));
        }
        let mut index = Self::new();
        for (chunk, embedding) in chunks.into_iter().zip(embeddings) {
            index.insert(chunk, embedding);
        }
        Ok(index)
    }

    pub fn insert(&mut self, chunk: Chunk, embedding: Vec<f32>) {
        self.entries.push((chunk, embedding));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Return the `limit` most similar chunks, best first.
    ///
    /// Equal scores keep insertion order, so the earlier chunk wins a tie.
    pub fn search(&self, query_embedding: &[f32], limit: usize) -> Vec<SearchResult> {
        let mut results: Vec<SearchResult> = self
            .entries
            .iter()
            .map(|(chunk, embedding)| SearchResult {
                chunk: chunk.clone(),
                score: cosine_similarity(query_embedding, embedding),
            })
            .collect();

        // sort_by is stable
        results.sort_by(|a, b| b.score.total_cmp(&a.score));
        results.truncate(limit);
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(order: usize, content: &str) -> Chunk {
        Chunk::new(content.to_string(), order, order * 10, order * 10 + content.len())
    }

    #[test]
    fn test_search_orders_by_score() {
        let index = MemoryIndex::from_embeddings(
            vec![chunk(0, "Hello world"), chunk(1, "Goodbye world")],
            vec![vec![0.0, 1.0, 0.0], vec![1.0, 0.0, 0.0]],
        )
        .unwrap();

        let results = index.search(&[1.0, 0.0, 0.0], 10);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].chunk.content, "Goodbye world");
        assert!(results[0].score > results[1].score);
    }

    #[test]
    fn test_ties_keep_transcript_order() {
        let mut index = MemoryIndex::new();
        for i in 0..5 {
            index.insert(chunk(i, &format!("chunk {}", i)), vec![1.0, 1.0]);
        }

        let results = index.search(&[1.0, 1.0], 3);
        let orders: Vec<usize> = results.iter().map(|r| r.chunk.order).collect();
        assert_eq!(orders, vec![0, 1, 2]);
    }

    #[test]
    fn test_returns_exactly_k_distinct() {
        let mut index = MemoryIndex::new();
        for i in 0..8 {
            index.insert(chunk(i, "x"), vec![i as f32, 1.0]);
        }

        for k in 0..=8 {
            let results = index.search(&[1.0, 0.5], k);
            assert_eq!(results.len(), k);
            let mut orders: Vec<usize> = results.iter().map(|r| r.chunk.order).collect();
            orders.sort();
            orders.dedup();
            assert_eq!(orders.len(), k);
        }

        assert_eq!(index.search(&[1.0, 0.5], 20).len(), 8);
    }

    #[test]
    fn test_mismatched_lengths_rejected() {
        let err = MemoryIndex::from_embeddings(vec![chunk(0, "a")], vec![]).unwrap_err();
        assert!(matches!(err, QaError::Embedding(_)));
    }
}
