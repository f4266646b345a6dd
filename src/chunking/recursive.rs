//! Recursive character splitting.
//!
//! Text is cut at the coarsest boundary that yields pieces no longer than the
//! chunk size (paragraph, line, sentence, word), falling back to a hard
//! character cut. Pieces are then merged greedily into chunks, carrying up to
//! `chunk_overlap` characters of trailing pieces into the next chunk.

use super::{Chunk, Chunker, ChunkingConfig};
use crate::error::Result;
use std::collections::VecDeque;
use tracing::debug;

/// Boundaries tried in order. The empty separator means a hard cut.
const SEPARATORS: &[&str] = &["\n\n", "\n", ". ", " ", ""];

#[derive(Debug, Clone, Copy)]
struct Span {
    start: usize,
    end: usize,
}

impl Span {
    fn len(&self) -> usize {
        self.end - self.start
    }
}

/// Splitter that prefers natural boundaries over hard cuts.
#[derive(Debug, Clone)]
pub struct RecursiveSplitter {
    config: ChunkingConfig,
    separators: Vec<Vec<char>>,
}

impl RecursiveSplitter {
    pub fn new(config: ChunkingConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            separators: SEPARATORS.iter().map(|s| s.chars().collect()).collect(),
        })
    }

    /// Cut `span` into pieces no longer than the chunk size. The pieces tile
    /// the span exactly; separators stay attached to the piece they end.
    fn split_pieces(&self, chars: &[char], span: Span, level: usize, out: &mut Vec<Span>) {
        if span.len() == 0 {
            return;
        }
        if span.len() <= self.config.chunk_size {
            out.push(span);
            return;
        }

        let level = (level..self.separators.len())
            .find(|&i| {
                let sep = &self.separators[i];
                sep.is_empty() || find_from(chars, span, sep, span.start).is_some()
            })
            .unwrap_or(self.separators.len());

        let sep = match self.separators.get(level) {
            Some(sep) if !sep.is_empty() => sep,
            _ => {
                self.hard_cut(span, out);
                return;
            }
        };

        let mut piece_start = span.start;
        let mut cursor = span.start;
        while let Some(pos) = find_from(chars, span, sep, cursor) {
            let piece_end = pos + sep.len();
            self.split_pieces(chars, Span { start: piece_start, end: piece_end }, level + 1, out);
            piece_start = piece_end;
            cursor = piece_end;
        }
        self.split_pieces(chars, Span { start: piece_start, end: span.end }, level + 1, out);
    }

    fn hard_cut(&self, span: Span, out: &mut Vec<Span>) {
        let mut start = span.start;
        while start < span.end {
            let end = (start + self.config.chunk_size).min(span.end);
            out.push(Span { start, end });
            start = end;
        }
    }

    /// Merge contiguous pieces into chunk spans with overlap.
    fn merge(&self, pieces: &[Span]) -> Vec<Span> {
        let size = self.config.chunk_size;
        let overlap = self.config.chunk_overlap;

        let mut merged = Vec::new();
        let mut window: VecDeque<Span> = VecDeque::new();
        let mut total = 0;

        for &piece in pieces {
            if total + piece.len() > size && !window.is_empty() {
                if let (Some(first), Some(last)) = (window.front(), window.back()) {
                    merged.push(Span { start: first.start, end: last.end });
                }
                while total > overlap || (total > 0 && total + piece.len() > size) {
                    match window.pop_front() {
                        Some(dropped) => total -= dropped.len(),
                        None => break,
                    }
                }
            }
            window.push_back(piece);
            total += piece.len();
        }

        if let (Some(first), Some(last)) = (window.front(), window.back()) {
            merged.push(Span { start: first.start, end: last.end });
        }
        merged
    }
}

impl Chunker for RecursiveSplitter {
    fn split(&self, text: &str) -> Vec<Chunk> {
        let chars: Vec<char> = text.chars().collect();
        if chars.is_empty() {
            return Vec::new();
        }

        let mut pieces = Vec::new();
        self.split_pieces(&chars, Span { start: 0, end: chars.len() }, 0, &mut pieces);

        let chunks: Vec<Chunk> = self
            .merge(&pieces)
            .into_iter()
            .enumerate()
            .map(|(order, span)| {
                let content: String = chars[span.start..span.end].iter().collect();
                Chunk::new(content, order, span.start, span.end)
            })
            .collect();

        debug!(
            "Split {} chars into {} chunks ({} pieces)",
            chars.len(),
            chunks.len(),
            pieces.len()
        );
        chunks
    }
}

/// Position of the first occurrence of `sep` in `span` at or after `from`.
fn find_from(chars: &[char], span: Span, sep: &[char], from: usize) -> Option<usize> {
    if sep.is_empty() || span.end < sep.len() {
        return None;
    }
    (from..=span.end - sep.len())
        .take_while(|&i| i + sep.len() <= span.end)
        .find(|&i| chars[i..i + sep.len()] == *sep)
}
