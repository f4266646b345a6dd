//! RAG (Retrieval-Augmented Generation) over a single video's transcript.
//!
//! [`Retriever`] embeds transcript chunks into a per-request index and picks
//! the chunks closest to a question; [`AnswerSynthesizer`] turns those chunks
//! and the question into a prompt for the language model.

pub mod context;
mod response;

pub use context::{format_context, Retriever};
pub use response::AnswerSynthesizer;
