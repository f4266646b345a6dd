//! ytqa - Ask questions about YouTube videos
//!
//! A small service that answers questions about a video from its captions,
//! using retrieval-augmented generation.
//!
//! # Overview
//!
//! For every question, ytqa:
//! - fetches the video's captions (manual English tracks first, then auto-generated)
//! - splits the transcript into overlapping chunks
//! - embeds the chunks into a throwaway in-memory index
//! - retrieves the chunks closest to the question
//! - asks a language model to answer from those chunks only
//!
//! Nothing is cached between requests.
//!
//! # Architecture
//!
//! - `config` - Settings and prompt templates, loaded once at startup
//! - `transcript` - Caption providers and transcript fetching
//! - `chunking` - Recursive character splitting
//! - `embedding` - Embedding generation
//! - `vector_store` - Per-request similarity index
//! - `llm` - Language model completions
//! - `rag` - Retrieval and answer synthesis
//! - `orchestrator` - The request pipeline
//! - `cli` - Command line and HTTP surface
//!
//! # Example
//!
//! ```rust,no_run
//! use ytqa::config::Settings;
//! use ytqa::orchestrator::Orchestrator;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let orchestrator = Orchestrator::new(&settings)?;
//!
//!     let outcome = orchestrator.ask("dQw4w9WgXcQ", "What is the song about?").await;
//!     println!("{}", serde_json::to_string(&outcome.reply())?);
//!
//!     Ok(())
//! }
//! ```

pub mod chunking;
pub mod cli;
pub mod config;
pub mod embedding;
pub mod error;
pub mod llm;
pub mod openai;
pub mod orchestrator;
pub mod rag;
pub mod transcript;
pub mod vector_store;

pub use error::{QaError, Result};
