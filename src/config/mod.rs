//! Configuration module for ytqa.
//!
//! Handles loading application settings and prompt templates once at startup.

mod prompts;
mod settings;

pub use prompts::{AnswerPrompts, Prompts};
pub use settings::{
    ChunkingSettings, EmbeddingSettings, GeneralSettings, LlmSettings, OpenAISettings,
    PromptSettings, RetrievalSettings, ServerSettings, Settings, TranscriptSettings, API_KEY_ENV,
};
