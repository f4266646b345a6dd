//! Language model access.

mod openai;

pub use openai::OpenAIChat;

use crate::error::Result;
use async_trait::async_trait;

/// A model that turns a prompt into a text completion.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompletionModel: Send + Sync {
    /// Complete `prompt` and return the model's text unmodified.
    async fn complete(&self, prompt: &str) -> Result<String>;
}
