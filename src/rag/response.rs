//! Answer generation from retrieved context.

use crate::config::Prompts;
use crate::error::Result;
use crate::llm::CompletionModel;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, instrument};

/// Formats the answer prompt and asks the language model.
#[derive(Clone)]
pub struct AnswerSynthesizer {
    model: Arc<dyn CompletionModel>,
    prompts: Prompts,
}

impl AnswerSynthesizer {
    pub fn new(model: Arc<dyn CompletionModel>) -> Self {
        Self {
            model,
            prompts: Prompts::default(),
        }
    }

    /// Set custom prompts (with user-defined variables).
    pub fn with_prompts(mut self, prompts: Prompts) -> Self {
        self.prompts = prompts;
        self
    }

    /// Render the answer prompt for `context` and `question`.
    pub fn render_prompt(&self, context: &str, question: &str) -> String {
        let mut vars = HashMap::new();
        vars.insert("context".to_string(), context.to_string());
        vars.insert("question".to_string(), question.to_string());
        self.prompts
            .render_with_custom(&self.prompts.answer.template, &vars)
    }

    /// Answer `question` from `context` with a single model call.
    ///
    /// Assumes `context` is not blank; callers answer "I don't know." without
    /// reaching the model in that case.
    #[instrument(skip(self, context), fields(context_len = context.len()))]
    pub async fn synthesize(&self, context: &str, question: &str) -> Result<String> {
        let prompt = self.render_prompt(context, question);
        let answer = self.model.complete(&prompt).await?;
        info!("Synthesized answer ({} chars)", answer.len());
        Ok(answer)
    }
}
