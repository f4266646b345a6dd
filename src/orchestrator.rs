//! Request pipeline for ytqa.
//!
//! Ties transcript retrieval, chunking, retrieval and answer synthesis into
//! the two request flows served over HTTP: fetching a transcript and asking a
//! question about a video. Nothing is shared between requests except the
//! immutable components held here.

use crate::chunking::{Chunker, ChunkingConfig, RecursiveSplitter};
use crate::config::{Prompts, Settings};
use crate::embedding::{Embedder, OpenAIEmbedder};
use crate::error::{QaError, Result};
use crate::llm::{CompletionModel, OpenAIChat};
use crate::openai::create_client_with_timeout;
use crate::rag::{format_context, AnswerSynthesizer, Retriever};
use crate::transcript::{CaptionsProvider, TranscriptFetcher, TranscriptOutcome, YoutubeCaptions};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, instrument};

/// Message returned when a video has no usable transcript.
pub const NO_TRANSCRIPT_MESSAGE: &str = "No transcript available.";

/// Answer returned when retrieval yields no usable context.
pub const NO_CONTEXT_ANSWER: &str = "I don't know.";

/// Terminal state of an ask request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AskOutcome {
    /// The video has no transcript.
    NoTranscript,
    /// Retrieval produced only blank context; the model was not called.
    NoContext,
    /// The model's answer, unmodified.
    Answered(String),
    /// An upstream stage failed.
    Errored(String),
}

impl AskOutcome {
    pub fn reply(&self) -> Reply {
        match self {
            AskOutcome::NoTranscript => Reply::Error(NO_TRANSCRIPT_MESSAGE.to_string()),
            AskOutcome::NoContext => Reply::Answer(NO_CONTEXT_ANSWER.to_string()),
            AskOutcome::Answered(answer) => Reply::Answer(answer.clone()),
            AskOutcome::Errored(message) => Reply::Error(message.clone()),
        }
    }
}

/// JSON body returned to clients: `{"transcript": ..}`, `{"answer": ..}` or
/// `{"error": ..}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Reply {
    Transcript(String),
    Answer(String),
    Error(String),
}

impl From<TranscriptOutcome> for Reply {
    fn from(outcome: TranscriptOutcome) -> Self {
        match outcome {
            TranscriptOutcome::Found(text) => Reply::Transcript(text),
            TranscriptOutcome::Unavailable(_) => Reply::Error(NO_TRANSCRIPT_MESSAGE.to_string()),
        }
    }
}

/// The request pipeline.
pub struct Orchestrator {
    fetcher: TranscriptFetcher,
    chunker: Box<dyn Chunker>,
    retriever: Retriever,
    synthesizer: AnswerSynthesizer,
    top_k: usize,
}

impl Orchestrator {
    /// Create an orchestrator wired to YouTube and OpenAI.
    ///
    /// Fails when no OpenAI credential is configured.
    pub fn new(settings: &Settings) -> Result<Self> {
        let api_key = settings.require_api_key()?;
        let client = create_client_with_timeout(
            api_key,
            Duration::from_secs(settings.openai.timeout_seconds),
        )?;

        let prompts = Prompts::load(
            settings.prompts.custom_dir.as_deref(),
            Some(&settings.prompts.variables),
        )?;

        let captions = Arc::new(YoutubeCaptions::new()?);
        let embedder = Arc::new(OpenAIEmbedder::with_config(
            client.clone(),
            &settings.embedding.model,
            settings.embedding.dimensions as usize,
        ));
        let model = Arc::new(
            OpenAIChat::new(client, &settings.llm.model).with_temperature(settings.llm.temperature),
        );

        info!(
            "Using {} for embeddings and {} for answers",
            settings.embedding.model, settings.llm.model
        );

        Self::with_components(settings, prompts, captions, embedder, model)
    }

    /// Create an orchestrator with custom components.
    pub fn with_components(
        settings: &Settings,
        prompts: Prompts,
        captions: Arc<dyn CaptionsProvider>,
        embedder: Arc<dyn Embedder>,
        model: Arc<dyn CompletionModel>,
    ) -> Result<Self> {
        if settings.retrieval.top_k == 0 {
            return Err(QaError::Config("retrieval.top_k must be at least 1".to_string()));
        }

        let chunker = RecursiveSplitter::new(ChunkingConfig::from(&settings.chunking))?;

        Ok(Self {
            fetcher: TranscriptFetcher::new(captions, settings.transcript.languages.clone()),
            chunker: Box::new(chunker),
            retriever: Retriever::new(embedder),
            synthesizer: AnswerSynthesizer::new(model).with_prompts(prompts),
            top_k: settings.retrieval.top_k,
        })
    }

    /// Replace the text splitter.
    pub fn with_chunker(mut self, chunker: Box<dyn Chunker>) -> Self {
        self.chunker = chunker;
        self
    }

    /// Fetch a video's transcript.
    pub async fn transcript(&self, video_id: &str) -> TranscriptOutcome {
        self.fetcher.fetch(video_id).await
    }

    /// Answer a question about a video.
    #[instrument(skip(self, question))]
    pub async fn ask(&self, video_id: &str, question: &str) -> AskOutcome {
        let transcript = match self.fetcher.fetch(video_id).await {
            TranscriptOutcome::Found(text) => text,
            TranscriptOutcome::Unavailable(reason) => {
                debug!("No transcript: {:?}", reason);
                return AskOutcome::NoTranscript;
            }
        };

        match self.answer_from(&transcript, question).await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!("Failed to answer question for {}: {}", video_id, e);
                AskOutcome::Errored(e.to_string())
            }
        }
    }

    async fn answer_from(&self, transcript: &str, question: &str) -> Result<AskOutcome> {
        let chunks = self.chunker.split(transcript);
        debug!("Split transcript into {} chunks", chunks.len());

        let index = self.retriever.build(chunks).await?;
        let retrieved = self.retriever.query(&index, question, self.top_k).await?;

        let context = format_context(&retrieved);
        if context.trim().is_empty() {
            info!("Retrieved context is empty, not calling the model");
            return Ok(AskOutcome::NoContext);
        }

        let answer = self.synthesizer.synthesize(&context, question).await?;
        Ok(AskOutcome::Answered(answer))
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::llm::MockCompletionModel;
    use crate::rag::testing::KeywordEmbedder;
    use crate::transcript::testing::FakeCaptions;

    pub const KEYWORDS: &[&str] = &["rust", "python", "ownership", "snakes"];

    pub fn settings() -> Settings {
        let mut settings = Settings::default();
        settings.chunking.chunk_size = 40;
        settings.chunking.chunk_overlap = 0;
        settings.retrieval.top_k = 1;
        settings
    }

    /// Captions for `talk`: two paragraphs on different topics.
    pub fn captions() -> FakeCaptions {
        FakeCaptions::default().with_manual(
            "talk",
            &[
                "python is named after comedians not snakes.",
                "rust ownership makes memory safe.",
            ],
        )
    }

    pub fn orchestrator(captions: FakeCaptions, model: MockCompletionModel) -> Orchestrator {
        Orchestrator::with_components(
            &settings(),
            Prompts::default(),
            Arc::new(captions),
            Arc::new(KeywordEmbedder::new(KEYWORDS)),
            Arc::new(model),
        )
        .unwrap()
    }
}
