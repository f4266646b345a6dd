//! Transcript command implementation.

use super::resolve_video_id;
use crate::cli::Output;
use crate::config::Settings;
use crate::orchestrator::NO_TRANSCRIPT_MESSAGE;
use crate::transcript::{TranscriptFetcher, TranscriptOutcome, YoutubeCaptions};
use anyhow::Result;
use std::sync::Arc;

/// Run the transcript command. Needs no OpenAI credential.
pub async fn run_transcript(video: &str, settings: Settings) -> Result<()> {
    let video_id = resolve_video_id(video);
    let fetcher = TranscriptFetcher::new(
        Arc::new(YoutubeCaptions::new()?),
        settings.transcript.languages.clone(),
    );

    let spinner = Output::spinner("Fetching captions...");
    let outcome = fetcher.fetch(&video_id).await;
    spinner.finish_and_clear();

    match outcome {
        TranscriptOutcome::Found(text) => {
            println!("{}", text);
            Ok(())
        }
        TranscriptOutcome::Unavailable(reason) => {
            Output::error(NO_TRANSCRIPT_MESSAGE);
            anyhow::bail!("no transcript for {}: {:?}", video_id, reason)
        }
    }
}
