//! Ask command implementation.

use super::resolve_video_id;
use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::orchestrator::{AskOutcome, Orchestrator, NO_CONTEXT_ANSWER, NO_TRANSCRIPT_MESSAGE};
use anyhow::Result;

/// Run the ask command.
pub async fn run_ask(video: &str, question: &str, settings: Settings) -> Result<()> {
    if let Err(e) = preflight::check(Operation::Ask, &settings) {
        Output::error(&e.to_string());
        return Err(e.into());
    }

    let video_id = resolve_video_id(video);
    let orchestrator = Orchestrator::new(&settings)?;

    let spinner = Output::spinner("Reading the transcript...");
    let outcome = orchestrator.ask(&video_id, question).await;
    spinner.finish_and_clear();

    match outcome {
        AskOutcome::Answered(answer) => {
            println!("\n{}\n", answer);
        }
        AskOutcome::NoContext => {
            println!("\n{}\n", NO_CONTEXT_ANSWER);
        }
        AskOutcome::NoTranscript => {
            Output::error(NO_TRANSCRIPT_MESSAGE);
            anyhow::bail!("no transcript for {}", video_id);
        }
        AskOutcome::Errored(message) => {
            Output::error(&format!("Failed to generate answer: {}", message));
            anyhow::bail!(message);
        }
    }

    Ok(())
}
