//! YouTube captions via `yt-transcript-rs`.

use super::{CaptionSegment, CaptionsError, CaptionsProvider, TrackKind};
use crate::error::{QaError, Result};
use async_trait::async_trait;
use regex::Regex;
use std::sync::OnceLock;
use tracing::{debug, instrument};
use yt_transcript_rs::api::YouTubeTranscriptApi;
use yt_transcript_rs::errors::{CouldNotRetrieveTranscript, CouldNotRetrieveTranscriptReason};

/// Captions provider backed by YouTube's public transcript endpoints.
pub struct YoutubeCaptions {
    api: YouTubeTranscriptApi,
    client: reqwest::Client,
}

impl YoutubeCaptions {
    pub fn new() -> Result<Self> {
        let api = YouTubeTranscriptApi::new(None, None, None)
            .map_err(|e| QaError::Captions(format!("Failed to create transcript client: {}", e)))?;

        Ok(Self {
            api,
            client: reqwest::Client::new(),
        })
    }
}

#[async_trait]
impl CaptionsProvider for YoutubeCaptions {
    #[instrument(skip(self, languages))]
    async fn fetch_track(
        &self,
        video_id: &str,
        languages: &[String],
        kind: TrackKind,
    ) -> std::result::Result<Vec<CaptionSegment>, CaptionsError> {
        let codes: Vec<&str> = languages.iter().map(String::as_str).collect();

        let tracks = self
            .api
            .list_transcripts(video_id)
            .await
            .map_err(|e| classify(e, kind, languages))?;

        let track = match kind {
            TrackKind::Manual => tracks.find_manually_created_transcript(&codes),
            TrackKind::Generated => tracks.find_generated_transcript(&codes),
        }
        .map_err(|e| classify(e, kind, languages))?;

        let fetched = track
            .fetch(&self.client, false)
            .await
            .map_err(|e| classify(e, kind, languages))?;

        debug!(
            "Fetched {} track {} with {} snippets",
            kind,
            fetched.language_code,
            fetched.snippets.len()
        );

        Ok(fetched
            .snippets
            .into_iter()
            .map(|s| CaptionSegment::new(s.text, s.start, s.duration))
            .collect())
    }
}

fn classify(err: CouldNotRetrieveTranscript, kind: TrackKind, languages: &[String]) -> CaptionsError {
    match err.reason {
        Some(CouldNotRetrieveTranscriptReason::TranscriptsDisabled) => CaptionsError::Disabled,
        Some(CouldNotRetrieveTranscriptReason::NoTranscriptFound { .. }) => {
            CaptionsError::NoTrackFound {
                kind,
                languages: languages.to_vec(),
            }
        }
        _ => CaptionsError::Provider(err.to_string()),
    }
}

fn video_id_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?x)
            (?:
                (?:https?://)?
                (?:www\.|m\.)?
                (?:youtube\.com/watch\?(?:.*&)?v=|youtu\.be/|youtube\.com/embed/|youtube\.com/shorts/|youtube\.com/v/)
                ([a-zA-Z0-9_-]{11})
            )
            |
            ^([a-zA-Z0-9_-]{11})$
        ",
        )
        .expect("video id regex is valid")
    })
}

/// Extract a video ID from a YouTube URL or a bare 11-character ID.
pub fn extract_video_id(input: &str) -> Option<String> {
    let input = input.trim();
    video_id_regex()
        .captures(input)
        .and_then(|caps| caps.get(1).or_else(|| caps.get(2)))
        .map(|m| m.as_str().to_string())
}
