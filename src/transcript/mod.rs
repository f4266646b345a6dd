//! Transcript retrieval for YouTube videos.
//!
//! A [`CaptionsProvider`] hands out caption segments for a video; the
//! [`TranscriptFetcher`] picks the track by language priority (manual captions
//! before auto-generated ones) and flattens the segments into one text blob.

mod youtube;

pub use youtube::{extract_video_id, YoutubeCaptions};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info, instrument};

/// A timestamped fragment of spoken text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptionSegment {
    pub text: String,
    pub start_seconds: f64,
    pub duration_seconds: f64,
}

impl CaptionSegment {
    pub fn new(text: impl Into<String>, start_seconds: f64, duration_seconds: f64) -> Self {
        Self {
            text: text.into(),
            start_seconds,
            duration_seconds,
        }
    }
}

/// Which kind of caption track to look for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackKind {
    /// Captions written by a person.
    Manual,
    /// Machine-generated captions.
    Generated,
}

impl std::fmt::Display for TrackKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrackKind::Manual => write!(f, "manual"),
            TrackKind::Generated => write!(f, "auto-generated"),
        }
    }
}

/// Failures reported by a captions provider.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CaptionsError {
    #[error("captions are disabled for this video")]
    Disabled,

    #[error("no {kind} track found for languages {languages:?}")]
    NoTrackFound { kind: TrackKind, languages: Vec<String> },

    #[error("{0}")]
    Provider(String),
}

/// Source of caption tracks for a video.
#[async_trait]
pub trait CaptionsProvider: Send + Sync {
    /// Fetch the segments of the first track of `kind` matching `languages`,
    /// trying the languages in order.
    async fn fetch_track(
        &self,
        video_id: &str,
        languages: &[String],
        kind: TrackKind,
    ) -> std::result::Result<Vec<CaptionSegment>, CaptionsError>;
}

/// Why a transcript could not be produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnavailableReason {
    CaptionsDisabled,
    NoMatchingTrack,
    Provider(String),
}

/// Result of fetching a transcript. Never an error: unavailability is a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscriptOutcome {
    Found(String),
    Unavailable(UnavailableReason),
}

impl TranscriptOutcome {
    /// Collapse to plain text; an unavailable transcript is the empty string.
    pub fn into_text(self) -> String {
        match self {
            TranscriptOutcome::Found(text) => text,
            TranscriptOutcome::Unavailable(_) => String::new(),
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, TranscriptOutcome::Found(_))
    }
}

/// Fetches and flattens a video's transcript.
#[derive(Clone)]
pub struct TranscriptFetcher {
    provider: Arc<dyn CaptionsProvider>,
    languages: Vec<String>,
}

impl TranscriptFetcher {
    pub fn new(provider: Arc<dyn CaptionsProvider>, languages: Vec<String>) -> Self {
        Self {
            provider,
            languages,
        }
    }

    /// Fetch the transcript for a video.
    ///
    /// Manual tracks are preferred; auto-generated tracks are used only when no
    /// manual track matches any configured language. Every failure is logged
    /// and reported as [`TranscriptOutcome::Unavailable`].
    #[instrument(skip(self))]
    pub async fn fetch(&self, video_id: &str) -> TranscriptOutcome {
        let segments = match self.select_segments(video_id).await {
            Ok(segments) => segments,
            Err(CaptionsError::Disabled) => {
                error!("Captions are disabled for video {}", video_id);
                return TranscriptOutcome::Unavailable(UnavailableReason::CaptionsDisabled);
            }
            Err(CaptionsError::NoTrackFound { .. }) => {
                error!(
                    "No transcript available for video {} in languages {:?}",
                    video_id, self.languages
                );
                return TranscriptOutcome::Unavailable(UnavailableReason::NoMatchingTrack);
            }
            Err(CaptionsError::Provider(message)) => {
                error!("Error fetching transcript for video {}: {}", video_id, message);
                return TranscriptOutcome::Unavailable(UnavailableReason::Provider(message));
            }
        };

        let text = join_segments(&segments);
        if text.trim().is_empty() {
            error!("Caption track for video {} contained no text", video_id);
            return TranscriptOutcome::Unavailable(UnavailableReason::NoMatchingTrack);
        }

        info!(
            "Fetched transcript for {} ({} segments, {} chars)",
            video_id,
            segments.len(),
            text.chars().count()
        );
        TranscriptOutcome::Found(text)
    }

    async fn select_segments(
        &self,
        video_id: &str,
    ) -> std::result::Result<Vec<CaptionSegment>, CaptionsError> {
        match self
            .provider
            .fetch_track(video_id, &self.languages, TrackKind::Manual)
            .await
        {
            Err(CaptionsError::NoTrackFound { .. }) => {
                debug!("No manual captions, falling back to auto-generated");
                self.provider
                    .fetch_track(video_id, &self.languages, TrackKind::Generated)
                    .await
            }
            other => other,
        }
    }
}

/// Join segment texts in order with single spaces.
pub fn join_segments(segments: &[CaptionSegment]) -> String {
    segments
        .iter()
        .map(|s| s.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// In-memory captions provider keyed by video id.
    #[derive(Default)]
    pub struct FakeCaptions {
        pub manual: HashMap<String, Vec<CaptionSegment>>,
        pub generated: HashMap<String, Vec<CaptionSegment>>,
        pub failures: HashMap<String, CaptionsError>,
        pub calls: Mutex<Vec<(String, TrackKind)>>,
    }

    impl FakeCaptions {
        pub fn with_manual(mut self, video_id: &str, texts: &[&str]) -> Self {
            self.manual.insert(video_id.to_string(), segments(texts));
            self
        }

        pub fn with_generated(mut self, video_id: &str, texts: &[&str]) -> Self {
            self.generated.insert(video_id.to_string(), segments(texts));
            self
        }

        pub fn with_failure(mut self, video_id: &str, err: CaptionsError) -> Self {
            self.failures.insert(video_id.to_string(), err);
            self
        }

        pub fn calls(&self) -> Vec<(String, TrackKind)> {
            self.calls.lock().unwrap().clone()
        }
    }

    pub fn segments(texts: &[&str]) -> Vec<CaptionSegment> {
        texts
            .iter()
            .enumerate()
            .map(|(i, t)| CaptionSegment::new(*t, i as f64 * 2.0, 2.0))
            .collect()
    }

    #[async_trait]
    impl CaptionsProvider for FakeCaptions {
        async fn fetch_track(
            &self,
            video_id: &str,
            languages: &[String],
            kind: TrackKind,
        ) -> std::result::Result<Vec<CaptionSegment>, CaptionsError> {
            self.calls.lock().unwrap().push((video_id.to_string(), kind));

            if let Some(err) = self.failures.get(video_id) {
                return Err(err.clone());
            }

            let tracks = match kind {
                TrackKind::Manual => &self.manual,
                TrackKind::Generated => &self.generated,
            };
            tracks
                .get(video_id)
                .cloned()
                .ok_or_else(|| CaptionsError::NoTrackFound {
                    kind,
                    languages: languages.to_vec(),
                })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::FakeCaptions;
    use super::*;

    fn fetcher(provider: Arc<FakeCaptions>) -> TranscriptFetcher {
        TranscriptFetcher::new(
            provider,
            vec!["en".to_string(), "en-US".to_string(), "en-GB".to_string()],
        )
    }

    #[tokio::test]
    async fn test_manual_track_preferred() {
        let provider = Arc::new(
            FakeCaptions::default()
                .with_manual("vid", &["hello", "world"])
                .with_generated("vid", &["auto", "text"]),
        );
        let outcome = fetcher(provider.clone()).fetch("vid").await;

        assert_eq!(outcome, TranscriptOutcome::Found("hello world".to_string()));
        assert_eq!(provider.calls(), vec![("vid".to_string(), TrackKind::Manual)]);
    }

    #[tokio::test]
    async fn test_falls_back_to_generated() {
        let provider = Arc::new(FakeCaptions::default().with_generated("vid", &["auto", "text"]));
        let outcome = fetcher(provider.clone()).fetch("vid").await;

        assert_eq!(outcome, TranscriptOutcome::Found("auto text".to_string()));
        assert_eq!(
            provider.calls(),
            vec![
                ("vid".to_string(), TrackKind::Manual),
                ("vid".to_string(), TrackKind::Generated),
            ]
        );
    }

    #[tokio::test]
    async fn test_failures_collapse_to_empty_text() {
        let provider = Arc::new(
            FakeCaptions::default()
                .with_failure("disabled", CaptionsError::Disabled)
                .with_failure("broken", CaptionsError::Provider("boom".to_string())),
        );
        let fetcher = fetcher(provider);

        let disabled = fetcher.fetch("disabled").await;
        assert_eq!(
            disabled,
            TranscriptOutcome::Unavailable(UnavailableReason::CaptionsDisabled)
        );
        assert_eq!(disabled.into_text(), "");

        let missing = fetcher.fetch("missing").await;
        assert_eq!(
            missing,
            TranscriptOutcome::Unavailable(UnavailableReason::NoMatchingTrack)
        );
        assert_eq!(missing.into_text(), "");

        let broken = fetcher.fetch("broken").await;
        assert_eq!(
            broken,
            TranscriptOutcome::Unavailable(UnavailableReason::Provider("boom".to_string()))
        );
        assert_eq!(broken.into_text(), "");
    }

    #[tokio::test]
    async fn test_disabled_does_not_fall_back() {
        let provider = Arc::new(FakeCaptions::default().with_failure("vid", CaptionsError::Disabled));
        fetcher(provider.clone()).fetch("vid").await;
        assert_eq!(provider.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_blank_track_is_unavailable() {
        let provider = Arc::new(FakeCaptions::default().with_manual("vid", &["", " "]));
        let outcome = fetcher(provider).fetch("vid").await;
        assert!(!outcome.is_found());
    }

    #[test]
    fn test_join_segments_keeps_order() {
        let segments = testing::segments(&["one", "two", "three"]);
        assert_eq!(join_segments(&segments), "one two three");
        assert_eq!(join_segments(&[]), "");
    }
}
