//! CLI command implementations.

mod ask;
mod config;
mod serve;
mod transcript;

pub use ask::run_ask;
pub use config::run_config;
pub use serve::{router, run_serve, AppState};
pub use transcript::run_transcript;

use crate::transcript::extract_video_id;

/// Accept a YouTube URL or a bare ID; anything else is passed through as-is.
fn resolve_video_id(input: &str) -> String {
    extract_video_id(input).unwrap_or_else(|| input.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_video_id() {
        assert_eq!(resolve_video_id("https://youtu.be/dQw4w9WgXcQ"), "dQw4w9WgXcQ");
        assert_eq!(resolve_video_id(" custom-id "), "custom-id");
    }
}
