//! Pre-flight checks before serving or answering.
//!
//! Validates configuration up front so the process fails before accepting
//! work it cannot complete.

use crate::config::Settings;
use crate::error::Result;

/// Requirements for different operations.
#[derive(Debug, Clone, Copy)]
pub enum Operation {
    /// Serving needs the OpenAI credential before binding.
    Serve,
    /// Asking needs the OpenAI credential.
    Ask,
    /// Fetching a transcript has no requirements.
    Transcript,
}

/// Run pre-flight checks for the given operation.
pub fn check(operation: Operation, settings: &Settings) -> Result<()> {
    match operation {
        Operation::Serve | Operation::Ask => {
            settings.require_api_key()?;
        }
        Operation::Transcript => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QaError;

    #[test]
    fn test_transcript_no_requirements() {
        assert!(check(Operation::Transcript, &Settings::default()).is_ok());
    }

    #[test]
    fn test_serve_requires_api_key() {
        let settings = Settings::default();
        assert!(matches!(
            check(Operation::Serve, &settings),
            Err(QaError::Config(_))
        ));

        let mut settings = Settings::default();
        settings.openai.api_key = Some("sk-test".to_string());
        assert!(check(Operation::Serve, &settings).is_ok());
        assert!(check(Operation::Ask, &settings).is_ok());
    }
}
