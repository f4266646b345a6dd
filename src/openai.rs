//! OpenAI client construction.
//!
//! The credential is resolved once at startup and handed in here; clients never
//! read it from the environment on their own.

use crate::error::{QaError, Result};
use async_openai::{config::OpenAIConfig, Client};
use std::time::Duration;

/// Default timeout for OpenAI API requests (5 minutes).
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Shorthand for the configured async-openai client.
pub type OpenAIClient = Client<OpenAIConfig>;

/// Create an OpenAI client for the given API key with the default timeout.
pub fn create_client(api_key: &str) -> Result<OpenAIClient> {
    create_client_with_timeout(api_key, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
}

/// Create an OpenAI client with a custom timeout.
pub fn create_client_with_timeout(api_key: &str, timeout: Duration) -> Result<OpenAIClient> {
    let http_client = reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| QaError::Config(format!("Failed to create HTTP client: {}", e)))?;

    let config = OpenAIConfig::new().with_api_key(api_key);
    Ok(Client::with_config(config).with_http_client(http_client))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_client() {
        assert!(create_client("sk-test").is_ok());
        assert!(create_client_with_timeout("sk-test", Duration::from_secs(5)).is_ok());
    }
}
