//! Configuration settings for ytqa.

use crate::error::{QaError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable holding the OpenAI credential.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub server: ServerSettings,
    pub openai: OpenAISettings,
    pub transcript: TranscriptSettings,
    pub chunking: ChunkingSettings,
    pub embedding: EmbeddingSettings,
    pub retrieval: RetrievalSettings,
    pub llm: LlmSettings,
    pub prompts: PromptSettings,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
        }
    }
}

/// OpenAI credential and client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenAISettings {
    /// API key. The `OPENAI_API_KEY` environment variable takes precedence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
}

impl Default for OpenAISettings {
    fn default() -> Self {
        Self {
            api_key: None,
            timeout_seconds: crate::openai::DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Caption track selection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscriptSettings {
    /// Language codes in priority order.
    pub languages: Vec<String>,
}

impl Default for TranscriptSettings {
    fn default() -> Self {
        Self {
            languages: vec!["en".to_string(), "en-US".to_string(), "en-GB".to_string()],
        }
    }
}

/// Text splitting settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkingSettings {
    /// Maximum chunk length in characters.
    pub chunk_size: usize,
    /// Characters shared between consecutive chunks.
    pub chunk_overlap: usize,
}

impl Default for ChunkingSettings {
    fn default() -> Self {
        Self {
            chunk_size: 1000,
            chunk_overlap: 200,
        }
    }
}

/// Embedding generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingSettings {
    /// Embedding model to use.
    pub model: String,
    /// Embedding dimensions.
    pub dimensions: u32,
}

impl Default for EmbeddingSettings {
    fn default() -> Self {
        Self {
            model: "text-embedding-3-small".to_string(),
            dimensions: 1536,
        }
    }
}

/// Retrieval settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalSettings {
    /// Number of chunks handed to the language model.
    pub top_k: usize,
}

impl Default for RetrievalSettings {
    fn default() -> Self {
        Self { top_k: 4 }
    }
}

/// Language model settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmSettings {
    /// Chat model used for answers.
    pub model: String,
    /// Sampling temperature.
    pub temperature: f32,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            model: "gpt-3.5-turbo".to_string(),
            temperature: 0.7,
        }
    }
}

/// Prompt customization settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct PromptSettings {
    /// Directory for custom prompts (overrides defaults).
    pub custom_dir: Option<String>,
    /// Custom variables available in all prompts as {{variable_name}}.
    pub variables: std::collections::HashMap<String, String>,
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    ///
    /// Environment overrides are applied after the file is read.
    pub fn load_from(path: Option<&PathBuf>) -> Result<Self> {
        Self::load_from_with_env(path, |key| std::env::var(key).ok())
    }

    /// Like [`Settings::load_from`], reading overrides through `lookup`.
    pub fn load_from_with_env<F>(path: Option<&PathBuf>, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        let mut settings = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str::<Settings>(&content)?
        } else {
            Settings::default()
        };

        settings.apply_env(lookup);
        Ok(settings)
    }

    /// Apply environment overrides using the given lookup.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup(API_KEY_ENV).filter(|k| !k.trim().is_empty()) {
            self.openai.api_key = Some(key);
        }
    }

    /// The configured OpenAI key, or a configuration error when it is missing.
    pub fn require_api_key(&self) -> Result<&str> {
        match self.openai.api_key.as_deref() {
            Some(key) if !key.trim().is_empty() => Ok(key),
            Some(_) => Err(QaError::Config(format!(
                "{} is empty. Set it with: export {}='sk-...'",
                API_KEY_ENV, API_KEY_ENV
            ))),
            None => Err(QaError::Config(format!(
                "{} is not set. Set it with: export {}='sk-...'",
                API_KEY_ENV, API_KEY_ENV
            ))),
        }
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("ytqa")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }

    /// Render the settings as TOML with the API key masked.
    pub fn to_display_toml(&self) -> Result<String> {
        let mut masked = self.clone();
        if let Some(key) = masked.openai.api_key.as_mut() {
            *key = mask_key(key);
        }
        toml::to_string_pretty(&masked).map_err(|e| QaError::Config(e.to_string()))
    }
}

fn mask_key(key: &str) -> String {
    let visible: String = key.chars().take(3).collect();
    format!("{}...", visible)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.chunking.chunk_size, 1000);
        assert_eq!(settings.chunking.chunk_overlap, 200);
        assert_eq!(settings.retrieval.top_k, 4);
        assert_eq!(settings.transcript.languages, vec!["en", "en-US", "en-GB"]);
        assert_eq!(settings.embedding.model, "text-embedding-3-small");
        assert_eq!(settings.llm.model, "gpt-3.5-turbo");
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[retrieval]\ntop_k = 6\n\n[server]\nport = 9000\n\n[openai]\napi_key = \"sk-file\""
        )
        .unwrap();

        let path = file.path().to_path_buf();
        let settings = Settings::load_from_with_env(Some(&path), |_| None).unwrap();

        assert_eq!(settings.retrieval.top_k, 6);
        assert_eq!(settings.server.port, 9000);
        assert_eq!(settings.server.host, "127.0.0.1");
        assert_eq!(settings.chunking.chunk_size, 1000);
        assert_eq!(settings.require_api_key().unwrap(), "sk-file");
    }

    #[test]
    fn test_env_key_overrides_loaded_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[openai]\napi_key = \"sk-file\"").unwrap();

        let path = file.path().to_path_buf();
        let settings = Settings::load_from_with_env(Some(&path), |key| {
            (key == API_KEY_ENV).then(|| "sk-env".to_string())
        })
        .unwrap();
        assert_eq!(settings.require_api_key().unwrap(), "sk-env");
    }

    #[test]
    fn test_invalid_file_is_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[retrieval]\ntop_k = \"many\"").unwrap();

        let path = file.path().to_path_buf();
        let err = Settings::load_from_with_env(Some(&path), |_| None).unwrap_err();
        assert!(matches!(err, QaError::TomlParse(_)));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let settings = Settings::load_from_with_env(Some(&path), |_| None).unwrap();
        assert_eq!(settings.retrieval.top_k, 4);
    }

    #[test]
    fn test_env_overrides_file_key() {
        let mut settings = Settings::default();
        settings.openai.api_key = Some("sk-file".to_string());
        settings.apply_env(|key| (key == API_KEY_ENV).then(|| "sk-env".to_string()));
        assert_eq!(settings.require_api_key().unwrap(), "sk-env");
    }

    #[test]
    fn test_blank_env_is_ignored() {
        let mut settings = Settings::default();
        settings.apply_env(|_| Some("   ".to_string()));
        assert!(settings.openai.api_key.is_none());
    }

    #[test]
    fn test_require_api_key_missing() {
        let settings = Settings::default();
        let err = settings.require_api_key().unwrap_err();
        assert!(matches!(err, QaError::Config(_)));
        assert!(err.to_string().contains(API_KEY_ENV));

        let mut settings = Settings::default();
        settings.openai.api_key = Some(String::new());
        assert!(settings.require_api_key().is_err());
    }

    #[test]
    fn test_display_masks_key() {
        let mut settings = Settings::default();
        settings.openai.api_key = Some("sk-secret-value".to_string());
        let shown = settings.to_display_toml().unwrap();
        assert!(shown.contains("sk-..."));
        assert!(!shown.contains("secret"));
    }
}
