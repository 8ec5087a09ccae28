use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{ParleyError, Result};
use crate::types::VoiceLanguage;

/// System prompt every new conversation is seeded with.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful AI assistant. You should answer questions as precisely and concisely as possible.";

/// Top-level configuration for Parley.
///
/// Loaded from `~/.parley/config.toml` by default. Every section is optional;
/// missing sections and keys take their defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParleyConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub completion: CompletionConfig,
    #[serde(default)]
    pub transcription: TranscriptionConfig,
}

impl ParleyConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: ParleyConfig = toml::from_str(&content)?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| ParleyError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Location of the local model server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Base URL; endpoint paths (`/v1/...`) are appended to it.
    pub base_url: String,
    /// Per-request timeout in seconds. 0 disables the timeout.
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:10086".to_string(),
            request_timeout_secs: 0,
        }
    }
}

impl ServerConfig {
    /// Base URL without a trailing slash.
    pub fn normalized_base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

/// Chat completion settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CompletionConfig {
    /// Model identifier sent with every request.
    pub model: String,
    /// System message that seeds each new conversation.
    pub system_prompt: String,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            model: "llama".to_string(),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
        }
    }
}

/// Speech-to-text settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscriptionConfig {
    /// Backend: "http" (the server's transcription endpoint) or "mock".
    pub backend: String,
    /// Maximum segment length in characters.
    pub max_len: u32,
    /// Split segments on word boundaries.
    pub split_on_word: bool,
    /// Maximum number of context tokens carried between segments.
    pub max_context: u32,
    /// Language label used when the UI does not pick one.
    pub default_language: String,
}

impl Default for TranscriptionConfig {
    fn default() -> Self {
        Self {
            backend: "http".to_string(),
            max_len: 100,
            split_on_word: true,
            max_context: 200,
            default_language: VoiceLanguage::default().label().to_string(),
        }
    }
}

impl TranscriptionConfig {
    pub fn default_voice_language(&self) -> VoiceLanguage {
        VoiceLanguage::from_label(&self.default_language)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_default_config() {
        let config = ParleyConfig::default();
        assert_eq!(config.general.log_level, "info");
        assert_eq!(config.server.base_url, "http://localhost:10086");
        assert_eq!(config.server.request_timeout_secs, 0);
        assert_eq!(config.completion.model, "llama");
        assert_eq!(config.completion.system_prompt, DEFAULT_SYSTEM_PROMPT);
        assert_eq!(config.transcription.backend, "http");
        assert_eq!(config.transcription.max_len, 100);
        assert!(config.transcription.split_on_word);
        assert_eq!(config.transcription.max_context, 200);
        assert_eq!(
            config.transcription.default_voice_language(),
            VoiceLanguage::Japanese
        );
    }

    #[test]
    fn test_load_valid_config() {
        let content = r#"
[general]
log_level = "debug"

[server]
base_url = "http://10.0.0.5:8080/"
request_timeout_secs = 30

[completion]
model = "qwen"
system_prompt = "Answer in haiku."

[transcription]
backend = "mock"
default_language = "English"
"#;
        let file = create_temp_config(content);
        let config = ParleyConfig::load(file.path()).unwrap();

        assert_eq!(config.general.log_level, "debug");
        assert_eq!(config.server.normalized_base_url(), "http://10.0.0.5:8080");
        assert_eq!(config.server.request_timeout_secs, 30);
        assert_eq!(config.completion.model, "qwen");
        assert_eq!(config.completion.system_prompt, "Answer in haiku.");
        assert_eq!(config.transcription.backend, "mock");
        assert_eq!(
            config.transcription.default_voice_language(),
            VoiceLanguage::English
        );
        // Unset keys keep their defaults.
        assert_eq!(config.transcription.max_len, 100);
        assert_eq!(config.transcription.max_context, 200);
    }

    #[test]
    fn test_load_partial_config_uses_defaults() {
        let file = create_temp_config("[completion]\nmodel = \"mistral\"\n");
        let config = ParleyConfig::load(file.path()).unwrap();
        assert_eq!(config.completion.model, "mistral");
        assert_eq!(config.completion.system_prompt, DEFAULT_SYSTEM_PROMPT);
        assert_eq!(config.server.base_url, "http://localhost:10086");
    }

    #[test]
    fn test_load_invalid_toml() {
        let file = create_temp_config("this is not [valid toml");
        let result = ParleyConfig::load(file.path());
        assert!(matches!(result, Err(ParleyError::Config(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let result = ParleyConfig::load(Path::new("/nonexistent/parley/config.toml"));
        assert!(matches!(result, Err(ParleyError::Io(_))));
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = ParleyConfig::load_or_default(Path::new("/nonexistent/config.toml"));
        assert_eq!(config.completion.model, "llama");
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = ParleyConfig::default();
        config.server.base_url = "http://127.0.0.1:9999".to_string();
        config.transcription.default_language = "Chinese".to_string();
        config.save(&path).unwrap();

        let loaded = ParleyConfig::load(&path).unwrap();
        assert_eq!(loaded.server.base_url, "http://127.0.0.1:9999");
        assert_eq!(
            loaded.transcription.default_voice_language(),
            VoiceLanguage::Chinese
        );
    }
}
