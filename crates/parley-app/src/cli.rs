//! CLI argument definitions for the Parley application.
//!
//! Uses `clap` with derive macros for ergonomic argument parsing.
//! Priority resolution: CLI args > env vars > config file > defaults.

use clap::Parser;
use std::path::PathBuf;

use parley_core::types::{InputMode, VoiceLanguage};

/// Parley: chat with a local language model by typing or speaking.
#[derive(Parser, Debug, Default)]
#[command(name = "parley", version, about)]
pub struct CliArgs {
    /// Path to the configuration file.
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Base URL of the model server (e.g. http://localhost:10086).
    #[arg(short = 'u', long = "base-url")]
    pub base_url: Option<String>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short = 'l', long = "log-level")]
    pub log_level: Option<String>,

    /// Voice language: English, Chinese or Japanese.
    #[arg(long = "language")]
    pub language: Option<String>,

    /// Start in voice input mode instead of keyboard mode.
    #[arg(long = "voice")]
    pub voice: bool,

    /// Use the built-in mock transcriber instead of the server.
    #[arg(long = "mock-transcription")]
    pub mock_transcription: bool,
}

impl CliArgs {
    /// Resolve the configuration file path.
    ///
    /// Priority: --config flag > PARLEY_CONFIG env var > ~/.parley/config.toml.
    pub fn resolve_config_path(&self) -> PathBuf {
        if let Some(ref p) = self.config {
            return p.clone();
        }
        if let Ok(p) = std::env::var("PARLEY_CONFIG") {
            return PathBuf::from(p);
        }
        default_config_path()
    }

    /// Resolve the model server base URL.
    ///
    /// Priority: --base-url flag > PARLEY_BASE_URL env var > config file value.
    pub fn resolve_base_url(&self, config_url: &str) -> String {
        if let Some(ref url) = self.base_url {
            return url.clone();
        }
        if let Ok(url) = std::env::var("PARLEY_BASE_URL") {
            if !url.trim().is_empty() {
                return url;
            }
        }
        config_url.to_string()
    }

    /// Resolve the log level.
    ///
    /// Priority: --log-level flag > PARLEY_LOG_LEVEL env var > config file value.
    pub fn resolve_log_level(&self, config_level: &str) -> String {
        self.log_level_with_env(std::env::var("PARLEY_LOG_LEVEL").ok(), config_level)
    }

    fn log_level_with_env(&self, env_level: Option<String>, config_level: &str) -> String {
        self.log_level
            .clone()
            .or_else(|| non_blank(env_level))
            .unwrap_or_else(|| config_level.to_string())
    }

    /// Resolve the initial voice language.
    ///
    /// Priority: --language flag > PARLEY_LANGUAGE env var > config file value.
    pub fn resolve_language(&self, config_default: VoiceLanguage) -> VoiceLanguage {
        self.language_with_env(std::env::var("PARLEY_LANGUAGE").ok(), config_default)
    }

    fn language_with_env(
        &self,
        env_language: Option<String>,
        config_default: VoiceLanguage,
    ) -> VoiceLanguage {
        self.language
            .clone()
            .or_else(|| non_blank(env_language))
            .map(|label| VoiceLanguage::from_label(&label))
            .unwrap_or(config_default)
    }

    pub fn input_mode(&self) -> InputMode {
        if self.voice {
            InputMode::Voice
        } else {
            InputMode::Keyboard
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Default config file path for the current platform.
fn default_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    if let Ok(home) = std::env::var("USERPROFILE") {
        return PathBuf::from(home).join(".parley").join("config.toml");
    }
    #[cfg(not(target_os = "windows"))]
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".parley").join("config.toml");
    }
    PathBuf::from("config.toml")
}
