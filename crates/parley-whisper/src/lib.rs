//! Parley Whisper crate - speech-to-text for voice submissions.
//!
//! Provides a trait-based abstraction over transcription, an HTTP client for
//! the model server's `/v1/audio/transcriptions` endpoint, the cleanup passes
//! applied to its output, and a mock implementation for running without a
//! transcription server.

use std::future::Future;

use parley_core::error::ParleyError;
use parley_core::types::TranscriptionRequest;

pub mod cleanup;
pub mod http_service;

pub use cleanup::clean_transcript;
pub use http_service::HttpTranscriptionService;

// =============================================================================
// Configuration
// =============================================================================

/// Request parameters for the transcription endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhisperConfig {
    /// Server base URL, e.g. `http://localhost:10086`.
    pub base_url: String,
    /// Maximum segment length in characters (`max_len` form field).
    pub max_len: u32,
    /// Split segments on word boundaries (`split_on_word` form field).
    pub split_on_word: bool,
    /// Maximum context tokens between segments (`max_context` form field).
    pub max_context: u32,
    /// Per-request timeout in seconds; 0 means none.
    pub timeout_secs: u64,
}

impl Default for WhisperConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:10086".to_string(),
            max_len: 100,
            split_on_word: true,
            max_context: 200,
            timeout_secs: 0,
        }
    }
}

impl WhisperConfig {
    /// Build from the application configuration.
    pub fn from_app_config(config: &parley_core::ParleyConfig) -> Self {
        Self {
            base_url: config.server.normalized_base_url().to_string(),
            max_len: config.transcription.max_len,
            split_on_word: config.transcription.split_on_word,
            max_context: config.transcription.max_context,
            timeout_secs: config.server.request_timeout_secs,
        }
    }
}

// =============================================================================
// Trait
// =============================================================================

/// Service for turning a recorded clip into text.
pub trait TranscriptionService: Send + Sync {
    /// Transcribe the clip referenced by `request`.
    ///
    /// A request with no audio yields an empty string and performs no I/O.
    fn transcribe(
        &self,
        request: &TranscriptionRequest,
    ) -> impl Future<Output = Result<String, ParleyError>> + Send;
}

// =============================================================================
// Mock implementation
// =============================================================================

/// Text returned by [`MockTranscriptionService`] for every clip.
pub const MOCK_TRANSCRIPT: &str = "This is a transcribed text from the audio.";

/// Mock transcription service that returns a fixed sentence.
///
/// Used for testing and for running the chat loop without a speech-to-text
/// server.
#[derive(Debug, Clone, Default)]
pub struct MockTranscriptionService;

impl MockTranscriptionService {
    pub fn new() -> Self {
        Self
    }
}

impl TranscriptionService for MockTranscriptionService {
    async fn transcribe(&self, request: &TranscriptionRequest) -> Result<String, ParleyError> {
        if request.is_empty() {
            return Ok(String::new());
        }

        tracing::debug!(
            language = request.language_code(),
            "Mock transcription generated"
        );

        Ok(MOCK_TRANSCRIPT.to_string())
    }
}

// =============================================================================
// Backend selection
// =============================================================================

/// Transcription backend chosen at startup from `transcription.backend`.
#[derive(Debug)]
pub enum TranscriptionBackend {
    Http(HttpTranscriptionService),
    Mock(MockTranscriptionService),
}

impl TranscriptionBackend {
    /// Build the backend named in the configuration ("http" or "mock").
    ///
    /// # Errors
    /// Returns `ParleyError::Config` for an unknown backend name.
    pub fn from_app_config(config: &parley_core::ParleyConfig) -> Result<Self, ParleyError> {
        match config.transcription.backend.trim().to_ascii_lowercase().as_str() {
            "http" => Ok(TranscriptionBackend::Http(HttpTranscriptionService::new(
                WhisperConfig::from_app_config(config),
            )?)),
            "mock" => Ok(TranscriptionBackend::Mock(MockTranscriptionService::new())),
            other => Err(ParleyError::Config(format!(
                "Unknown transcription backend: {}",
                other
            ))),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TranscriptionBackend::Http(_) => "http",
            TranscriptionBackend::Mock(_) => "mock",
        }
    }
}

impl TranscriptionService for TranscriptionBackend {
    async fn transcribe(&self, request: &TranscriptionRequest) -> Result<String, ParleyError> {
        match self {
            TranscriptionBackend::Http(service) => service.transcribe(request).await,
            TranscriptionBackend::Mock(service) => service.transcribe(request).await,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use parley_core::types::VoiceLanguage;

    #[tokio::test]
    async fn test_mock_transcription_basic() {
        let service = MockTranscriptionService::new();
        let request = TranscriptionRequest::new("clip.wav");
        let text = service.transcribe(&request).await.unwrap();
        assert_eq!(text, MOCK_TRANSCRIPT);
    }

    #[tokio::test]
    async fn test_mock_transcription_no_audio() {
        let service = MockTranscriptionService::new();
        let text = service
            .transcribe(&TranscriptionRequest::default())
            .await
            .unwrap();
        assert!(text.is_empty());
    }

    #[tokio::test]
    async fn test_mock_transcription_ignores_language() {
        let service = MockTranscriptionService::new();
        let request = TranscriptionRequest::new("clip.wav").with_language(VoiceLanguage::Chinese);
        assert_eq!(service.transcribe(&request).await.unwrap(), MOCK_TRANSCRIPT);
    }

    #[test]
    fn test_whisper_config_default() {
        let config = WhisperConfig::default();
        assert_eq!(config.base_url, "http://localhost:10086");
        assert_eq!(config.max_len, 100);
        assert!(config.split_on_word);
        assert_eq!(config.max_context, 200);
        assert_eq!(config.timeout_secs, 0);
    }

    #[test]
    fn test_whisper_config_from_app_config() {
        let mut app = parley_core::ParleyConfig::default();
        app.server.base_url = "http://gpu-box:10086/".to_string();
        app.server.request_timeout_secs = 15;
        app.transcription.max_len = 60;
        app.transcription.split_on_word = false;

        let config = WhisperConfig::from_app_config(&app);
        assert_eq!(config.base_url, "http://gpu-box:10086");
        assert_eq!(config.max_len, 60);
        assert!(!config.split_on_word);
        assert_eq!(config.max_context, 200);
        assert_eq!(config.timeout_secs, 15);
    }

    #[test]
    fn test_backend_from_app_config() {
        let mut app = parley_core::ParleyConfig::default();
        let backend = TranscriptionBackend::from_app_config(&app).unwrap();
        assert_eq!(backend.name(), "http");

        app.transcription.backend = "Mock".to_string();
        let backend = TranscriptionBackend::from_app_config(&app).unwrap();
        assert_eq!(backend.name(), "mock");

        app.transcription.backend = "vosk".to_string();
        let err = TranscriptionBackend::from_app_config(&app).unwrap_err();
        assert!(matches!(err, ParleyError::Config(_)));
        assert!(err.to_string().contains("vosk"));
    }

    #[tokio::test]
    async fn test_backend_delegates_to_mock() {
        let backend = TranscriptionBackend::Mock(MockTranscriptionService::new());
        let text = backend
            .transcribe(&TranscriptionRequest::new("clip.wav"))
            .await
            .unwrap();
        assert_eq!(text, MOCK_TRANSCRIPT);
    }
}
