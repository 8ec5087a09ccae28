//! Transcription over HTTP against the model server's Whisper endpoint.
//!
//! Uploads the recorded clip as multipart form data to
//! `{base_url}/v1/audio/transcriptions` and cleans the returned text.

use std::path::Path;
use std::time::Duration;

use parley_core::error::ParleyError;
use parley_core::types::TranscriptionRequest;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;

use crate::cleanup::clean_transcript;
use crate::{TranscriptionService, WhisperConfig};

const TRANSCRIPTIONS_PATH: &str = "/v1/audio/transcriptions";

/// Response body of the transcription endpoint.
#[derive(Debug, Deserialize)]
struct TranscriptionResponse {
    text: String,
}

/// Transcription service backed by the server's `/v1/audio/transcriptions`.
pub struct HttpTranscriptionService {
    client: reqwest::Client,
    config: WhisperConfig,
}

impl std::fmt::Debug for HttpTranscriptionService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTranscriptionService")
            .field("base_url", &self.config.base_url)
            .finish()
    }
}

impl HttpTranscriptionService {
    /// Create a new service for the given configuration.
    ///
    /// # Errors
    /// Returns `ParleyError::Config` if the HTTP client cannot be built.
    pub fn new(config: WhisperConfig) -> Result<Self, ParleyError> {
        let mut builder = reqwest::Client::builder();
        if config.timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(config.timeout_secs));
        }
        let client = builder
            .build()
            .map_err(|e| ParleyError::Config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client, config })
    }

    /// Get a reference to the configuration.
    pub fn config(&self) -> &WhisperConfig {
        &self.config
    }

    fn url(&self) -> String {
        format!(
            "{}{}",
            self.config.base_url.trim_end_matches('/'),
            TRANSCRIPTIONS_PATH
        )
    }

    fn build_form(&self, audio: Vec<u8>, file_name: String, language: &str) -> Form {
        Form::new()
            .part("file", Part::bytes(audio).file_name(file_name))
            .text("language", language.to_string())
            .text("max_len", self.config.max_len.to_string())
            .text("split_on_word", self.config.split_on_word.to_string())
            .text("max_context", self.config.max_context.to_string())
    }
}

fn upload_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "audio.wav".to_string())
}

impl TranscriptionService for HttpTranscriptionService {
    async fn transcribe(&self, request: &TranscriptionRequest) -> Result<String, ParleyError> {
        let path = match &request.audio {
            Some(path) if !path.as_os_str().is_empty() => path,
            _ => {
                tracing::debug!("No audio recorded, skipping transcription");
                return Ok(String::new());
            }
        };

        let audio = tokio::fs::read(path).await?;
        let language = request.language_code();
        tracing::debug!(
            path = %path.display(),
            bytes = audio.len(),
            language,
            "Uploading audio for transcription"
        );

        let form = self.build_form(audio, upload_name(path), language);
        let response = self
            .client
            .post(self.url())
            .multipart(form)
            .send()
            .await
            .map_err(|e| ParleyError::Network(format!("Transcription request failed: {}", e)))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            ParleyError::Network(format!("Failed to read transcription response: {}", e))
        })?;
        if !status.is_success() {
            return Err(ParleyError::Network(format!(
                "Transcription server returned HTTP {}: {}",
                status.as_u16(),
                body
            )));
        }

        let parsed: TranscriptionResponse = serde_json::from_str(&body).map_err(|e| {
            ParleyError::MalformedResponse(format!("Unexpected transcription response: {}", e))
        })?;

        let text = clean_transcript(&parsed.text);
        tracing::info!(
            raw_len = parsed.text.len(),
            text_len = text.len(),
            "Transcription complete"
        );
        Ok(text)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
