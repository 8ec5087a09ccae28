//! Chat completion client for an OpenAI-compatible server.
//!
//! Sends the whole conversation to `{base_url}/v1/chat/completions` and
//! returns the content of the first choice.

use std::future::Future;
use std::time::Duration;

use parley_core::error::ParleyError;
use parley_core::types::Message;
use serde::{Deserialize, Serialize};

const COMPLETIONS_PATH: &str = "/v1/chat/completions";

// =============================================================================
// Configuration
// =============================================================================

/// Settings for the completion client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatLlmConfig {
    /// Server base URL, e.g. `http://localhost:10086`.
    pub base_url: String,
    /// Model identifier sent with every request.
    pub model: String,
    /// Per-request timeout in seconds; 0 means none.
    pub timeout_secs: u64,
}

impl Default for ChatLlmConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:10086".to_string(),
            model: "llama".to_string(),
            timeout_secs: 0,
        }
    }
}

impl ChatLlmConfig {
    /// Build from the application configuration.
    pub fn from_app_config(config: &parley_core::ParleyConfig) -> Self {
        Self {
            base_url: config.server.normalized_base_url().to_string(),
            model: config.completion.model.clone(),
            timeout_secs: config.server.request_timeout_secs,
        }
    }
}

// =============================================================================
// Wire types
// =============================================================================

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    messages: &'a [Message],
    model: &'a str,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

/// Pull the first choice's content out of a response body.
fn extract_reply(body: &str) -> Result<String, ParleyError> {
    let response: ChatCompletionResponse = serde_json::from_str(body).map_err(|e| {
        ParleyError::MalformedResponse(format!("Unexpected completion response: {}", e))
    })?;
    let choice = response.choices.into_iter().next().ok_or_else(|| {
        ParleyError::MalformedResponse("Completion response has no choices".to_string())
    })?;
    choice.message.content.ok_or_else(|| {
        ParleyError::MalformedResponse("First choice has no message content".to_string())
    })
}

/// Extract an error message from an OpenAI-style error body, if present.
fn extract_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
                .map(String::from)
        })
        .unwrap_or_else(|| body.to_string())
}

// =============================================================================
// Trait
// =============================================================================

/// Service that produces the assistant's next reply for a conversation.
pub trait CompletionService: Send + Sync {
    /// Send the full `history` and return the reply text.
    fn try_complete(
        &self,
        history: &[Message],
    ) -> impl Future<Output = Result<String, ParleyError>> + Send;
}

// =============================================================================
// HTTP client
// =============================================================================

/// Completion client backed by the server's `/v1/chat/completions`.
pub struct HttpCompletionClient {
    client: reqwest::Client,
    config: ChatLlmConfig,
}

impl std::fmt::Debug for HttpCompletionClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpCompletionClient")
            .field("base_url", &self.config.base_url)
            .field("model", &self.config.model)
            .finish()
    }
}

impl HttpCompletionClient {
    /// Create a new client for the given configuration.
    ///
    /// # Errors
    /// Returns `ParleyError::Config` if the HTTP client cannot be built.
    pub fn new(config: ChatLlmConfig) -> Result<Self, ParleyError> {
        let mut builder = reqwest::Client::builder();
        if config.timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(config.timeout_secs));
        }
        let client = builder
            .build()
            .map_err(|e| ParleyError::Config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ChatLlmConfig {
        &self.config
    }

    fn url(&self) -> String {
        format!(
            "{}{}",
            self.config.base_url.trim_end_matches('/'),
            COMPLETIONS_PATH
        )
    }

    /// Send `history` and return the reply, or the error placeholder text
    /// ("An error occurred: ...") if the exchange failed. Never fails.
    pub async fn complete(&self, history: &[Message]) -> String {
        match self.try_complete(history).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::warn!(error = %e, "Chat completion failed");
                e.placeholder()
            }
        }
    }
}

impl CompletionService for HttpCompletionClient {
    async fn try_complete(&self, history: &[Message]) -> Result<String, ParleyError> {
        let body = ChatCompletionRequest {
            messages: history,
            model: &self.config.model,
            stream: false,
        };

        tracing::debug!(
            messages = history.len(),
            model = %self.config.model,
            "Generating chat completion"
        );

        let response = self
            .client
            .post(self.url())
            .json(&body)
            .send()
            .await
            .map_err(|e| ParleyError::Network(format!("Completion request failed: {}", e)))?;

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            ParleyError::Network(format!("Failed to read completion response: {}", e))
        })?;
        if !status.is_success() {
            return Err(ParleyError::Network(format!(
                "Completion server returned HTTP {}: {}",
                status.as_u16(),
                extract_error_message(&text)
            )));
        }

        extract_reply(&text)
    }
}

// =============================================================================
// Tests
// =============================================================================
