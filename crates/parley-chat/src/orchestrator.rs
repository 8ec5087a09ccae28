//! Chat orchestrator: the submit pipeline a UI runs on every user event.
//!
//! Picks the submission field for the session's input mode, transcribes
//! voice input, appends the user message, asks the completion service for a
//! reply and appends it. Failures are shown as a placeholder in the session
//! transcript and never abort the interaction loop.

use parley_core::error::ParleyError;
use parley_core::types::{InputMode, Message, Submission, TranscriptionRequest};
use parley_whisper::TranscriptionService;

use crate::completion::CompletionService;
use crate::context::ConversationSession;

/// Result of one submission.
#[derive(Debug)]
pub enum TurnOutcome {
    /// Nothing to submit for the current input mode; the session is unchanged.
    Skipped,
    /// The exchange succeeded and both messages were recorded.
    Replied { user: Message, reply: Message },
    /// The exchange failed. `user` is set when the user message had already
    /// been recorded (i.e. transcription succeeded or input was typed).
    Failed {
        user: Option<Message>,
        error: ParleyError,
    },
}

impl TurnOutcome {
    /// Text shown in the assistant's slot: the reply, or the error placeholder.
    pub fn display_text(&self) -> Option<String> {
        match self {
            TurnOutcome::Skipped => None,
            TurnOutcome::Replied { reply, .. } => Some(reply.content.clone()),
            TurnOutcome::Failed { error, .. } => Some(error.placeholder()),
        }
    }

    pub fn is_replied(&self) -> bool {
        matches!(self, TurnOutcome::Replied { .. })
    }
}

/// Central coordinator wiring transcription and completion to a session.
pub struct ChatOrchestrator<C, T> {
    completion: C,
    transcription: T,
}

impl<C, T> ChatOrchestrator<C, T>
where
    C: CompletionService,
    T: TranscriptionService,
{
    pub fn new(completion: C, transcription: T) -> Self {
        Self {
            completion,
            transcription,
        }
    }

    pub fn completion(&self) -> &C {
        &self.completion
    }

    pub fn transcription(&self) -> &T {
        &self.transcription
    }

    /// Handle a submit event for `session`.
    ///
    /// Keyboard mode reads `submission.text`, voice mode reads
    /// `submission.audio`; the other field is ignored.
    pub async fn submit(
        &self,
        session: &mut ConversationSession,
        submission: Submission,
    ) -> TurnOutcome {
        let text = match session.input_mode {
            InputMode::Keyboard => match submission.text {
                Some(text) if !text.trim().is_empty() => text,
                _ => {
                    tracing::debug!(session_id = %session.id, "Empty text submission skipped");
                    return TurnOutcome::Skipped;
                }
            },
            InputMode::Voice => {
                let request = TranscriptionRequest {
                    audio: submission.audio,
                    language: Some(session.language),
                };
                if request.is_empty() {
                    tracing::debug!(session_id = %session.id, "No recording submitted");
                    return TurnOutcome::Skipped;
                }
                match self.transcribe(&request).await {
                    Ok(text) => text,
                    Err(error) => {
                        tracing::warn!(session_id = %session.id, error = %error, "Transcription failed");
                        session.record_placeholder(error.placeholder());
                        return TurnOutcome::Failed { user: None, error };
                    }
                }
            }
        };

        self.exchange(session, text).await
    }

    /// Append `text` as a user message and fetch the assistant's reply.
    pub async fn exchange(&self, session: &mut ConversationSession, text: String) -> TurnOutcome {
        tracing::info!(session_id = %session.id, content = %text, "User message");
        let user = Message::user(text);
        session.record_user(user.clone());

        match self.completion.try_complete(session.history().snapshot()).await {
            Ok(content) => {
                tracing::info!(session_id = %session.id, content = %content, "Assistant reply");
                let reply = Message::assistant(content);
                session.record_reply(reply.clone());
                TurnOutcome::Replied { user, reply }
            }
            Err(error) => {
                tracing::warn!(session_id = %session.id, error = %error, "Chat completion failed");
                session.record_placeholder(error.placeholder());
                TurnOutcome::Failed {
                    user: Some(user),
                    error,
                }
            }
        }
    }

    async fn transcribe(&self, request: &TranscriptionRequest) -> Result<String, ParleyError> {
        let text = self.transcription.transcribe(request).await?;
        if text.trim().is_empty() {
            return Err(ParleyError::EmptyInput(
                "transcription produced no text".to_string(),
            ));
        }
        Ok(text)
    }
}

// =============================================================================
// Tests
// =============================================================================
