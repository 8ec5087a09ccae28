//! Conversation state.
//!
//! [`ConversationStore`] is the model-facing history: seeded with a system
//! message and only ever appended to. [`ConversationSession`] wraps it with
//! the per-UI-session state: input mode, voice language, and the display
//! transcript the chat widget renders.

use chrono::Local;
use uuid::Uuid;

use parley_core::types::{InputMode, Message, VoiceLanguage};

// =============================================================================
// ConversationStore
// =============================================================================

/// Append-only, ordered log of role-tagged messages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversationStore {
    messages: Vec<Message>,
}

impl ConversationStore {
    /// Create a store seeded with a single system message.
    pub fn seeded(system_prompt: impl Into<String>) -> Self {
        Self {
            messages: vec![Message::system(system_prompt)],
        }
    }

    /// Add a message to the end of the log.
    pub fn append(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// The full ordered sequence, as sent to the completion endpoint.
    pub fn snapshot(&self) -> &[Message] {
        &self.messages
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

// =============================================================================
// ConversationSession
// =============================================================================

/// State owned by one UI session.
#[derive(Debug, Clone)]
pub struct ConversationSession {
    pub id: Uuid,
    pub started_at: i64,
    pub last_message_at: i64,
    /// Which submission field the pipeline reads.
    pub input_mode: InputMode,
    /// Language hint sent with voice submissions.
    pub language: VoiceLanguage,
    history: ConversationStore,
    transcript: Vec<Message>,
}

impl ConversationSession {
    /// Start a session whose history is seeded with `system_prompt`.
    pub fn new(system_prompt: impl Into<String>) -> Self {
        let now = Local::now().timestamp();
        Self {
            id: Uuid::new_v4(),
            started_at: now,
            last_message_at: now,
            input_mode: InputMode::default(),
            language: VoiceLanguage::default(),
            history: ConversationStore::seeded(system_prompt),
            transcript: Vec::new(),
        }
    }

    pub fn with_input_mode(mut self, mode: InputMode) -> Self {
        self.input_mode = mode;
        self
    }

    pub fn with_language(mut self, language: VoiceLanguage) -> Self {
        self.language = language;
        self
    }

    /// Model-facing history.
    pub fn history(&self) -> &ConversationStore {
        &self.history
    }

    /// What the chat display shows: user messages, replies and error
    /// placeholders, without the system message.
    pub fn transcript(&self) -> &[Message] {
        &self.transcript
    }

    /// Record a user message in both the history and the transcript.
    pub fn record_user(&mut self, message: Message) {
        self.touch();
        self.transcript.push(message.clone());
        self.history.append(message);
    }

    /// Record an assistant reply in both the history and the transcript.
    pub fn record_reply(&mut self, message: Message) {
        self.touch();
        self.transcript.push(message.clone());
        self.history.append(message);
    }

    /// Show `text` in the transcript as an assistant message without
    /// sending it to the model on later turns.
    pub fn record_placeholder(&mut self, text: impl Into<String>) {
        self.touch();
        self.transcript.push(Message::assistant(text));
    }

    fn touch(&mut self) {
        self.last_message_at = Local::now().timestamp();
    }
}

// =============================================================================
// Tests
// =============================================================================
