use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

// =============================================================================
// Enums
// =============================================================================

/// Author of a message in the conversation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the user is currently entering messages.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum InputMode {
    /// Typed text.
    #[default]
    Keyboard,
    /// Recorded audio, transcribed before sending.
    Voice,
}

impl InputMode {
    /// Parse a selector label such as "Keyboard" or "voice".
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "keyboard" | "text" => Some(InputMode::Keyboard),
            "voice" | "audio" => Some(InputMode::Voice),
            _ => None,
        }
    }
}

impl fmt::Display for InputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputMode::Keyboard => f.write_str("Keyboard"),
            InputMode::Voice => f.write_str("Voice"),
        }
    }
}

/// Spoken language hint passed to the transcription server.
///
/// Unknown labels fall back to Japanese, which is also the default.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum VoiceLanguage {
    English,
    Chinese,
    #[default]
    Japanese,
}

impl VoiceLanguage {
    /// Map a human-readable label (as shown in a language selector) to a language.
    ///
    /// Matching is case-insensitive and also accepts the short codes.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "english" | "en" => VoiceLanguage::English,
            "chinese" | "zh" => VoiceLanguage::Chinese,
            _ => VoiceLanguage::Japanese,
        }
    }

    /// Short code sent in the `language` form field.
    pub fn code(&self) -> &'static str {
        match self {
            VoiceLanguage::English => "en",
            VoiceLanguage::Chinese => "zh",
            VoiceLanguage::Japanese => "jp",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            VoiceLanguage::English => "English",
            VoiceLanguage::Chinese => "Chinese",
            VoiceLanguage::Japanese => "Japanese",
        }
    }
}

impl fmt::Display for VoiceLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Structs
// =============================================================================

/// A role-tagged unit of conversation text.
///
/// Serializes to the `{"role": ..., "content": ...}` shape used by
/// OpenAI-compatible chat endpoints.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}

/// One voice submission: the recorded clip and the language it was spoken in.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TranscriptionRequest {
    /// Path to the recorded audio file. `None` when nothing was recorded.
    pub audio: Option<PathBuf>,
    /// Language hint; `None` uses the default language.
    pub language: Option<VoiceLanguage>,
}

impl TranscriptionRequest {
    pub fn new(audio: impl Into<PathBuf>) -> Self {
        Self {
            audio: Some(audio.into()),
            language: None,
        }
    }

    pub fn with_language(mut self, language: VoiceLanguage) -> Self {
        self.language = Some(language);
        self
    }

    /// Code sent to the server for this request.
    pub fn language_code(&self) -> &'static str {
        self.language.unwrap_or_default().code()
    }

    /// True when there is no recording to send.
    pub fn is_empty(&self) -> bool {
        match &self.audio {
            None => true,
            Some(path) => path.as_os_str().is_empty(),
        }
    }
}

/// What the UI hands to the pipeline when the user presses submit.
///
/// Which field is used depends on the session's [`InputMode`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Submission {
    pub text: Option<String>,
    pub audio: Option<PathBuf>,
}

impl Submission {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            audio: None,
        }
    }

    pub fn audio(path: impl Into<PathBuf>) -> Self {
        Self {
            text: None,
            audio: Some(path.into()),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_serializes_openai_shape() {
        let msg = Message::user("hello");
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json, serde_json::json!({"role": "user", "content": "hello"}));
    }

    #[test]
    fn test_message_roundtrip_system_role() {
        let json = r#"{"role":"system","content":"be brief"}"#;
        let msg: Message = serde_json::from_str(json).unwrap();
        assert_eq!(msg, Message::system("be brief"));
    }

    #[test]
    fn test_unknown_role_rejected() {
        let json = r#"{"role":"tool","content":"x"}"#;
        assert!(serde_json::from_str::<Message>(json).is_err());
    }

    #[test]
    fn test_role_display() {
        assert_eq!(Role::System.to_string(), "system");
        assert_eq!(Role::User.to_string(), "user");
        assert_eq!(Role::Assistant.to_string(), "assistant");
    }

    #[test]
    fn test_language_codes() {
        assert_eq!(VoiceLanguage::from_label("English").code(), "en");
        assert_eq!(VoiceLanguage::from_label("Chinese").code(), "zh");
        assert_eq!(VoiceLanguage::from_label("Japanese").code(), "jp");
    }

    #[test]
    fn test_language_unknown_defaults_to_japanese() {
        assert_eq!(VoiceLanguage::from_label("Klingon"), VoiceLanguage::Japanese);
        assert_eq!(VoiceLanguage::from_label(""), VoiceLanguage::Japanese);
        assert_eq!(VoiceLanguage::default().code(), "jp");
    }

    #[test]
    fn test_language_label_case_insensitive() {
        assert_eq!(VoiceLanguage::from_label("  chinese "), VoiceLanguage::Chinese);
        assert_eq!(VoiceLanguage::from_label("EN"), VoiceLanguage::English);
    }

    #[test]
    fn test_input_mode_from_label() {
        assert_eq!(InputMode::from_label("Keyboard"), Some(InputMode::Keyboard));
        assert_eq!(InputMode::from_label("voice"), Some(InputMode::Voice));
        assert_eq!(InputMode::from_label("telepathy"), None);
        assert_eq!(InputMode::default(), InputMode::Keyboard);
    }

    #[test]
    fn test_transcription_request_language_code() {
        let req = TranscriptionRequest::new("clip.wav");
        assert_eq!(req.language_code(), "jp");
        let req = req.with_language(VoiceLanguage::English);
        assert_eq!(req.language_code(), "en");
    }

    #[test]
    fn test_transcription_request_empty() {
        assert!(TranscriptionRequest::default().is_empty());
        assert!(TranscriptionRequest::new("").is_empty());
        assert!(!TranscriptionRequest::new("clip.wav").is_empty());
    }
}
