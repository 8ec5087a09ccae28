//! Conversational core for Parley.
//!
//! Holds the per-session conversation history, talks to the chat completion
//! endpoint, and runs the submit pipeline (optional transcription, then
//! completion) that a UI drives on every user event.

pub mod completion;
pub mod context;
pub mod orchestrator;

pub use completion::{ChatLlmConfig, CompletionService, HttpCompletionClient};
pub use context::{ConversationSession, ConversationStore};
pub use orchestrator::{ChatOrchestrator, TurnOutcome};
