//! Parley application binary - composition root.
//!
//! 1. Parse CLI flags and load configuration from TOML
//! 2. Build the completion client and transcription backend
//! 3. Run the terminal chat loop until `/quit` or end of input

mod cli;
mod repl;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};

use parley_chat::{ChatLlmConfig, ChatOrchestrator, ConversationSession, HttpCompletionClient, TurnOutcome};
use parley_core::config::ParleyConfig;
use parley_core::types::{InputMode, Submission};
use parley_whisper::{TranscriptionBackend, TranscriptionService};

use cli::CliArgs;
use repl::{Command, HELP};

/// Run one submission and print what the chat display would show.
async fn submit_and_print<C, T>(
    orchestrator: &ChatOrchestrator<C, T>,
    session: &mut ConversationSession,
    submission: Submission,
) where
    C: parley_chat::CompletionService,
    T: TranscriptionService,
{
    let voice = session.input_mode == InputMode::Voice;
    let outcome = orchestrator.submit(session, submission).await;

    match &outcome {
        TurnOutcome::Skipped => {
            println!("(nothing to send)");
            return;
        }
        TurnOutcome::Replied { user, .. } | TurnOutcome::Failed { user: Some(user), .. } if voice => {
            println!("{}", repl::render_message(user));
        }
        _ => {}
    }
    if let Some(text) = outcome.display_text() {
        println!("assistant> {}", text);
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    let config_file = args.resolve_config_path();
    let mut config = ParleyConfig::load_or_default(&config_file);
    config.server.base_url = args.resolve_base_url(&config.server.base_url);
    if args.mock_transcription {
        config.transcription.backend = "mock".to_string();
    }

    let log_level = args.resolve_log_level(&config.general.log_level);
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!(path = %config_file.display(), "Configuration loaded");

    let completion = HttpCompletionClient::new(ChatLlmConfig::from_app_config(&config))?;
    let transcription = TranscriptionBackend::from_app_config(&config)?;
    tracing::info!(
        base_url = %completion.config().base_url,
        model = %completion.config().model,
        transcription = transcription.name(),
        "Parley ready"
    );
    let orchestrator = ChatOrchestrator::new(completion, transcription);

    let language = args.resolve_language(config.transcription.default_voice_language());
    let mut session = ConversationSession::new(config.completion.system_prompt.clone())
        .with_input_mode(args.input_mode())
        .with_language(language);
    tracing::info!(session_id = %session.id, mode = %session.input_mode, language = %session.language, "Session started");

    println!("Parley - type /help for commands.");
    println!("Input mode: {}, voice language: {}", session.input_mode, session.language);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match repl::parse_line(&line) {
            Command::Empty => {}
            Command::Submit(text) => {
                let submission = repl::submission_for(session.input_mode, text);
                submit_and_print(&orchestrator, &mut session, submission).await;
            }
            Command::Voice(path) => {
                let previous = session.input_mode;
                session.input_mode = InputMode::Voice;
                submit_and_print(&orchestrator, &mut session, Submission::audio(path)).await;
                session.input_mode = previous;
            }
            Command::SetMode(mode) => {
                session.input_mode = mode;
                println!("Input mode: {}", mode);
            }
            Command::SetLanguage(language) => {
                session.language = language;
                println!("Voice language: {}", language);
            }
            Command::History => {
                for message in session.transcript() {
                    println!("{}", repl::render_message(message));
                }
            }
            Command::Help => println!("{}", HELP),
            Command::Quit => break,
            Command::Invalid(msg) => println!("{}", msg),
        }
    }

    tracing::info!(
        session_id = %session.id,
        messages = session.history().len(),
        "Parley shutting down"
    );
    Ok(())
}
