//! Line-oriented front end: turns terminal input into pipeline calls.
//!
//! Plain lines are submissions (typed text in keyboard mode, a path to a
//! recorded clip in voice mode). Lines starting with `/` are commands.

use std::path::PathBuf;

use parley_core::types::{InputMode, Message, Role, Submission, VoiceLanguage};

pub const HELP: &str = "\
Commands:
  /mode keyboard|voice   switch input mode
  /lang <language>       voice language (English, Chinese, Japanese)
  /voice <path>          submit a recorded audio file
  /history               show the conversation
  /help                  show this help
  /quit                  exit
In keyboard mode a plain line is sent as a message; in voice mode it is
read as the path of an audio file.";

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Submit the line for the current input mode.
    Submit(String),
    /// Submit an audio file.
    Voice(PathBuf),
    SetMode(InputMode),
    SetLanguage(VoiceLanguage),
    History,
    Help,
    Quit,
    /// Nothing to do (blank line).
    Empty,
    /// Unrecognised command or bad argument, with a message for the user.
    Invalid(String),
}

/// Parse one line of terminal input.
pub fn parse_line(line: &str) -> Command {
    let line = line.trim();
    if line.is_empty() {
        return Command::Empty;
    }
    let Some(rest) = line.strip_prefix('/') else {
        return Command::Submit(line.to_string());
    };

    let (name, arg) = match rest.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (rest, ""),
    };

    match name.to_ascii_lowercase().as_str() {
        "mode" => match InputMode::from_label(arg) {
            Some(mode) => Command::SetMode(mode),
            None => Command::Invalid(format!("unknown input mode '{}'", arg)),
        },
        "lang" | "language" if !arg.is_empty() => {
            Command::SetLanguage(VoiceLanguage::from_label(arg))
        }
        "lang" | "language" => Command::Invalid("usage: /lang <language>".to_string()),
        "voice" if !arg.is_empty() => Command::Voice(PathBuf::from(arg)),
        "voice" => Command::Invalid("usage: /voice <path>".to_string()),
        "history" => Command::History,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => Command::Invalid(format!("unknown command '/{}'", other)),
    }
}

/// Build the submission for a plain line in the given mode.
pub fn submission_for(mode: InputMode, line: String) -> Submission {
    match mode {
        InputMode::Keyboard => Submission::text(line),
        InputMode::Voice => Submission::audio(line),
    }
}

/// Render one transcript entry for the terminal.
pub fn render_message(message: &Message) -> String {
    let speaker = match message.role {
        Role::User => "you",
        Role::Assistant => "assistant",
        Role::System => "system",
    };
    format!("{}> {}", speaker, message.content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_line_is_submit() {
        assert_eq!(parse_line("  hello there "), Command::Submit("hello there".to_string()));
    }

    #[test]
    fn test_blank_line_is_empty() {
        assert_eq!(parse_line(""), Command::Empty);
        assert_eq!(parse_line("   \t"), Command::Empty);
    }

    #[test]
    fn test_mode_command() {
        assert_eq!(parse_line("/mode voice"), Command::SetMode(InputMode::Voice));
        assert_eq!(parse_line("/MODE Keyboard"), Command::SetMode(InputMode::Keyboard));
        assert!(matches!(parse_line("/mode smoke"), Command::Invalid(_)));
        assert!(matches!(parse_line("/mode"), Command::Invalid(_)));
    }

    #[test]
    fn test_lang_command() {
        assert_eq!(
            parse_line("/lang Chinese"),
            Command::SetLanguage(VoiceLanguage::Chinese)
        );
        assert_eq!(
            parse_line("/lang Esperanto"),
            Command::SetLanguage(VoiceLanguage::Japanese)
        );
        assert!(matches!(parse_line("/lang"), Command::Invalid(_)));
    }

    #[test]
    fn test_voice_command_keeps_path_with_spaces() {
        assert_eq!(
            parse_line("/voice /tmp/my clip.wav"),
            Command::Voice(PathBuf::from("/tmp/my clip.wav"))
        );
        assert!(matches!(parse_line("/voice"), Command::Invalid(_)));
    }

    #[test]
    fn test_simple_commands() {
        assert_eq!(parse_line("/history"), Command::History);
        assert_eq!(parse_line("/help"), Command::Help);
        assert_eq!(parse_line("/quit"), Command::Quit);
        assert_eq!(parse_line("/exit"), Command::Quit);
    }

    #[test]
    fn test_unknown_command() {
        match parse_line("/image on") {
            Command::Invalid(msg) => assert!(msg.contains("/image")),
            other => panic!("expected Invalid, got {:?}", other),
        }
    }

    #[test]
    fn test_submission_for_mode() {
        assert_eq!(
            submission_for(InputMode::Keyboard, "hi".to_string()),
            Submission::text("hi")
        );
        assert_eq!(
            submission_for(InputMode::Voice, "clip.wav".to_string()),
            Submission::audio("clip.wav")
        );
    }

    #[test]
    fn test_render_message() {
        assert_eq!(render_message(&Message::user("hi")), "you> hi");
        assert_eq!(render_message(&Message::assistant("yo")), "assistant> yo");
    }
}
