use thiserror::Error;

/// Prefix of the text shown in place of a reply when an exchange fails.
pub const PLACEHOLDER_PREFIX: &str = "An error occurred";

/// Top-level error type for Parley.
///
/// The first three variants are the failure taxonomy shared by the
/// completion and transcription clients; the rest cover configuration and
/// local I/O. Client crates classify their transport errors into these
/// variants at the boundary so callers never see a raw `reqwest::Error`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ParleyError {
    /// The server could not be reached, or answered with a non-success status.
    #[error("Network error: {0}")]
    Network(String),

    /// The server answered, but the body was not the expected shape.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// There was nothing to submit.
    #[error("Empty input: {0}")]
    EmptyInput(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl ParleyError {
    /// Text rendered in the conversation instead of a reply.
    pub fn placeholder(&self) -> String {
        format!("{}: {}", PLACEHOLDER_PREFIX, self)
    }
}

impl From<toml::de::Error> for ParleyError {
    fn from(err: toml::de::Error) -> Self {
        ParleyError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for ParleyError {
    fn from(err: toml::ser::Error) -> Self {
        ParleyError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for ParleyError {
    fn from(err: serde_json::Error) -> Self {
        ParleyError::Serialization(err.to_string())
    }
}

/// A specialized `Result` type for Parley operations.
pub type Result<T> = std::result::Result<T, ParleyError>;
