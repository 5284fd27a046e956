//! Error types for the Marionette clients.

use thiserror::Error;

/// Connection-level errors of a viewer or operator session
#[derive(Debug, Error)]
pub enum ClientError {
    /// Connection error
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// A frame could not be encoded or decoded
    #[error("Frame error: {0}")]
    Frame(#[from] serde_json::Error),

    /// Operator passphrase did not match
    #[error("Access denied: wrong passphrase")]
    AccessDenied,

    #[error("Input error: {0}")]
    Input(String),
}

/// Failure of a local side effect (audio, speech, navigation)
///
/// Always logged by the reconciler, never sent back to the server.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlatformError {
    #[error("Playback failed for '{url}': {reason}")]
    Playback { url: String, reason: String },

    #[error("Speech output unavailable: {0}")]
    Speech(String),

    #[error("Navigation to '{url}' failed: {reason}")]
    Navigation { url: String, reason: String },
}

/// Persisted identity could not be read or written
#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("Identity file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Identity file is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Operator console input that could not be turned into a frame
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConsoleError {
    #[error("Empty input")]
    Empty,

    #[error("Unknown command '{0}' (type 'help')")]
    UnknownCommand(String),

    #[error("'{kind}' expects {expected}")]
    InvalidPayload {
        kind: &'static str,
        expected: &'static str,
    },

    #[error("Missing target after '@'")]
    MissingTarget,

    #[error("No session matches '{0}'")]
    NoMatchingSession(String),

    #[error("'{0}' matches more than one session")]
    AmbiguousTarget(String),

    #[error("Usage: {0}")]
    Usage(&'static str),
}
