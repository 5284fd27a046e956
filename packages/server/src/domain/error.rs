//! Domain-level error types.

use thiserror::Error;

/// Value object construction errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("Session ID must not be empty")]
    EmptySessionId,

    #[error("Unknown effect name '{0}'")]
    UnknownEffect(String),
}

/// Errors raised while building a [`super::Command`] from a raw kind and payload
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Unknown command kind '{0}'")]
    UnknownKind(String),

    #[error("Command '{kind}' expects {expected} payload")]
    InvalidPayload {
        kind: &'static str,
        expected: &'static str,
    },
}

/// Message delivery errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    #[error("Client '{0}' not found")]
    ClientNotFound(String),

    #[error("Failed to push message: {0}")]
    PushFailed(String),
}
