//! UseCase layer error types.

use thiserror::Error;

use crate::domain::{CommandError, DomainError};

/// Reasons an issued command is dropped before routing
///
/// Neither is fatal: the handler logs them and carries on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("Invalid command: {0}")]
    InvalidCommand(#[from] CommandError),

    #[error("Invalid target: {0}")]
    InvalidTarget(#[from] DomainError),
}
