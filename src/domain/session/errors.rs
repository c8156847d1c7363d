//! Session registry error types.

use thiserror::Error;

use crate::domain::foundation::{ErrorCode, SessionId, ValidationError};

use super::SessionStatus;

/// Errors raised by session lifecycle operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// No live session has this id (never created, or already closed).
    #[error("Session not found: {0}")]
    UnknownSession(SessionId),

    /// The session is not in the state the operation requires.
    #[error("Session {id} is {status}; a username can only be set once")]
    InvalidState { id: SessionId, status: SessionStatus },

    /// Another active session already holds this username.
    #[error("Username '{0}' is already taken")]
    UsernameTaken(String),

    /// The requested username failed validation.
    #[error("Invalid username: {0}")]
    InvalidUsername(#[from] ValidationError),
}

impl RegistryError {
    pub fn code(&self) -> ErrorCode {
        match self {
            RegistryError::UnknownSession(_) => ErrorCode::UnknownSession,
            RegistryError::InvalidState { .. } => ErrorCode::InvalidState,
            RegistryError::UsernameTaken(_) => ErrorCode::UsernameTaken,
            RegistryError::InvalidUsername(_) => ErrorCode::InvalidUsername,
        }
    }
}
