//! Routing and room error types.

use thiserror::Error;

use crate::domain::foundation::{ErrorCode, SessionId, ValidationError};

/// Errors raised while routing a chat message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouterError {
    #[error("Session {0} must set a username before sending messages")]
    NotActive(SessionId),

    #[error("Message is empty")]
    EmptyMessage,

    #[error("Message is {size} bytes; the limit is {max}")]
    TooLarge { size: usize, max: usize },
}

impl RouterError {
    pub fn code(&self) -> ErrorCode {
        match self {
            RouterError::NotActive(_) => ErrorCode::NotActive,
            RouterError::EmptyMessage => ErrorCode::EmptyMessage,
            RouterError::TooLarge { .. } => ErrorCode::TooLarge,
        }
    }
}

/// Errors raised by room membership operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoomError {
    #[error("Session {0} must set a username before using rooms")]
    NotActive(SessionId),

    #[error("Invalid room name: {0}")]
    InvalidRoomName(#[from] ValidationError),

    #[error("Not a member of room '{0}'")]
    NotInRoom(String),
}

impl RoomError {
    pub fn code(&self) -> ErrorCode {
        match self {
            RoomError::NotActive(_) => ErrorCode::NotActive,
            RoomError::InvalidRoomName(_) => ErrorCode::InvalidRoomName,
            RoomError::NotInRoom(_) => ErrorCode::NotInRoom,
        }
    }
}
