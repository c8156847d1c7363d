//! Error types for the domain layer.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Errors that occur during value object construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' must be at most {max} characters, got {actual}")]
    TooLong {
        field: String,
        max: usize,
        actual: usize,
    },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates a length validation error.
    pub fn too_long(field: impl Into<String>, max: usize, actual: usize) -> Self {
        ValidationError::TooLong {
            field: field.into(),
            max,
            actual,
        }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Stable error codes reported to clients in `error` events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Registry errors
    UnknownSession,
    InvalidState,
    UsernameTaken,
    InvalidUsername,

    // Routing errors
    NotActive,
    EmptyMessage,
    TooLarge,

    // Room errors
    InvalidRoomName,
    NotInRoom,

    // Transport errors
    MalformedEvent,
}

impl ErrorCode {
    /// Wire representation of the code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::UnknownSession => "UNKNOWN_SESSION",
            ErrorCode::InvalidState => "INVALID_STATE",
            ErrorCode::UsernameTaken => "USERNAME_TAKEN",
            ErrorCode::InvalidUsername => "INVALID_USERNAME",
            ErrorCode::NotActive => "NOT_ACTIVE",
            ErrorCode::EmptyMessage => "EMPTY_MESSAGE",
            ErrorCode::TooLarge => "TOO_LARGE",
            ErrorCode::InvalidRoomName => "INVALID_ROOM_NAME",
            ErrorCode::NotInRoom => "NOT_IN_ROOM",
            ErrorCode::MalformedEvent => "MALFORMED_EVENT",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
