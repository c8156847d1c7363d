//! Relay-level error type returned to the transport adapter.

use thiserror::Error;

use crate::domain::chat::{RoomError, RouterError};
use crate::domain::foundation::ErrorCode;
use crate::domain::session::RegistryError;

/// Any client-input error the relay reports back to the offending sender.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RelayError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Router(#[from] RouterError),

    #[error(transparent)]
    Room(#[from] RoomError),
}

impl RelayError {
    /// Stable code for the wire `error` event.
    pub fn code(&self) -> ErrorCode {
        match self {
            RelayError::Registry(e) => e.code(),
            RelayError::Router(e) => e.code(),
            RelayError::Room(e) => e.code(),
        }
    }
}
