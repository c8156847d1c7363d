//! Relay limits configuration

use serde::Deserialize;

use crate::application::RelayLimits;
use crate::domain::chat::{DEFAULT_MAX_MESSAGE_BYTES, DEFAULT_MAX_ROOM_NAME_CHARS};
use crate::domain::session::DEFAULT_MAX_USERNAME_CHARS;

use super::error::ValidationError;

const MESSAGE_BYTES_CEILING: usize = 1024 * 1024;

/// Input limits for chat traffic
#[derive(Debug, Clone, Deserialize)]
pub struct RelayConfig {
    /// Largest accepted message body, in bytes
    #[serde(default = "default_max_message_bytes")]
    pub max_message_bytes: usize,

    /// Longest accepted username, in characters
    #[serde(default = "default_max_username_chars")]
    pub max_username_chars: usize,

    /// Longest accepted room name, in characters
    #[serde(default = "default_max_room_name_chars")]
    pub max_room_name_chars: usize,
}

impl RelayConfig {
    pub fn limits(&self) -> RelayLimits {
        RelayLimits {
            max_message_bytes: self.max_message_bytes,
            max_username_chars: self.max_username_chars,
            max_room_name_chars: self.max_room_name_chars,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.max_message_bytes == 0 {
            return Err(ValidationError::ZeroLimit("relay.max_message_bytes"));
        }
        if self.max_message_bytes > MESSAGE_BYTES_CEILING {
            return Err(ValidationError::MessageLimitTooLarge);
        }
        if self.max_username_chars == 0 {
            return Err(ValidationError::ZeroLimit("relay.max_username_chars"));
        }
        if self.max_room_name_chars == 0 {
            return Err(ValidationError::ZeroLimit("relay.max_room_name_chars"));
        }
        Ok(())
    }
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            max_message_bytes: default_max_message_bytes(),
            max_username_chars: default_max_username_chars(),
            max_room_name_chars: default_max_room_name_chars(),
        }
    }
}

fn default_max_message_bytes() -> usize {
    DEFAULT_MAX_MESSAGE_BYTES
}

fn default_max_username_chars() -> usize {
    DEFAULT_MAX_USERNAME_CHARS
}

fn default_max_room_name_chars() -> usize {
    DEFAULT_MAX_ROOM_NAME_CHARS
}
