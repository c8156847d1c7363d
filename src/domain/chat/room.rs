//! RoomName value object.

use std::fmt;

use serde::Serialize;

use crate::domain::foundation::ValidationError;

/// Default upper bound on room name length, in characters.
pub const DEFAULT_MAX_ROOM_NAME_CHARS: usize = 64;

/// Name of a chat room. Trimmed, non-empty, bounded.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RoomName(String);

impl RoomName {
    pub fn parse(raw: &str, max_chars: usize) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field("room"));
        }

        let chars = trimmed.chars().count();
        if chars > max_chars {
            return Err(ValidationError::too_long("room", max_chars, chars));
        }

        if trimmed.chars().any(char::is_control) {
            return Err(ValidationError::invalid_format(
                "room",
                "contains control characters",
            ));
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
