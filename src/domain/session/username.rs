//! Username value object.

use serde::Serialize;
use std::fmt;

use crate::domain::foundation::ValidationError;

/// Default upper bound on username length, in characters.
pub const DEFAULT_MAX_USERNAME_CHARS: usize = 32;

/// A display name claimed by an active session.
///
/// Surrounding whitespace is stripped. The result is non-empty, bounded in
/// length and free of control characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Username(String);

impl Username {
    /// Validates and normalizes a raw username.
    pub fn parse(raw: &str, max_chars: usize) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field("username"));
        }

        let chars = trimmed.chars().count();
        if chars > max_chars {
            return Err(ValidationError::too_long("username", max_chars, chars));
        }

        if trimmed.chars().any(char::is_control) {
            return Err(ValidationError::invalid_format(
                "username",
                "contains control characters",
            ));
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
