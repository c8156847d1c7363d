//! Transient chat message.

use crate::domain::session::Username;

use super::RouterError;

/// Default upper bound on a message body, in bytes.
pub const DEFAULT_MAX_MESSAGE_BYTES: usize = 4096;

/// A validated message on its way to recipients. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    sender_username: Username,
    body: String,
}

impl ChatMessage {
    /// Build a message, copying the sender's username at send time.
    ///
    /// The body is forwarded as typed; only the emptiness check trims.
    ///
    /// # Errors
    ///
    /// - `EmptyMessage` if the body is empty or whitespace only
    /// - `TooLarge` if the body exceeds `max_bytes`
    pub fn compose(
        sender_username: Username,
        body: impl Into<String>,
        max_bytes: usize,
    ) -> Result<Self, RouterError> {
        let body = body.into();
        if body.trim().is_empty() {
            return Err(RouterError::EmptyMessage);
        }
        if body.len() > max_bytes {
            return Err(RouterError::TooLarge {
                size: body.len(),
                max: max_bytes,
            });
        }
        Ok(Self {
            sender_username,
            body,
        })
    }

    pub fn sender_username(&self) -> &Username {
        &self.sender_username
    }

    pub fn body(&self) -> &str {
        &self.body
    }
}
