//! Message router: validates chat messages and fans them out.

use std::sync::Arc;

use tracing::debug;

use crate::domain::chat::{ChatMessage, OutboundEvent, RouterError};
use crate::domain::foundation::SessionId;
use crate::ports::EventSink;

use super::fan_out::{fan_out, BroadcastReport};
use super::registry::SessionRegistry;

/// Routes `message` events from one active session to all the others.
pub struct MessageRouter {
    registry: Arc<SessionRegistry>,
    sink: Arc<dyn EventSink>,
    max_message_bytes: usize,
}

impl MessageRouter {
    pub fn new(
        registry: Arc<SessionRegistry>,
        sink: Arc<dyn EventSink>,
        max_message_bytes: usize,
    ) -> Self {
        Self {
            registry,
            sink,
            max_message_bytes,
        }
    }

    /// Validate `body` and deliver it as `response` to every other active
    /// session. The sender never receives its own message.
    ///
    /// # Errors
    ///
    /// - `NotActive` if the sender has not claimed a username
    /// - `EmptyMessage` if the body is blank after trimming
    /// - `TooLarge` if the body exceeds the configured byte limit
    ///
    /// Delivery failures are reported in the returned `BroadcastReport`,
    /// never as an error.
    pub fn route_message(
        &self,
        sender: &SessionId,
        body: &str,
    ) -> Result<BroadcastReport, RouterError> {
        let (username, peers) = self
            .registry
            .active_with_peers(sender)
            .ok_or(RouterError::NotActive(*sender))?;

        let message = ChatMessage::compose(username, body, self.max_message_bytes)?;
        debug!(
            session_id = %sender,
            username = %message.sender_username(),
            bytes = message.body().len(),
            "routing message"
        );

        Ok(fan_out(
            self.sink.as_ref(),
            &peers,
            &OutboundEvent::response(&message),
        ))
    }
}
