//! EventSink port - Interface for delivering outbound events to sessions.
//!
//! The relay core decides *who* receives an event; the sink owns *how* it
//! reaches them. Implementations must never block: a recipient that cannot
//! take the event right now is a delivery failure, not a wait.

use thiserror::Error;

use crate::domain::chat::OutboundEvent;
use crate::domain::foundation::SessionId;

/// Reasons a single delivery can fail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeliveryError {
    /// No transport connection is registered for the session.
    #[error("No connection for session {0}")]
    NotConnected(SessionId),

    /// The session's outbound buffer is full.
    #[error("Outbound buffer full for session {0}")]
    BufferFull(SessionId),

    /// The session's connection has already shut down.
    #[error("Connection closed for session {0}")]
    Closed(SessionId),

    /// The event could not be encoded for the wire.
    #[error("Failed to encode event: {0}")]
    Encode(String),
}

/// Port for delivering events to connected sessions.
///
/// Implementations must ensure:
/// - `deliver` returns immediately (no waiting on slow recipients)
/// - `disconnect` is idempotent and eventually drives the session through
///   the normal disconnect path
///
/// # Example
///
/// ```ignore
/// let failed = sink.deliver_many(&recipients, &event);
/// for (id, _) in &failed {
///     sink.disconnect(id);
/// }
/// ```
pub trait EventSink: Send + Sync {
    /// Deliver one event to one session.
    fn deliver(&self, to: &SessionId, event: &OutboundEvent) -> Result<(), DeliveryError>;

    /// Deliver one event to many sessions, returning the failures.
    ///
    /// A failure for one recipient never stops delivery to the rest.
    /// Adapters may override this to encode the event once.
    fn deliver_many(
        &self,
        recipients: &[SessionId],
        event: &OutboundEvent,
    ) -> Vec<(SessionId, DeliveryError)> {
        recipients
            .iter()
            .filter_map(|id| self.deliver(id, event).err().map(|e| (*id, e)))
            .collect()
    }

    /// Force the session's connection closed.
    ///
    /// Used after a delivery failure: the recipient is treated as gone.
    fn disconnect(&self, id: &SessionId);
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    // Compile-time check that trait is object-safe
    #[allow(dead_code)]
    fn assert_object_safe(_: &dyn EventSink) {}

    /// Sink that fails for one configured session.
    struct FlakySink {
        broken: SessionId,
        delivered: Mutex<Vec<SessionId>>,
    }

    impl EventSink for FlakySink {
        fn deliver(&self, to: &SessionId, _event: &OutboundEvent) -> Result<(), DeliveryError> {
            if *to == self.broken {
                return Err(DeliveryError::Closed(*to));
            }
            self.delivered.lock().push(*to);
            Ok(())
        }

        fn disconnect(&self, _id: &SessionId) {}
    }

    #[test]
    fn default_deliver_many_continues_past_failures() {
        use crate::domain::session::{Username, DEFAULT_MAX_USERNAME_CHARS};

        let ok_a = SessionId::new();
        let broken = SessionId::new();
        let ok_b = SessionId::new();
        let sink = FlakySink {
            broken,
            delivered: Mutex::new(Vec::new()),
        };
        let event = OutboundEvent::UserJoined {
            username: Username::parse("alice", DEFAULT_MAX_USERNAME_CHARS).unwrap(),
        };

        let failed = sink.deliver_many(&[ok_a, broken, ok_b], &event);

        assert_eq!(failed, vec![(broken, DeliveryError::Closed(broken))]);
        assert_eq!(*sink.delivered.lock(), vec![ok_a, ok_b]);
    }
}
