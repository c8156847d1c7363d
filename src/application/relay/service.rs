//! ChatRelay - the facade the transport adapter drives.
//!
//! Maps each inbound connection event onto the registry, router, presence
//! notifier and room coordinator.

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::foundation::SessionId;
use crate::domain::session::Username;
use crate::ports::EventSink;

use super::errors::RelayError;
use super::fan_out::BroadcastReport;
use super::presence::PresenceNotifier;
use super::registry::SessionRegistry;
use super::rooms::RoomCoordinator;
use super::router::MessageRouter;
use super::RelayLimits;

pub struct ChatRelay {
    limits: RelayLimits,
    registry: Arc<SessionRegistry>,
    router: MessageRouter,
    presence: PresenceNotifier,
    rooms: RoomCoordinator,
}

impl ChatRelay {
    pub fn new(sink: Arc<dyn EventSink>, limits: RelayLimits) -> Self {
        let registry = Arc::new(SessionRegistry::new(limits.max_username_chars));
        Self {
            router: MessageRouter::new(
                Arc::clone(&registry),
                Arc::clone(&sink),
                limits.max_message_bytes,
            ),
            presence: PresenceNotifier::new(Arc::clone(&registry), Arc::clone(&sink)),
            rooms: RoomCoordinator::new(Arc::clone(&registry), sink, limits.max_room_name_chars),
            registry,
            limits,
        }
    }

    pub fn limits(&self) -> RelayLimits {
        self.limits
    }

    pub fn registry(&self) -> &Arc<SessionRegistry> {
        &self.registry
    }

    /// A transport connection was accepted.
    pub fn connect(&self) -> SessionId {
        let id = self.registry.create_session();
        info!(session_id = %id, "client connected");
        id
    }

    /// `set_username`: claim a name, then announce the join.
    pub fn set_username(&self, id: &SessionId, name: &str) -> Result<Username, RelayError> {
        let username = self.registry.set_username(id, name)?;
        let _ = self.presence.announce_join(id);
        Ok(username)
    }

    /// `message`: route a chat message to every other active session.
    pub fn send_message(&self, id: &SessionId, body: &str) -> Result<BroadcastReport, RelayError> {
        Ok(self.router.route_message(id, body)?)
    }

    /// `join_room`
    pub fn join_room(&self, id: &SessionId, room: &str) -> Result<BroadcastReport, RelayError> {
        Ok(self.rooms.join_room(id, room)?)
    }

    /// `leave_room`
    pub fn leave_room(&self, id: &SessionId, room: &str) -> Result<BroadcastReport, RelayError> {
        Ok(self.rooms.leave_room(id, room)?)
    }

    /// The transport connection is gone.
    ///
    /// Removes the session and, if it was active, announces the departure
    /// once. Repeated calls for the same id do nothing.
    pub fn disconnect(&self, id: &SessionId) -> Option<Username> {
        let closed = self.registry.remove_session(id)?;
        info!(session_id = %id, "client disconnected");

        match closed.username {
            Some(username) => {
                let _ = self.presence.announce_leave(id, &username);
                Some(username)
            }
            None => {
                debug!(session_id = %id, "unnamed session closed, no leave notice");
                None
            }
        }
    }
}
