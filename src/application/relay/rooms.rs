//! Room coordinator: named sub-groups with their own join/leave notices.
//!
//! Rooms only scope `room_joined` and `room_left`. Chat messages stay global.

use std::sync::Arc;

use tracing::info;

use crate::domain::chat::{OutboundEvent, RoomError, RoomName};
use crate::domain::foundation::SessionId;
use crate::ports::EventSink;

use super::fan_out::{fan_out, BroadcastReport};
use super::registry::SessionRegistry;

pub struct RoomCoordinator {
    registry: Arc<SessionRegistry>,
    sink: Arc<dyn EventSink>,
    max_room_name_chars: usize,
}

impl RoomCoordinator {
    pub fn new(
        registry: Arc<SessionRegistry>,
        sink: Arc<dyn EventSink>,
        max_room_name_chars: usize,
    ) -> Self {
        Self {
            registry,
            sink,
            max_room_name_chars,
        }
    }

    /// Join a room and announce it to every member, the joiner included.
    ///
    /// Joining a room twice is accepted silently.
    pub fn join_room(&self, id: &SessionId, room: &str) -> Result<BroadcastReport, RoomError> {
        let room = RoomName::parse(room, self.max_room_name_chars)?;
        let change = self.registry.join_room(id, room.clone())?;
        if !change.changed {
            return Ok(BroadcastReport::default());
        }

        info!(session_id = %id, room = %room, username = %change.username, "joined room");
        Ok(fan_out(
            self.sink.as_ref(),
            &change.members,
            &OutboundEvent::RoomJoined {
                room,
                username: change.username,
            },
        ))
    }

    /// Leave a room and announce it to the members that remain.
    pub fn leave_room(&self, id: &SessionId, room: &str) -> Result<BroadcastReport, RoomError> {
        let room = RoomName::parse(room, self.max_room_name_chars)?;
        let change = self.registry.leave_room(id, &room)?;

        info!(session_id = %id, room = %room, username = %change.username, "left room");
        Ok(fan_out(
            self.sink.as_ref(),
            &change.members,
            &OutboundEvent::RoomLeft {
                room,
                username: change.username,
            },
        ))
    }
}
