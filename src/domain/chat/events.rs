//! Outbound events produced by the relay core.
//!
//! This is the internal vocabulary. The transport adapter turns each
//! variant into a named wire event.

use crate::domain::session::Username;

use super::{ChatMessage, RoomName};

/// An event delivered to one or more sessions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutboundEvent {
    /// A routed chat message (`response` on the wire).
    Response { username: Username, message: String },
    /// A session became active.
    UserJoined { username: Username },
    /// An active session disconnected.
    UserLeft { username: Username },
    /// A session joined a room.
    RoomJoined { room: RoomName, username: Username },
    /// A session left a room.
    RoomLeft { room: RoomName, username: Username },
}

impl OutboundEvent {
    pub fn response(message: &ChatMessage) -> Self {
        OutboundEvent::Response {
            username: message.sender_username().clone(),
            message: message.body().to_string(),
        }
    }

    /// Wire name of the event, also used as a log field.
    pub fn name(&self) -> &'static str {
        match self {
            OutboundEvent::Response { .. } => "response",
            OutboundEvent::UserJoined { .. } => "user_joined",
            OutboundEvent::UserLeft { .. } => "user_left",
            OutboundEvent::RoomJoined { .. } => "room_joined",
            OutboundEvent::RoomLeft { .. } => "room_left",
        }
    }
}
