//! WebSocket message types for the chat protocol.
//!
//! Every frame is a JSON text frame of the form `{"event": name, "data": payload}`:
//! - Client → Server: username registration, chat messages, room membership, pings
//! - Server → Client: connection confirmation, relayed events, errors, pongs

use serde::{Deserialize, Serialize};

use crate::domain::chat::{OutboundEvent, RoomName};
use crate::domain::foundation::{ErrorCode, SessionId};
use crate::domain::session::Username;

// ============================================
// Client → Server Messages
// ============================================

/// Events a client may send. Anything else is a malformed frame.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ClientEvent {
    /// Claim a username and become active.
    SetUsername(String),

    /// Broadcast a chat message to every other active session.
    Message(String),

    /// Join a named room.
    JoinRoom(String),

    /// Leave a named room.
    LeaveRoom(String),

    /// Application-level heartbeat.
    Ping,
}

impl ClientEvent {
    /// Decode one text frame.
    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Event name, for logging.
    pub fn name(&self) -> &'static str {
        match self {
            ClientEvent::SetUsername(_) => "set_username",
            ClientEvent::Message(_) => "message",
            ClientEvent::JoinRoom(_) => "join_room",
            ClientEvent::LeaveRoom(_) => "leave_room",
            ClientEvent::Ping => "ping",
        }
    }
}

// ============================================
// Server → Client Messages
// ============================================

/// All message types that can be sent from server to client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Connection established; carries the session's identifier.
    Connected { session_id: SessionId },

    /// A chat message from another session.
    Response { username: Username, message: String },

    /// A session became active.
    UserJoined { username: Username },

    /// An active session disconnected.
    UserLeft { username: Username },

    /// A session joined a room the recipient is in.
    RoomJoined { room: RoomName, username: Username },

    /// A session left a room the recipient is in.
    RoomLeft { room: RoomName, username: Username },

    /// Heartbeat response.
    Pong,

    /// A request from this client was rejected.
    Error { code: ErrorCode, message: String },
}

impl ServerMessage {
    /// Create an error message.
    pub fn error(code: ErrorCode, message: impl Into<String>) -> Self {
        ServerMessage::Error {
            code,
            message: message.into(),
        }
    }

    /// Encode as a text frame payload.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl From<&OutboundEvent> for ServerMessage {
    fn from(event: &OutboundEvent) -> Self {
        match event {
            OutboundEvent::Response { username, message } => ServerMessage::Response {
                username: username.clone(),
                message: message.clone(),
            },
            OutboundEvent::UserJoined { username } => ServerMessage::UserJoined {
                username: username.clone(),
            },
            OutboundEvent::UserLeft { username } => ServerMessage::UserLeft {
                username: username.clone(),
            },
            OutboundEvent::RoomJoined { room, username } => ServerMessage::RoomJoined {
                room: room.clone(),
                username: username.clone(),
            },
            OutboundEvent::RoomLeft { room, username } => ServerMessage::RoomLeft {
                room: room.clone(),
                username: username.clone(),
            },
        }
    }
}
