//! Chat module - messages, rooms and the outbound event vocabulary.

mod errors;
mod events;
mod message;
mod room;

pub use errors::{RoomError, RouterError};
pub use events::OutboundEvent;
pub use message::{ChatMessage, DEFAULT_MAX_MESSAGE_BYTES};
pub use room::{RoomName, DEFAULT_MAX_ROOM_NAME_CHARS};
