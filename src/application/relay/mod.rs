//! Relay core: session registry, message router, presence and rooms.
//!
//! ```text
//! transport ──► ChatRelay ──► SessionRegistry   (owns sessions, one lock)
//!                   │
//!                   ├──► MessageRouter    ─┐
//!                   ├──► PresenceNotifier ─┼──► fan_out ──► EventSink
//!                   └──► RoomCoordinator  ─┘
//! ```
//!
//! Every broadcast snapshots recipient ids under the registry lock, drops
//! the lock, then delivers to each recipient independently.

mod errors;
mod fan_out;
mod presence;
mod registry;
mod rooms;
mod router;
mod service;

pub use errors::RelayError;
pub use fan_out::{fan_out, BroadcastReport};
pub use presence::PresenceNotifier;
pub use registry::{ClosedSession, RoomChange, SessionRegistry};
pub use rooms::RoomCoordinator;
pub use router::MessageRouter;
pub use service::ChatRelay;

use crate::domain::chat::{DEFAULT_MAX_MESSAGE_BYTES, DEFAULT_MAX_ROOM_NAME_CHARS};
use crate::domain::session::DEFAULT_MAX_USERNAME_CHARS;

/// Input limits enforced by the relay core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelayLimits {
    pub max_message_bytes: usize,
    pub max_username_chars: usize,
    pub max_room_name_chars: usize,
}

impl Default for RelayLimits {
    fn default() -> Self {
        Self {
            max_message_bytes: DEFAULT_MAX_MESSAGE_BYTES,
            max_username_chars: DEFAULT_MAX_USERNAME_CHARS,
            max_room_name_chars: DEFAULT_MAX_ROOM_NAME_CHARS,
        }
    }
}
