//! WebSocket transport for the chat relay.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐  ClientEvent   ┌───────────┐  OutboundEvent  ┌─────────────────┐
//! │ read_loop    │ ─────────────▶ │ ChatRelay │ ──────────────▶ │ ConnectionTable │
//! └──────────────┘                └───────────┘   (EventSink)   └────────┬────────┘
//!        ▲                                                               │ try_send
//!        │ frames                                                        ▼
//!   ┌─────────┐                    ServerMessage JSON             ┌────────────┐
//!   │ client  │ ◀──────────────────────────────────────────────── │ write_loop │
//!   └─────────┘                                                   └────────────┘
//! ```
//!
//! # Wire format
//!
//! ```json
//! {"event": "set_username", "data": "alice"}
//! {"event": "response", "data": {"username": "alice", "message": "hi"}}
//! ```

mod connections;
mod handler;
mod heartbeat;
mod messages;

pub use connections::{ClientConnection, ConnectionTable};
pub use handler::{max_frame_bytes, websocket_router, ws_handler, WebSocketState};
pub use heartbeat::{run_heartbeat, HeartbeatResult};
pub use messages::{ClientEvent, ServerMessage};
