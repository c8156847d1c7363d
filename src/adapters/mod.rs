//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the relay core to the outside world:
//! - `websocket` - Client transport; its `ConnectionTable` implements `EventSink`
//! - `http` - Router with the WebSocket endpoint, health check and static files

pub mod http;
pub mod websocket;
