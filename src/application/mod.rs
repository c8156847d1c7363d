//! Application layer - orchestrates the relay core over its ports.
//!
//! The relay holds no knowledge of sockets or wire formats; it talks to
//! connected clients only through the `EventSink` port.

pub mod relay;

pub use relay::{BroadcastReport, ChatRelay, RelayError, RelayLimits, SessionRegistry};
