//! Chat Relay - Real-time chat over WebSocket
//!
//! Clients connect, claim a unique username, and exchange messages that are
//! broadcast to every other named participant. Presence changes and
//! optional room membership are announced as they happen.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
