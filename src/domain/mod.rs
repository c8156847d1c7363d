//! Domain layer containing the relay's business rules and types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors, state machine)
//! - `session` - Session lifecycle, usernames and registry errors
//! - `chat` - Chat messages, rooms and the outbound event vocabulary

pub mod chat;
pub mod foundation;
pub mod session;
