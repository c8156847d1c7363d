//! Session module - one connected client and its lifecycle.
//!
//! A session starts `Unnamed`, becomes `Active` once it claims a unique
//! username, and ends `Closed` on disconnect.

mod entity;
mod errors;
mod status;
mod username;

pub use entity::Session;
pub use errors::RegistryError;
pub use status::SessionStatus;
pub use username::{Username, DEFAULT_MAX_USERNAME_CHARS};
