//! SessionStatus enum for tracking the lifecycle of a connected client.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::StateMachine;

/// Lifecycle status of a session.
///
/// `Unnamed -> Active -> Closed`, or `Unnamed -> Closed` when the client
/// leaves before claiming a username. No other moves are allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    #[default]
    Unnamed,
    Active,
    Closed,
}

impl SessionStatus {
    /// Returns true if the session may send and receive chat traffic.
    pub fn is_active(&self) -> bool {
        matches!(self, SessionStatus::Active)
    }
}

impl StateMachine for SessionStatus {
    fn valid_transitions(&self) -> &'static [Self] {
        match self {
            SessionStatus::Unnamed => &[SessionStatus::Active, SessionStatus::Closed],
            SessionStatus::Active => &[SessionStatus::Closed],
            SessionStatus::Closed => &[],
        }
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SessionStatus::Unnamed => "unnamed",
            SessionStatus::Active => "active",
            SessionStatus::Closed => "closed",
        };
        write!(f, "{}", s)
    }
}
