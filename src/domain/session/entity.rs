//! Session entity.
//!
//! Owned exclusively by the session registry. Other components only ever
//! see a session through its id or through snapshots the registry hands out.

use std::collections::BTreeSet;

use crate::domain::chat::{RoomError, RoomName};
use crate::domain::foundation::{SessionId, StateMachine};

use super::{RegistryError, SessionStatus, Username};

/// One connected client.
///
/// # Invariants
///
/// - `username` is `None` while `Unnamed` and never changes once set
/// - only `Active` sessions hold room memberships
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    id: SessionId,
    username: Option<Username>,
    status: SessionStatus,
    rooms: BTreeSet<RoomName>,
}

impl Session {
    /// Create a freshly connected, unnamed session.
    pub fn new(id: SessionId) -> Self {
        Self {
            id,
            username: None,
            status: SessionStatus::Unnamed,
            rooms: BTreeSet::new(),
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn username(&self) -> Option<&Username> {
        self.username.as_ref()
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    pub fn is_member(&self, room: &RoomName) -> bool {
        self.rooms.contains(room)
    }

    /// Claim a username and move to `Active`.
    ///
    /// # Errors
    ///
    /// - `InvalidState` unless the session is still `Unnamed`
    pub fn activate(&mut self, username: Username) -> Result<(), RegistryError> {
        self.status = self
            .status
            .transition_to(SessionStatus::Active)
            .map_err(|_| RegistryError::InvalidState {
                id: self.id,
                status: self.status,
            })?;
        self.username = Some(username);
        Ok(())
    }

    /// Move to `Closed`, dropping room memberships.
    ///
    /// Returns the username if the session was `Active`, so callers can
    /// announce the departure after the record is gone. Closing an already
    /// closed session returns `None`.
    pub fn close(&mut self) -> Option<Username> {
        let was_active = self.is_active();
        match self.status.transition_to(SessionStatus::Closed) {
            Ok(closed) => self.status = closed,
            Err(_) => return None,
        }
        self.rooms.clear();

        if was_active {
            self.username.clone()
        } else {
            None
        }
    }

    /// Add this session to a room.
    ///
    /// Returns `false` when the session was already a member.
    pub fn join_room(&mut self, room: RoomName) -> Result<bool, RoomError> {
        if !self.is_active() {
            return Err(RoomError::NotActive(self.id));
        }
        Ok(self.rooms.insert(room))
    }

    /// Remove this session from a room.
    pub fn leave_room(&mut self, room: &RoomName) -> Result<(), RoomError> {
        if !self.is_active() {
            return Err(RoomError::NotActive(self.id));
        }
        if !self.rooms.remove(room) {
            return Err(RoomError::NotInRoom(room.to_string()));
        }
        Ok(())
    }
}
