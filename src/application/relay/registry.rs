//! In-memory session registry.
//!
//! The single owner of every `Session`. All mutations go through one
//! `parking_lot::Mutex`, so `create`, `set_username` and `remove` are atomic
//! with respect to handlers running for other sessions. The lock is never
//! held across an `.await` or a delivery: callers take snapshots of
//! recipient ids and fan out after the guard is dropped.

use std::collections::HashMap;

use parking_lot::Mutex;
use tracing::{debug, info};

use crate::domain::chat::{RoomError, RoomName};
use crate::domain::foundation::SessionId;
use crate::domain::session::{RegistryError, Session, SessionStatus, Username};

/// What is left of a session after removal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClosedSession {
    pub id: SessionId,
    /// Set only if the session was active, i.e. other sessions knew about it.
    pub username: Option<Username>,
}

/// Snapshot of a room after a membership change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomChange {
    pub username: Username,
    /// `false` when the operation did not change membership.
    pub changed: bool,
    /// Active members of the room after the change.
    pub members: Vec<SessionId>,
}

#[derive(Default)]
struct RegistryState {
    sessions: HashMap<SessionId, Session>,
    /// Username index over active sessions only.
    active_names: HashMap<Username, SessionId>,
}

impl RegistryState {
    fn active_ids(&self) -> impl Iterator<Item = &SessionId> {
        self.sessions
            .values()
            .filter(|s| s.is_active())
            .map(Session::id)
    }

    fn room_members(&self, room: &RoomName) -> Vec<SessionId> {
        self.sessions
            .values()
            .filter(|s| s.is_active() && s.is_member(room))
            .map(|s| *s.id())
            .collect()
    }
}

/// Tracks every connected session and its lifecycle.
///
/// Created once at process start and shared behind an `Arc`.
pub struct SessionRegistry {
    state: Mutex<RegistryState>,
    max_username_chars: usize,
}

impl SessionRegistry {
    pub fn new(max_username_chars: usize) -> Self {
        Self {
            state: Mutex::new(RegistryState::default()),
            max_username_chars,
        }
    }

    /// Allocate a new session in the `Unnamed` state.
    pub fn create_session(&self) -> SessionId {
        let id = SessionId::new();
        let _ = self.state.lock().sessions.insert(id, Session::new(id));
        debug!(session_id = %id, "session created");
        id
    }

    /// Claim a username for an unnamed session.
    ///
    /// First call wins. Usernames are compared after trimming and are
    /// case-sensitive.
    ///
    /// # Errors
    ///
    /// - `UnknownSession` if the id is not live
    /// - `InvalidState` if the session already has a username
    /// - `InvalidUsername` if the name fails validation
    /// - `UsernameTaken` if another active session holds the name
    pub fn set_username(&self, id: &SessionId, name: &str) -> Result<Username, RegistryError> {
        let mut state = self.state.lock();
        let state = &mut *state;

        let session = state
            .sessions
            .get_mut(id)
            .ok_or(RegistryError::UnknownSession(*id))?;
        if session.status() != SessionStatus::Unnamed {
            return Err(RegistryError::InvalidState {
                id: *id,
                status: session.status(),
            });
        }

        let username = Username::parse(name, self.max_username_chars)?;
        if state.active_names.contains_key(&username) {
            return Err(RegistryError::UsernameTaken(username.to_string()));
        }

        session.activate(username.clone())?;
        let _ = state.active_names.insert(username.clone(), *id);
        info!(session_id = %id, username = %username, "session active");
        Ok(username)
    }

    /// Close and delete a session.
    ///
    /// Idempotent: removing an unknown or already removed id returns `None`
    /// and has no other effect.
    pub fn remove_session(&self, id: &SessionId) -> Option<ClosedSession> {
        let mut state = self.state.lock();
        let mut session = state.sessions.remove(id)?;
        let username = session.close();
        if let Some(name) = &username {
            let _ = state.active_names.remove(name);
        }
        drop(state);

        debug!(session_id = %id, was_active = username.is_some(), "session removed");
        Some(ClosedSession { id: *id, username })
    }

    /// Snapshot of all active session ids, in no particular order.
    pub fn active_sessions(&self) -> Vec<SessionId> {
        self.state.lock().active_ids().copied().collect()
    }

    /// Snapshot of all active session ids except `id`.
    pub fn active_peers(&self, id: &SessionId) -> Vec<SessionId> {
        self.state
            .lock()
            .active_ids()
            .filter(|other| *other != id)
            .copied()
            .collect()
    }

    /// Username and peers of an active session, taken under one lock.
    ///
    /// Returns `None` if the session is not active.
    pub fn active_with_peers(&self, id: &SessionId) -> Option<(Username, Vec<SessionId>)> {
        let state = self.state.lock();
        let username = state
            .sessions
            .get(id)
            .filter(|s| s.is_active())
            .and_then(|s| s.username().cloned())?;
        let peers = state
            .active_ids()
            .filter(|other| *other != id)
            .copied()
            .collect();
        Some((username, peers))
    }

    /// Current status of a live session.
    pub fn status(&self, id: &SessionId) -> Option<SessionStatus> {
        self.state.lock().sessions.get(id).map(Session::status)
    }

    /// Add an active session to a room.
    pub fn join_room(&self, id: &SessionId, room: RoomName) -> Result<RoomChange, RoomError> {
        let mut state = self.state.lock();
        let session = state
            .sessions
            .get_mut(id)
            .ok_or(RoomError::NotActive(*id))?;
        let username = session
            .username()
            .cloned()
            .ok_or(RoomError::NotActive(*id))?;
        let changed = session.join_room(room.clone())?;
        let members = state.room_members(&room);
        Ok(RoomChange {
            username,
            changed,
            members,
        })
    }

    /// Remove an active session from a room.
    pub fn leave_room(&self, id: &SessionId, room: &RoomName) -> Result<RoomChange, RoomError> {
        let mut state = self.state.lock();
        let session = state
            .sessions
            .get_mut(id)
            .ok_or(RoomError::NotActive(*id))?;
        let username = session
            .username()
            .cloned()
            .ok_or(RoomError::NotActive(*id))?;
        session.leave_room(room)?;
        let members = state.room_members(room);
        Ok(RoomChange {
            username,
            changed: true,
            members,
        })
    }

    /// Snapshot of the active members of a room.
    pub fn room_members(&self, room: &RoomName) -> Vec<SessionId> {
        self.state.lock().room_members(room)
    }

    /// Number of live sessions, named or not.
    pub fn len(&self) -> usize {
        self.state.lock().sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of active sessions.
    pub fn active_count(&self) -> usize {
        self.state.lock().active_names.len()
    }
}
