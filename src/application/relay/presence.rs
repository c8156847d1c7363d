//! Presence notifier: join and leave announcements.

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::chat::OutboundEvent;
use crate::domain::foundation::SessionId;
use crate::domain::session::Username;
use crate::ports::EventSink;

use super::fan_out::{fan_out, BroadcastReport};
use super::registry::SessionRegistry;

/// Tells the group when membership changes.
pub struct PresenceNotifier {
    registry: Arc<SessionRegistry>,
    sink: Arc<dyn EventSink>,
}

impl PresenceNotifier {
    pub fn new(registry: Arc<SessionRegistry>, sink: Arc<dyn EventSink>) -> Self {
        Self { registry, sink }
    }

    /// Broadcast `user_joined` to every active session except the new one.
    ///
    /// Does nothing unless the registry reports the session as active.
    pub fn announce_join(&self, id: &SessionId) -> BroadcastReport {
        let Some((username, peers)) = self.registry.active_with_peers(id) else {
            debug!(session_id = %id, "join not announced, session is not active");
            return BroadcastReport::default();
        };

        info!(session_id = %id, username = %username, "user joined");
        fan_out(
            self.sink.as_ref(),
            &peers,
            &OutboundEvent::UserJoined { username },
        )
    }

    /// Broadcast `user_left` to every remaining active session.
    ///
    /// `username` is captured before the session record is deleted, so this
    /// works after removal. Call exactly once per session that was active.
    pub fn announce_leave(&self, id: &SessionId, username: &Username) -> BroadcastReport {
        info!(session_id = %id, username = %username, "user left");
        let remaining = self.registry.active_peers(id);
        fan_out(
            self.sink.as_ref(),
            &remaining,
            &OutboundEvent::UserLeft {
                username: username.clone(),
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::relay::test_support::{username, RecordingSink};
    use crate::domain::session::DEFAULT_MAX_USERNAME_CHARS;

    fn setup() -> (Arc<SessionRegistry>, Arc<RecordingSink>, PresenceNotifier) {
        let registry = Arc::new(SessionRegistry::new(DEFAULT_MAX_USERNAME_CHARS));
        let sink = Arc::new(RecordingSink::new());
        let presence = PresenceNotifier::new(Arc::clone(&registry), sink.clone());
        (registry, sink, presence)
    }

    #[test]
    fn join_is_announced_to_others_only() {
        let (registry, sink, presence) = setup();
        let alice = registry.create_session();
        registry.set_username(&alice, "alice").unwrap();
        let bob = registry.create_session();
        registry.set_username(&bob, "bob").unwrap();

        let report = presence.announce_join(&bob);

        assert_eq!(report.delivered, 1);
        assert_eq!(
            sink.events_for(&alice),
            vec![OutboundEvent::UserJoined {
                username: username("bob")
            }]
        );
        assert!(sink.events_for(&bob).is_empty());
    }

    #[test]
    fn join_of_unnamed_session_is_not_announced() {
        let (registry, sink, presence) = setup();
        let alice = registry.create_session();
        registry.set_username(&alice, "alice").unwrap();
        let lurker = registry.create_session();

        presence.announce_join(&lurker);

        assert_eq!(sink.total_events(), 0);
    }

    #[test]
    fn leave_is_announced_after_removal() {
        let (registry, sink, presence) = setup();
        let alice = registry.create_session();
        registry.set_username(&alice, "alice").unwrap();
        let bob = registry.create_session();
        registry.set_username(&bob, "bob").unwrap();

        let closed = registry.remove_session(&bob).unwrap();
        presence.announce_leave(&bob, closed.username.as_ref().unwrap());

        assert_eq!(
            sink.events_for(&alice),
            vec![OutboundEvent::UserLeft {
                username: username("bob")
            }]
        );
    }
}
