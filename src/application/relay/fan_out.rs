//! Best-effort fan-out of one event to many sessions.

use tracing::{debug, warn};

use crate::domain::chat::OutboundEvent;
use crate::domain::foundation::SessionId;
use crate::ports::EventSink;

/// Outcome of a fan-out, kept as telemetry for the caller.
///
/// Failures never turn into errors for the originating operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BroadcastReport {
    pub delivered: usize,
    pub failed: Vec<SessionId>,
}

impl BroadcastReport {
    pub fn recipients(&self) -> usize {
        self.delivered + self.failed.len()
    }
}

/// Send `event` to every id in `recipients`, independently.
///
/// A recipient that cannot take the event is logged and force-disconnected
/// through the sink; it is not retried.
pub fn fan_out(
    sink: &dyn EventSink,
    recipients: &[SessionId],
    event: &OutboundEvent,
) -> BroadcastReport {
    if recipients.is_empty() {
        debug!(event = event.name(), "no recipients");
        return BroadcastReport::default();
    }

    let failures = sink.deliver_many(recipients, event);
    for (id, error) in &failures {
        warn!(
            session_id = %id,
            event = event.name(),
            error = %error,
            "delivery failed, dropping recipient"
        );
        sink.disconnect(id);
    }

    let report = BroadcastReport {
        delivered: recipients.len() - failures.len(),
        failed: failures.into_iter().map(|(id, _)| id).collect(),
    };
    debug!(
        event = event.name(),
        recipients = report.recipients(),
        failed = report.failed.len(),
        "fan-out complete"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::relay::test_support::RecordingSink;
    use crate::domain::session::{Username, DEFAULT_MAX_USERNAME_CHARS};

    fn joined() -> OutboundEvent {
        OutboundEvent::UserJoined {
            username: Username::parse("alice", DEFAULT_MAX_USERNAME_CHARS).unwrap(),
        }
    }

    #[test]
    fn delivers_to_every_recipient() {
        let sink = RecordingSink::new();
        let a = SessionId::new();
        let b = SessionId::new();

        let report = fan_out(&sink, &[a, b], &joined());

        assert_eq!(report.delivered, 2);
        assert!(report.failed.is_empty());
        assert_eq!(sink.events_for(&a), vec![joined()]);
        assert_eq!(sink.events_for(&b), vec![joined()]);
    }

    #[test]
    fn failure_for_one_recipient_does_not_stop_the_rest() {
        let sink = RecordingSink::new();
        let a = SessionId::new();
        let broken = SessionId::new();
        let c = SessionId::new();
        sink.break_session(broken);

        let report = fan_out(&sink, &[a, broken, c], &joined());

        assert_eq!(report.delivered, 2);
        assert_eq!(report.failed, vec![broken]);
        assert_eq!(sink.events_for(&c), vec![joined()]);
    }

    #[test]
    fn failed_recipient_is_disconnected() {
        let sink = RecordingSink::new();
        let broken = SessionId::new();
        sink.break_session(broken);

        fan_out(&sink, &[broken], &joined());

        assert_eq!(sink.disconnected(), vec![broken]);
    }

    #[test]
    fn empty_recipient_list_is_a_no_op() {
        let sink = RecordingSink::new();
        let report = fan_out(&sink, &[], &joined());
        assert_eq!(report, BroadcastReport::default());
        assert_eq!(sink.total_events(), 0);
    }
}
