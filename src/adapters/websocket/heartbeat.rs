//! Idle-connection detection.

use std::sync::Arc;
use std::time::Duration;

use tokio::time;
use tokio_util::sync::CancellationToken;

use super::connections::ClientConnection;

/// Outcome of the heartbeat loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeartbeatResult {
    /// Nothing arrived from the client within the idle timeout.
    TimedOut,
    /// The connection closed for another reason.
    Cancelled,
}

/// Watch a connection until it goes idle or is cancelled.
///
/// Checks once per `interval`. Inbound frames (including pongs answering
/// the writer's pings) reset the idle clock through
/// [`ClientConnection::mark_alive`].
pub async fn run_heartbeat(
    connection: Arc<ClientConnection>,
    interval: Duration,
    idle_timeout: Duration,
    cancel: CancellationToken,
) -> HeartbeatResult {
    let mut check_interval = time::interval(interval);
    check_interval.set_missed_tick_behavior(time::MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = check_interval.tick() => {
                if connection.idle_for() >= idle_timeout {
                    return HeartbeatResult::TimedOut;
                }
            }
            () = cancel.cancelled() => {
                return HeartbeatResult::Cancelled;
            }
        }
    }
}
