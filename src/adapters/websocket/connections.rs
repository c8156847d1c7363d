//! Live WebSocket connections and the `EventSink` that writes to them.
//!
//! Each connection owns a bounded outbound queue drained by its socket
//! writer task. Deliveries use `try_send`, so a slow client shows up as a
//! `BufferFull` failure instead of stalling the relay.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::{Mutex, RwLock};
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::domain::chat::OutboundEvent;
use crate::domain::foundation::SessionId;
use crate::ports::{DeliveryError, EventSink};

use super::messages::ServerMessage;

/// One connected client.
pub struct ClientConnection {
    session_id: SessionId,
    /// Send side of the socket writer's queue.
    tx: mpsc::Sender<Arc<String>>,
    /// Cancelled to force the connection closed.
    cancel: CancellationToken,
    connected_at: Instant,
    /// Last time any frame arrived from the client.
    last_seen: Mutex<Instant>,
    dropped_messages: AtomicU64,
}

impl ClientConnection {
    pub fn new(session_id: SessionId, tx: mpsc::Sender<Arc<String>>) -> Self {
        let now = Instant::now();
        Self {
            session_id,
            tx,
            cancel: CancellationToken::new(),
            connected_at: now,
            last_seen: Mutex::new(now),
            dropped_messages: AtomicU64::new(0),
        }
    }

    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    /// Queue an encoded frame without waiting.
    pub fn send(&self, frame: Arc<String>) -> Result<(), DeliveryError> {
        self.tx.try_send(frame).map_err(|err| {
            self.dropped_messages.fetch_add(1, Ordering::Relaxed);
            match err {
                TrySendError::Full(_) => DeliveryError::BufferFull(self.session_id),
                TrySendError::Closed(_) => DeliveryError::Closed(self.session_id),
            }
        })
    }

    /// Encode and queue a message addressed to this client only.
    pub fn send_message(&self, message: &ServerMessage) -> Result<(), DeliveryError> {
        let json = message
            .to_json()
            .map_err(|e| DeliveryError::Encode(e.to_string()))?;
        self.send(Arc::new(json))
    }

    /// Record inbound activity.
    pub fn mark_alive(&self) {
        *self.last_seen.lock() = Instant::now();
    }

    /// Time since the client was last heard from.
    pub fn idle_for(&self) -> Duration {
        self.last_seen.lock().elapsed()
    }

    /// Force the connection closed. Idempotent.
    pub fn close(&self) {
        self.cancel.cancel();
    }

    pub fn is_closed(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Token cancelled when the connection is forced closed.
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Time since the connection was accepted.
    pub fn age(&self) -> Duration {
        self.connected_at.elapsed()
    }

    /// Frames that could not be queued.
    pub fn drop_count(&self) -> u64 {
        self.dropped_messages.load(Ordering::Relaxed)
    }
}

/// All live connections, keyed by session.
#[derive(Default)]
pub struct ConnectionTable {
    connections: RwLock<HashMap<SessionId, Arc<ClientConnection>>>,
}

impl ConnectionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, connection: Arc<ClientConnection>) {
        let _ = self
            .connections
            .write()
            .insert(connection.session_id(), connection);
    }

    pub fn remove(&self, id: &SessionId) -> Option<Arc<ClientConnection>> {
        self.connections.write().remove(id)
    }

    pub fn get(&self, id: &SessionId) -> Option<Arc<ClientConnection>> {
        self.connections.read().get(id).cloned()
    }

    pub fn len(&self) -> usize {
        self.connections.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.read().is_empty()
    }

    /// Force every connection closed, e.g. on shutdown.
    pub fn close_all(&self) {
        let connections: Vec<_> = self.connections.read().values().cloned().collect();
        debug!(connections = connections.len(), "Closing all connections");
        for connection in connections {
            connection.close();
        }
    }

    fn encode(event: &OutboundEvent) -> Result<Arc<String>, DeliveryError> {
        ServerMessage::from(event)
            .to_json()
            .map(Arc::new)
            .map_err(|e| DeliveryError::Encode(e.to_string()))
    }
}

impl EventSink for ConnectionTable {
    fn deliver(&self, to: &SessionId, event: &OutboundEvent) -> Result<(), DeliveryError> {
        let frame = Self::encode(event)?;
        let connection = self.get(to).ok_or(DeliveryError::NotConnected(*to))?;
        connection.send(frame)
    }

    fn deliver_many(
        &self,
        recipients: &[SessionId],
        event: &OutboundEvent,
    ) -> Vec<(SessionId, DeliveryError)> {
        let frame = match Self::encode(event) {
            Ok(frame) => frame,
            Err(err) => return recipients.iter().map(|id| (*id, err.clone())).collect(),
        };

        let connections = self.connections.read();
        recipients
            .iter()
            .filter_map(|id| {
                let result = match connections.get(id) {
                    Some(connection) => connection.send(Arc::clone(&frame)),
                    None => Err(DeliveryError::NotConnected(*id)),
                };
                result.err().map(|err| (*id, err))
            })
            .collect()
    }

    fn disconnect(&self, id: &SessionId) {
        if let Some(connection) = self.get(id) {
            connection.close();
        }
    }
}
