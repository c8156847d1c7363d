//! WebSocket upgrade handler for chat connections.
//!
//! Handles the HTTP → WebSocket upgrade and manages the connection lifecycle:
//! 1. Open a relay session and register the connection
//! 2. Send `connected` with the session id
//! 3. Relay client events until the socket closes, idles out or is forced closed
//! 4. Run the relay disconnect path exactly once

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use futures::{
    stream::{SplitSink, SplitStream},
    SinkExt, StreamExt,
};
use tokio::{sync::mpsc, task::JoinHandle, time};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::application::ChatRelay;
use crate::config::WebSocketConfig;
use crate::domain::foundation::ErrorCode;

use super::{
    connections::{ClientConnection, ConnectionTable},
    heartbeat::{run_heartbeat, HeartbeatResult},
    messages::{ClientEvent, ServerMessage},
};

/// State required for WebSocket handling.
#[derive(Clone)]
pub struct WebSocketState {
    /// Relay core shared by every connection.
    pub relay: Arc<ChatRelay>,
    /// Live connections; also the relay's event sink.
    pub connections: Arc<ConnectionTable>,
    /// Per-connection transport settings.
    pub settings: WebSocketConfig,
}

impl WebSocketState {
    pub fn new(
        relay: Arc<ChatRelay>,
        connections: Arc<ConnectionTable>,
        settings: WebSocketConfig,
    ) -> Self {
        Self {
            relay,
            connections,
            settings,
        }
    }
}

/// Fixed allowance for the `{"event": ..., "data": ...}` envelope.
const ENVELOPE_OVERHEAD: usize = 1024;

/// Largest inbound frame accepted for a given message body limit.
///
/// JSON escaping turns one body byte into at most six characters (`\u00XX`),
/// so a legal body always fits. Anything larger is refused by the socket
/// before it is buffered in full.
pub fn max_frame_bytes(max_message_bytes: usize) -> usize {
    max_message_bytes
        .saturating_mul(6)
        .saturating_add(ENVELOPE_OVERHEAD)
}

/// Handle WebSocket upgrade requests.
///
/// Route: `GET /ws`
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<WebSocketState>) -> Response {
    let frame_limit = max_frame_bytes(state.relay.limits().max_message_bytes);
    ws.max_message_size(frame_limit)
        .max_frame_size(frame_limit)
        .on_upgrade(move |socket| handle_socket(socket, state))
}

/// Handle an established WebSocket connection.
///
/// Runs for the lifetime of the connection. The writer drains the outbound
/// queue, the reader dispatches client events, and the heartbeat closes the
/// connection once it has been silent for too long.
async fn handle_socket(socket: WebSocket, state: WebSocketState) {
    let (sender, receiver) = socket.split();

    let session_id = state.relay.connect();
    let (tx, rx) = mpsc::channel(state.settings.outbound_buffer);
    let connection = Arc::new(ClientConnection::new(session_id, tx));
    state.connections.register(Arc::clone(&connection));
    debug!(session_id = %session_id, "WebSocket attached");

    if let Err(e) = connection.send_message(&ServerMessage::Connected { session_id }) {
        warn!(session_id = %session_id, error = %e, "Failed to queue connected message");
    }

    let cancel = connection.cancel_token();

    let mut send_task = tokio::spawn(write_loop(
        sender,
        rx,
        state.settings.ping_interval(),
        cancel.clone(),
    ));

    let mut recv_task = tokio::spawn(read_loop(
        receiver,
        Arc::clone(&connection),
        Arc::clone(&state.relay),
    ));

    let heartbeat_task = {
        let connection = Arc::clone(&connection);
        let interval = state.settings.ping_interval();
        let idle_timeout = state.settings.idle_timeout();
        let cancel = cancel.clone();
        tokio::spawn(async move {
            let watched = Arc::clone(&connection);
            if run_heartbeat(watched, interval, idle_timeout, cancel).await
                == HeartbeatResult::TimedOut
            {
                info!(session_id = %connection.session_id(), "Connection idle, closing");
                connection.close();
            }
        })
    };

    // Wait for either side to finish
    let writer_finished = tokio::select! {
        _ = &mut send_task => true,
        _ = &mut recv_task => false,
    };
    connection.close();

    // The reader may be mid-dispatch; it must be fully stopped before the
    // session leaves the relay.
    if writer_finished {
        stop(recv_task).await;
    } else {
        stop(send_task).await;
    }
    stop(heartbeat_task).await;

    // Leave the relay before dropping the route so peers never see a
    // registered session without a connection.
    let username = state.relay.disconnect(&session_id);
    let _ = state.connections.remove(&session_id);
    debug!(
        session_id = %session_id,
        username = username.as_ref().map(|u| u.as_str()),
        connected_ms = connection.age().as_millis() as u64,
        dropped = connection.drop_count(),
        "WebSocket detached"
    );
}

/// Abort a connection task and wait until it has actually stopped.
async fn stop(task: JoinHandle<()>) {
    task.abort();
    let _ = task.await;
}

/// Forward queued frames to the socket and ping on an interval.
///
/// Returns when the queue closes, the socket errors, or the connection is
/// cancelled (after sending a close frame).
async fn write_loop(
    mut sender: SplitSink<WebSocket, Message>,
    mut rx: mpsc::Receiver<Arc<String>>,
    ping_interval: Duration,
    cancel: CancellationToken,
) {
    let mut ping = time::interval_at(time::Instant::now() + ping_interval, ping_interval);

    loop {
        tokio::select! {
            () = cancel.cancelled() => {
                let _ = sender.send(Message::Close(None)).await;
                break;
            }
            frame = rx.recv() => {
                let Some(frame) = frame else { break };
                if let Err(e) = sender.send(Message::Text(frame.as_str().to_owned())).await {
                    debug!("Send error, closing connection: {}", e);
                    break;
                }
            }
            _ = ping.tick() => {
                if let Err(e) = sender.send(Message::Ping(Vec::new())).await {
                    debug!("Ping failed, closing connection: {}", e);
                    break;
                }
            }
        }
    }
}

/// Read client frames until the socket closes or errors.
async fn read_loop(
    mut receiver: SplitStream<WebSocket>,
    connection: Arc<ClientConnection>,
    relay: Arc<ChatRelay>,
) {
    let session_id = connection.session_id();

    while let Some(result) = receiver.next().await {
        let message = match result {
            Ok(message) => message,
            Err(e) => {
                debug!(session_id = %session_id, "Receive error: {}", e);
                break;
            }
        };
        connection.mark_alive();

        match message {
            Message::Text(text) => match ClientEvent::parse(&text) {
                Ok(event) => dispatch(&relay, &connection, event),
                Err(e) => {
                    debug!(session_id = %session_id, error = %e, "Malformed event");
                    reply(
                        &connection,
                        &ServerMessage::error(ErrorCode::MalformedEvent, e.to_string()),
                    );
                }
            },
            Message::Binary(_) => {
                reply(
                    &connection,
                    &ServerMessage::error(
                        ErrorCode::MalformedEvent,
                        "Binary frames are not supported",
                    ),
                );
            }
            // Protocol pings are answered by axum; pongs only refresh liveness.
            Message::Ping(_) | Message::Pong(_) => {}
            Message::Close(_) => {
                debug!(session_id = %session_id, "Client sent close frame");
                break;
            }
        }
    }
}

/// Apply one client event to the relay. Failures go back to this client only.
fn dispatch(relay: &ChatRelay, connection: &ClientConnection, event: ClientEvent) {
    let session_id = connection.session_id();
    let name = event.name();

    let outcome = match event {
        ClientEvent::SetUsername(username) => {
            relay.set_username(&session_id, &username).map(|_| ())
        }
        ClientEvent::Message(body) => relay.send_message(&session_id, &body).map(|_| ()),
        ClientEvent::JoinRoom(room) => relay.join_room(&session_id, &room).map(|_| ()),
        ClientEvent::LeaveRoom(room) => relay.leave_room(&session_id, &room).map(|_| ()),
        ClientEvent::Ping => {
            reply(connection, &ServerMessage::Pong);
            return;
        }
    };

    if let Err(err) = outcome {
        debug!(
            session_id = %session_id,
            event = name,
            code = %err.code(),
            "Rejected client event"
        );
        reply(connection, &ServerMessage::error(err.code(), err.to_string()));
    }
}

fn reply(connection: &ClientConnection, message: &ServerMessage) {
    if let Err(e) = connection.send_message(message) {
        warn!(session_id = %connection.session_id(), error = %e, "Failed to queue reply");
    }
}

/// Create axum router for the WebSocket endpoint.
pub fn websocket_router() -> axum::Router<WebSocketState> {
    use axum::routing::get;

    axum::Router::new().route("/ws", get(ws_handler))
}
