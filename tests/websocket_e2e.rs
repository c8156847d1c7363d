//! End-to-end tests: the full axum app on an ephemeral port, driven by
//! real WebSocket clients.

use std::sync::Arc;
use std::time::Duration;

use futures::{SinkExt, StreamExt};
use serde_json::{json, Value};
use tokio::net::{TcpListener, TcpStream};
use tokio::time::timeout;
use tokio_tungstenite::{connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream};

use chat_relay::adapters::http::build_router;
use chat_relay::adapters::websocket::{max_frame_bytes, ConnectionTable, WebSocketState};
use chat_relay::application::ChatRelay;
use chat_relay::config::{AppConfig, WebSocketConfig};

type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;

const WAIT: Duration = Duration::from_secs(5);

// =============================================================================
// Test Infrastructure
// =============================================================================

struct TestServer {
    addr: std::net::SocketAddr,
    connections: Arc<ConnectionTable>,
    relay: Arc<ChatRelay>,
}

async fn spawn_server(config: AppConfig) -> TestServer {
    let connections = Arc::new(ConnectionTable::new());
    let relay = Arc::new(ChatRelay::new(connections.clone(), config.relay.limits()));
    let state = WebSocketState::new(
        Arc::clone(&relay),
        Arc::clone(&connections),
        config.websocket.clone(),
    );
    let app = build_router(state, &config.server);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestServer {
        addr,
        connections,
        relay,
    }
}

async fn connect(server: &TestServer) -> (Socket, String) {
    let url = format!("ws://{}/ws", server.addr);
    let (mut socket, _) = connect_async(url).await.unwrap();
    let connected = next_event(&mut socket).await;
    assert_eq!(connected["event"], "connected");
    let session_id = connected["data"]["session_id"].as_str().unwrap().to_string();
    (socket, session_id)
}

async fn send(socket: &mut Socket, event: Value) {
    socket.send(Message::Text(event.to_string())).await.unwrap();
}

/// Next JSON event, skipping protocol-level frames.
async fn next_event(socket: &mut Socket) -> Value {
    loop {
        let frame = timeout(WAIT, socket.next())
            .await
            .expect("timed out waiting for event")
            .expect("socket closed")
            .unwrap();
        match frame {
            Message::Text(text) => return serde_json::from_str(&text).unwrap(),
            Message::Ping(_) | Message::Pong(_) => continue,
            other => panic!("unexpected frame: {:?}", other),
        }
    }
}

async fn named(server: &TestServer, name: &str) -> Socket {
    let (mut socket, _) = connect(server).await;
    send(&mut socket, json!({"event": "set_username", "data": name})).await;
    socket
}

/// Round-trip a ping so every earlier frame from this client has been handled.
async fn sync(socket: &mut Socket) {
    send(socket, json!({"event": "ping"})).await;
    assert_eq!(next_event(socket).await["event"], "pong");
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn chat_round_trip() {
    let server = spawn_server(AppConfig::default()).await;

    let mut alice = named(&server, "alice").await;
    sync(&mut alice).await;
    let mut bob = named(&server, "bob").await;

    let joined = next_event(&mut alice).await;
    assert_eq!(joined, json!({"event": "user_joined", "data": {"username": "bob"}}));

    send(&mut alice, json!({"event": "message", "data": "hi"})).await;
    let response = next_event(&mut bob).await;
    assert_eq!(
        response,
        json!({"event": "response", "data": {"username": "alice", "message": "hi"}})
    );

    bob.close(None).await.unwrap();
    let left = next_event(&mut alice).await;
    assert_eq!(left, json!({"event": "user_left", "data": {"username": "bob"}}));
}

#[tokio::test]
async fn errors_go_to_sender_only() {
    let server = spawn_server(AppConfig::default()).await;
    let mut alice = named(&server, "alice").await;
    sync(&mut alice).await;

    let (mut rival, _) = connect(&server).await;
    send(&mut rival, json!({"event": "set_username", "data": "alice"})).await;
    let err = next_event(&mut rival).await;
    assert_eq!(err["event"], "error");
    assert_eq!(err["data"]["code"], "USERNAME_TAKEN");

    send(&mut rival, json!({"event": "message", "data": "let me in"})).await;
    assert_eq!(next_event(&mut rival).await["data"]["code"], "NOT_ACTIVE");

    // alice heard nothing: her next event is her own pong.
    sync(&mut alice).await;
}

#[tokio::test]
async fn malformed_frames_keep_the_session_open() {
    let server = spawn_server(AppConfig::default()).await;
    let (mut socket, _) = connect(&server).await;

    socket.send(Message::Text("not json".into())).await.unwrap();
    assert_eq!(next_event(&mut socket).await["data"]["code"], "MALFORMED_EVENT");

    send(&mut socket, json!({"event": "shout", "data": "x"})).await;
    assert_eq!(next_event(&mut socket).await["data"]["code"], "MALFORMED_EVENT");

    socket.send(Message::Binary(vec![1, 2, 3])).await.unwrap();
    assert_eq!(next_event(&mut socket).await["data"]["code"], "MALFORMED_EVENT");

    sync(&mut socket).await;
}

#[tokio::test]
async fn rooms_over_the_wire() {
    let server = spawn_server(AppConfig::default()).await;
    let mut alice = named(&server, "alice").await;
    sync(&mut alice).await;
    let mut bob = named(&server, "bob").await;
    sync(&mut bob).await;
    let _ = next_event(&mut alice).await;

    send(&mut alice, json!({"event": "join_room", "data": "rust"})).await;
    assert_eq!(
        next_event(&mut alice).await,
        json!({"event": "room_joined", "data": {"room": "rust", "username": "alice"}})
    );

    send(&mut bob, json!({"event": "join_room", "data": "rust"})).await;
    assert_eq!(next_event(&mut alice).await["data"]["username"], "bob");
    assert_eq!(next_event(&mut bob).await["data"]["username"], "bob");

    send(&mut bob, json!({"event": "leave_room", "data": "rust"})).await;
    assert_eq!(
        next_event(&mut alice).await,
        json!({"event": "room_left", "data": {"room": "rust", "username": "bob"}})
    );

    send(&mut bob, json!({"event": "leave_room", "data": "rust"})).await;
    assert_eq!(next_event(&mut bob).await["data"]["code"], "NOT_IN_ROOM");
}

#[tokio::test]
async fn oversized_frame_is_refused_by_the_transport() {
    let server = spawn_server(AppConfig::default()).await;
    let mut alice = named(&server, "alice").await;
    sync(&mut alice).await;
    let mut bob = named(&server, "bob").await;
    sync(&mut bob).await;
    let _ = next_event(&mut alice).await;

    // Just over the body limit but within the frame limit: a normal error.
    let over = "x".repeat(4097);
    send(&mut bob, json!({"event": "message", "data": over})).await;
    assert_eq!(next_event(&mut bob).await["data"]["code"], "TOO_LARGE");

    // Far past the frame limit: the socket drops without decoding it.
    let huge = "x".repeat(max_frame_bytes(4096) * 4);
    let _ = bob
        .send(Message::Text(json!({"event": "message", "data": huge}).to_string()))
        .await;
    let outcome = timeout(WAIT, async {
        while let Some(frame) = bob.next().await {
            match frame {
                Ok(Message::Text(text)) => return Some(text),
                Ok(Message::Close(_)) | Err(_) => return None,
                Ok(_) => continue,
            }
        }
        None
    })
    .await
    .expect("socket should close");
    assert_eq!(outcome, None, "oversized frame must not be answered");

    let left = next_event(&mut alice).await;
    assert_eq!(left, json!({"event": "user_left", "data": {"username": "bob"}}));
}

#[tokio::test]
async fn idle_connection_is_closed_and_announced() {
    let config = AppConfig {
        websocket: WebSocketConfig {
            ping_interval_secs: 1,
            idle_timeout_secs: 2,
            ..Default::default()
        },
        ..Default::default()
    };
    let server = spawn_server(config).await;

    let mut alice = named(&server, "alice").await;
    sync(&mut alice).await;
    // bob claims a name and then never reads, so he never answers pings.
    let mut bob = named(&server, "bob").await;
    sync(&mut bob).await;
    assert_eq!(next_event(&mut alice).await["event"], "user_joined");

    // alice keeps reading (and answering pings) until bob is dropped.
    let left = next_event(&mut alice).await;
    assert_eq!(left, json!({"event": "user_left", "data": {"username": "bob"}}));
    drop(bob);
}

#[tokio::test]
async fn health_counts_sessions_and_connections() {
    let server = spawn_server(AppConfig::default()).await;
    let mut alice = named(&server, "alice").await;
    sync(&mut alice).await;
    let (_lurker, _) = connect(&server).await;

    assert_eq!(server.relay.registry().active_count(), 1);
    assert_eq!(server.relay.registry().len(), 2);
    assert_eq!(server.connections.len(), 2);

    // Closing everything, as shutdown does, runs each disconnect path.
    server.connections.close_all();
    let closed = timeout(WAIT, async {
        while !server.connections.is_empty() {
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
    })
    .await;
    assert!(closed.is_ok());
    assert!(server.relay.registry().is_empty());
}
