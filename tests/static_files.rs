//! Integration tests for serving the bundled chat client.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::ServiceExt;

use chat_relay::adapters::http::build_router;
use chat_relay::adapters::websocket::{ConnectionTable, WebSocketState};
use chat_relay::application::{ChatRelay, RelayLimits};
use chat_relay::config::{ServerConfig, WebSocketConfig};

fn app(server: &ServerConfig) -> axum::Router {
    let connections = Arc::new(ConnectionTable::new());
    let relay = Arc::new(ChatRelay::new(connections.clone(), RelayLimits::default()));
    let state = WebSocketState::new(relay, connections, WebSocketConfig::default());
    build_router(state, server)
}

async fn get(app: axum::Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn serves_files_from_static_dir() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("index.html"), "<h1>chat</h1>").unwrap();
    std::fs::write(dir.path().join("app.js"), "connect();").unwrap();

    let server = ServerConfig {
        static_dir: Some(dir.path().to_string_lossy().into_owned()),
        ..Default::default()
    };

    let (status, body) = get(app(&server), "/app.js").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "connect();");

    let (status, body) = get(app(&server), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "<h1>chat</h1>");
}

#[tokio::test]
async fn unknown_paths_fall_back_to_index() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("index.html"), "<h1>chat</h1>").unwrap();
    let server = ServerConfig {
        static_dir: Some(dir.path().to_string_lossy().into_owned()),
        ..Default::default()
    };

    let (status, body) = get(app(&server), "/rooms/rust").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "<h1>chat</h1>");
}

#[tokio::test]
async fn health_wins_over_static_files() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("health"), "shadowed").unwrap();
    let server = ServerConfig {
        static_dir: Some(dir.path().to_string_lossy().into_owned()),
        ..Default::default()
    };

    let (status, body) = get(app(&server), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("\"status\":\"ok\""));
}

#[tokio::test]
async fn missing_static_dir_is_ignored() {
    let server = ServerConfig {
        static_dir: Some("/definitely/not/here".to_string()),
        ..Default::default()
    };

    let (status, _) = get(app(&server), "/index.html").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
