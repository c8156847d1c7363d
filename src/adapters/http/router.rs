//! Top-level axum router: WebSocket endpoint, health check, static client.

use axum::{extract::State, routing::get, Json, Router};
use axum::http::{HeaderValue, Method};
use serde::Serialize;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::adapters::websocket::{websocket_router, WebSocketState};
use crate::config::ServerConfig;

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub active_sessions: usize,
    pub connections: usize,
}

/// Build the complete router with all routes and middleware.
pub fn build_router(state: WebSocketState, server: &ServerConfig) -> Router {
    let mut router = Router::new()
        .merge(websocket_router())
        .route("/health", get(health_check))
        .layer(cors_layer(server))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // `/ws` and `/health` take priority; everything else falls through to
    // the static client when one is configured.
    if let Some(dir) = server.static_dir.as_deref() {
        if std::path::Path::new(dir).is_dir() {
            let index_path = format!("{}/index.html", dir);
            let serve_dir = ServeDir::new(dir).fallback(ServeFile::new(index_path));
            router = router.fallback_service(serve_dir);
            tracing::info!(path = %dir, "Static file serving enabled");
        } else {
            tracing::warn!(path = %dir, "Static directory not found, skipping");
        }
    }

    router
}

/// GET /health - Liveness plus relay counters.
async fn health_check(State(state): State<WebSocketState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        active_sessions: state.relay.registry().active_count(),
        connections: state.connections.len(),
    })
}

fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins = server.cors_origins_list();
    let layer = CorsLayer::new()
        .allow_methods([Method::GET])
        .allow_headers(Any);

    if origins.iter().any(|o| o == "*") {
        return layer.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    layer.allow_origin(AllowOrigin::list(allowed))
}
