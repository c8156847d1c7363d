use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

use chat_relay::adapters::http::build_router;
use chat_relay::adapters::websocket::{ConnectionTable, WebSocketState};
use chat_relay::application::ChatRelay;
use chat_relay::config::AppConfig;
use chat_relay::telemetry::init_tracing;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;
    init_tracing(&config.server)?;

    let connections = Arc::new(ConnectionTable::new());
    let relay = Arc::new(ChatRelay::new(connections.clone(), config.relay.limits()));
    let state = WebSocketState::new(relay, Arc::clone(&connections), config.websocket.clone());
    let app = build_router(state, &config.server);

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    info!(
        addr = %listener.local_addr()?,
        environment = ?config.server.environment,
        "Chat relay listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(Arc::clone(&connections)))
        .await?;

    info!("Chat relay stopped");
    Ok(())
}

/// Resolve on SIGINT or SIGTERM, then force every open connection closed so
/// their handlers run the disconnect path and the server can drain.
async fn shutdown_signal(connections: Arc<ConnectionTable>) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!(connections = connections.len(), "Shutdown signal received");
    connections.close_all();
}
