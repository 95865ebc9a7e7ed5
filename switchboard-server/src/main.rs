use anyhow::Result;
use axum::{Router, routing::get};
use std::sync::Arc;
use switchboard_server::{GatewayService, Relay, ServerConfig, ws_handler};
use tokio::sync::mpsc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ServerConfig::from_env()?;
    info!("Starting signaling relay: {:?}", config);

    let (relay_tx, relay_rx) = mpsc::channel(256);
    let service = GatewayService::new(relay_tx);

    let relay = Relay::new(relay_rx, Arc::new(service.clone()), config.signal_scope);
    tokio::spawn(relay.run());

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/ws", get(ws_handler))
        .layer(cors)
        .with_state(service);

    info!("Signaling relay listening on http://{}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
