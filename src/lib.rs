pub mod catalog;
pub mod client;
pub mod config;
pub mod error;
pub mod health;
pub mod logging;
pub mod server;
pub mod state;
pub mod tools;

pub use config::{CliArgs, ServerConfig, TransportKind};
pub use logging::{LoggingConfig, init_logging};
pub use server::SheetsServer;

use anyhow::Result;
use axum::Router;
use rmcp::transport::streamable_http_server::{
    StreamableHttpService, session::local::LocalSessionManager,
};
use state::AppState;
use std::sync::Arc;
use tokio::net::TcpListener;

const HTTP_SERVICE_PATH: &str = "/mcp";

pub async fn run_server(config: ServerConfig) -> Result<()> {
    let config = Arc::new(config);
    let state = Arc::new(AppState::new(config.clone()));

    tracing::info!(
        transport = %config.transport,
        base_url = %config.base_url,
        "starting sheetlink MCP server",
    );

    match config.transport {
        TransportKind::Stdio => {
            let server = SheetsServer::from_state(state);
            server.run_stdio().await
        }
        TransportKind::Http => run_stream_http_transport(config, state).await,
    }
}

async fn run_stream_http_transport(config: Arc<ServerConfig>, state: Arc<AppState>) -> Result<()> {
    let bind_addr = config.http_bind_address;
    let service_state = state.clone();
    let service = StreamableHttpService::new(
        move || Ok(SheetsServer::from_state(service_state.clone())),
        LocalSessionManager::default().into(),
        Default::default(),
    );

    let router = Router::new()
        .nest_service(HTTP_SERVICE_PATH, service)
        .route("/health", axum::routing::get(health::liveness_handler))
        .route("/ready", axum::routing::get(health::readiness_handler));

    let listener = TcpListener::bind(bind_addr).await?;
    let actual_addr = listener.local_addr()?;
    tracing::info!(transport = "http", bind = %actual_addr, path = HTTP_SERVICE_PATH, "listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("shutdown signal received");
        })
        .await
        .map_err(anyhow::Error::from)
}
