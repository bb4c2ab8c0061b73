//! Skyroute server - airport catalog and route optimization API

use anyhow::{Context, Result};
use skyroute_core::Catalog;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use skyroute_server::api;
use skyroute_server::config::Config;
use skyroute_server::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env()
            .add_directive("skyroute_server=debug".parse()?))
        .init();

    tracing::info!("Starting Skyroute server...");

    let config = Config::from_env();
    let port = config.server_port;

    // Catalog and graph are built exactly once, before serving.
    let catalog = Catalog::load(&config.catalog_path)
        .with_context(|| format!("loading airport catalog from {}", config.catalog_path))?;
    let state = Arc::new(AppState::new(catalog, config));

    let app = api::app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
