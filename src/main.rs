//! Catalog - file and link catalogue service
//!
//! Accepts document, image and PDF uploads or external links, keeps their
//! metadata in SQLite and serves a listing to the browser front-end.

use std::net::SocketAddr;

use anyhow::Context;
use catalog::{api, AppState, Config};
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::from_env();

    // Initialize tracing
    let json_logs = config.log.json;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "catalog=debug,tower_http=debug".into()),
        )
        .with(json_logs.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json_logs).then(tracing_subscriber::fmt::layer))
        .init();

    tracing::info!(
        "Starting catalog server on {}:{}",
        config.server.host,
        config.server.port
    );

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid listen address")?;

    // Initialize application state
    let state = AppState::new(config)
        .await
        .context("Failed to initialize application state")?;
    tracing::info!(
        upload_dir = %state.config.storage.upload_dir.display(),
        "Application state initialized"
    );

    let app = api::app(state);

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
