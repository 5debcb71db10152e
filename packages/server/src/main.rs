//! Blog Server Binary
//!
//! Connects to the graph store described by the environment and serves the
//! JSON API until interrupted.
//!
//! # Usage
//!
//! ```bash
//! # In-memory store on port 5000
//! cargo run --bin blog-server
//!
//! # Persistent store on a custom port
//! BLOG_DB_URI=rocksdb://./blog.db BLOG_SERVER_PORT=8080 cargo run --bin blog-server
//! ```
//!
//! # Environment Variables
//!
//! - `BLOG_DB_URI`, `BLOG_DB_NS`, `BLOG_DB_NAME`, `BLOG_DB_USER`, `BLOG_DB_PASS`:
//!   store connection, see `RepositoryConfig::from_env`
//! - `BLOG_SERVER_HOST`: Bind address (default: 127.0.0.1)
//! - `BLOG_SERVER_PORT`: Server port (default: 5000)
//! - `BLOG_CORS_ALLOW_ORIGIN`: Comma separated allowed origins (default: any)
//! - `RUST_LOG`: Logging level (e.g., "info", "debug", "trace")

use std::env;
use std::sync::Arc;

use blog_graph_core::{BlogRepository, RepositoryConfig};
use blog_graph_server::{start_server, AppState};

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 5000;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let host = env::var("BLOG_SERVER_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());
    let port = env::var("BLOG_SERVER_PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(DEFAULT_PORT);

    let config = RepositoryConfig::from_env();
    tracing::info!(
        "Store: {} (ns={}, db={})",
        config.uri,
        config.namespace,
        config.database
    );

    let repository = Arc::new(BlogRepository::connect(&config).await?);

    start_server(
        AppState::new(Arc::clone(&repository)),
        &host,
        port,
        shutdown_signal(),
    )
    .await?;

    match Arc::try_unwrap(repository) {
        Ok(repository) => repository.close(),
        Err(_) => tracing::warn!("Repository still shared at shutdown, skipping close"),
    }

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown requested");
}
