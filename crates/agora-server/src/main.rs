//! Agora server entry point.
//!
//! Initialises tracing, loads configuration from environment variables
//! (prefixed with `AGORA_`), opens the SQLite database (running any
//! pending migrations), and serves the JSON API.

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

use agora_core::storage::{Database, DatabaseConfig, default_database_path};
use agora_server::{AppState, routes};

/// Server configuration loaded from environment variables via `envy`.
///
/// Each field maps to `AGORA_<FIELD>`:
///   - `AGORA_LISTEN_ADDR`    (default `0.0.0.0:8080`)
///   - `AGORA_DATABASE_PATH`  (default platform data dir, e.g.
///     `~/.local/share/agora/agora.db`)
#[derive(Debug, Deserialize)]
struct Config {
    /// Socket address to bind the HTTP server to.
    #[serde(default = "default_listen_addr")]
    listen_addr: String,

    /// Path to the SQLite database file.
    database_path: Option<String>,
}

fn default_listen_addr() -> String {
    "0.0.0.0:8080".to_string()
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!("agora-server starting");

    let config: Config = envy::prefixed("AGORA_")
        .from_env()
        .context("failed to load config from AGORA_* env vars")?;

    let database_path = config
        .database_path
        .map(Into::into)
        .unwrap_or_else(default_database_path);

    tracing::info!(
        listen_addr = %config.listen_addr,
        database_path = %database_path.display(),
        "configuration loaded",
    );

    let db = Database::new(DatabaseConfig::with_path(database_path))
        .await
        .context("failed to open database")?;

    let router = routes::router(AppState { db });

    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .context("failed to bind TCP listener")?;

    tracing::info!("API ready — http://{}/agents", config.listen_addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    tracing::info!("agora-server shut down");
    Ok(())
}

/// Wait for SIGINT (Ctrl-C) for graceful shutdown.
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("failed to install Ctrl-C handler");
    tracing::info!("received shutdown signal");
}
