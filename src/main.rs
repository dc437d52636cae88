//! `emotilive-server` - HTTP server binary for the log service

use anyhow::Context;
use emotilive_log::api::{router, AppState};
use emotilive_log::store::{JsonlLogStore, MemoryLogStore};
use emotilive_log::trigger::ScriptTrigger;
use emotilive_log::ServiceConfig;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServiceConfig::from_env();

    let trigger = Arc::new(
        config.emotion_model().map_or_else(
            || ScriptTrigger::python_script("models/emotion_model/main.py"),
            ScriptTrigger::python_script,
        ),
    );

    let app = match config.data_dir() {
        Some(dir) => {
            let store = Arc::new(
                JsonlLogStore::open(dir)
                    .await
                    .with_context(|| format!("opening log store in {}", dir.display()))?,
            );
            router(AppState::new(store, trigger))
        }
        None => {
            warn!("EMOTILIVE_DATA_DIR not set, logs will not survive restarts");
            router(AppState::new(Arc::new(MemoryLogStore::new()), trigger))
        }
    };

    let (listener, addr) = bind_with_port_fallback(config.port())
        .await
        .context("failed to bind any port")?;
    info!(%addr, "emotilive-server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Bind the configured port, falling back through the next few if taken.
async fn bind_with_port_fallback(start_port: u16) -> std::io::Result<(TcpListener, SocketAddr)> {
    for port in start_port..start_port.saturating_add(10) {
        let addr = SocketAddr::from(([127, 0, 0, 1], port));
        match TcpListener::bind(addr).await {
            Ok(listener) => return Ok((listener, addr)),
            Err(e) if e.kind() == std::io::ErrorKind::AddrInUse => continue,
            Err(e) => return Err(e),
        }
    }
    Err(std::io::Error::new(
        std::io::ErrorKind::AddrInUse,
        "all fallback ports in use",
    ))
}
