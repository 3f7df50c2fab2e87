//! ==============================================================================
//! main.rs - thermo-hub entry point
//! ==============================================================================
//!
//! purpose:
//!     boots the hub: loads configuration, initializes tracing, builds the
//!     shared state container, and serves the two HTTP surfaces.
//!
//! responsibilities:
//!     - load thermo-hub.toml (or compiled-in defaults)
//!     - initialize the tracing subscriber (config level, RUST_LOG wins)
//!     - build the owned HubState and wrap it for sharing
//!     - spawn the device-status listener as a background task
//!     - serve the REST surface until ctrl-c
//!
//! architecture:
//!
//!     ┌──────────────────────────────────────────────────────┐
//!     │                  thermo-hub process                  │
//!     │  ┌────────────────┐        ┌──────────────────────┐  │
//!     │  │ REST surface   │        │ status surface       │  │
//!     │  │ (port 3333)    │        │ (port 3334, /device) │  │
//!     │  └───────┬────────┘        └──────────┬───────────┘  │
//!     │          └───────────┬────────────────┘              │
//!     │                ┌─────┴──────┐                        │
//!     │                │  HubState  │  Arc<RwLock<_>>        │
//!     │                └────────────┘                        │
//!     └──────────────────────────────────────────────────────┘
//!
//! ==============================================================================

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use thermo_hub::config::HubConfig;
use thermo_hub::routes;
use thermo_hub::state::HubState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = HubConfig::load_or_default();
    init_tracing(&config.logging.level);
    config.log_summary();

    let state = HubState::shared(&config);

    let status_listener = TcpListener::bind(&config.status.bind)
        .await
        .with_context(|| format!("failed to bind status listener on {}", config.status.bind))?;
    let rest_listener = TcpListener::bind(&config.rest.bind)
        .await
        .with_context(|| format!("failed to bind REST listener on {}", config.rest.bind))?;

    // the status surface runs beside the main server, same state handle
    let status_app = routes::status_router(state.clone());
    tokio::spawn(async move {
        tracing::info!("status surface listening");
        if let Err(e) = axum::serve(status_listener, status_app).await {
            tracing::error!("status server error: {e}");
        }
    });

    let rest_app = routes::rest_router(&config, state);
    tracing::info!("REST surface listening");
    axum::serve(rest_listener, rest_app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("shut down");
    Ok(())
}

/// Tracing from the config level; an explicit RUST_LOG takes precedence.
fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for ctrl-c: {e}");
    }
}
