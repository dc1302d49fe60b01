use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use todo_items_api::app::{app, AppState};
use todo_items_api::{config, is_development};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, TODO_STORE, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = config::config();
    info!("Starting Todo Items API in {:?} mode", config.environment);

    if config.identity.fallback_enabled {
        if is_development!() {
            info!(
                "Requests without {} act as {}",
                config.identity.principal_header, config.identity.fallback_unique_name
            );
        } else {
            warn!(
                "Development fallback identity {} is enabled outside development",
                config.identity.fallback_unique_name
            );
        }
    }

    let state = AppState::from_config(config)
        .await
        .context("failed to initialize item store")?;
    let app = app(state, config);

    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    info!("Todo Items API listening on http://{}{}", bind_addr, config.server.route_prefix);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    info!("Shutting down");
}
