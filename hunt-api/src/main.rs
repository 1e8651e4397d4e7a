//! # Hunt API Server
//!
//! HTTP server for scavenger hunts and their tasks, backed by MongoDB.
//!
//! ## Usage
//!
//! ```bash
//! MONGO_ADDR=localhost cargo run -p hunt-api
//! ```

use hunt_api::{
    app::{build_router, AppState},
    config::Config,
};
use hunt_shared::db::{
    client::{create_database, ensure_indexes},
    MongoStore,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hunt_api=debug,hunt_shared=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Hunt API Server v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = Config::from_env()?;

    let database = create_database(config.database.clone()).await?;
    ensure_indexes(&database).await?;

    let state = AppState::new(Arc::new(MongoStore::new(database)), config.clone());
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    tracing::info!("Server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, exiting...");
}
