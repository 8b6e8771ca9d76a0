// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Snow-Report API Server
//!
//! Serves ski resort conditions, cached once per day, along with the
//! history assembled from those daily snapshots and archive weather.

use snow_report::{
    config::Config,
    db::FileSnapshotStore,
    services::ResortCatalog,
    time_utils::{Clock, SystemClock},
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(port = config.port, "Starting Snow-Report API");

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    // Snapshot cache on local disk
    let store = FileSnapshotStore::new(&config.cache_dir, clock.clone())
        .with_retention_days(config.cache_retention_days);
    tracing::info!(
        dir = %config.cache_dir.display(),
        retention_days = config.cache_retention_days,
        "Snapshot cache initialized"
    );

    // Load ski area reference data
    tracing::info!(path = %config.resorts_path.display(), "Loading ski area catalog");
    let catalog = ResortCatalog::load_from_file(&config.resorts_path)
        .expect("Failed to load ski area catalog");
    tracing::info!(count = catalog.resorts().len(), "Ski area catalog loaded");

    // Build shared state
    let state = Arc::new(AppState::new(config.clone(), Arc::new(store), clock, catalog));

    // Build router
    let app = snow_report::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("snow_report=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
