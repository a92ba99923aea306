//! # Huddle API Server
//!
//! This is the main API server for Huddle, a team-management service:
//! accounts, team enrollment via shared 6-digit codes, member listings,
//! and team notes.
//!
//! ## Architecture
//!
//! The API server is built with Axum and provides:
//! - Account endpoints (register, login, profile)
//! - Team endpoints (create-team, join-team, members, team page)
//! - Note endpoints (CRUD)
//! - Bearer-token authentication on the protected routes
//!
//! ## Usage
//!
//! ```bash
//! DATABASE_URL=postgresql://... JWT_SECRET=... cargo run -p huddle-api
//! ```

use anyhow::Context;
use huddle_api::{
    app::{build_router, AppState},
    config::Config,
};
use huddle_shared::db::{migrations::run_migrations, pool};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "huddle_api=debug,huddle_shared=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "Huddle API Server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let config = Config::from_env().context("Failed to load configuration")?;

    let db = pool::create_pool(pool::DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        ..pool::DatabaseConfig::default()
    })
    .await
    .context("Failed to connect to the database")?;

    run_migrations(&db)
        .await
        .context("Failed to run database migrations")?;

    let addr = config.bind_address();
    let app = build_router(AppState::new(db, config));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server stopped");

    Ok(())
}

/// Resolves when the process receives Ctrl-C
async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown signal received, draining connections..."),
        Err(err) => tracing::error!("Failed to listen for shutdown signal: {}", err),
    }
}
