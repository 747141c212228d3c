//! HTTP server initialization and runtime setup.
//!
//! Handles the database pool, migrations, the login attempt store, and the
//! Axum server lifecycle.

use crate::config::Config;
use crate::infrastructure::throttle::{AttemptStore, NullAttemptStore, RedisAttemptStore};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool
/// - Apply migrations
/// - Login attempt store (Redis, or a no-op store when Redis is unavailable)
/// - Axum HTTP server with graceful shutdown on Ctrl+C
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to migrate")?;

    let attempts = attempt_store(&config).await;

    let state = AppState::new(Arc::new(pool), attempts, &config);
    let app = app_router(state);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn attempt_store(config: &Config) -> Arc<dyn AttemptStore> {
    if config.login_max_attempts == 0 {
        tracing::info!("Login throttling disabled");
        return Arc::new(NullAttemptStore::new());
    }

    let Some(redis_url) = &config.redis_url else {
        tracing::warn!("REDIS_URL not set, failed logins are not throttled");
        return Arc::new(NullAttemptStore::new());
    };

    match RedisAttemptStore::connect(redis_url, config.login_attempt_window_seconds).await {
        Ok(store) => {
            tracing::info!("Login throttling enabled (Redis)");
            Arc::new(store)
        }
        Err(e) => {
            tracing::warn!("Failed to connect to Redis: {}. Login throttling disabled.", e);
            Arc::new(NullAttemptStore::new())
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
