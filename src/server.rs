//! HTTP server initialization and runtime setup.
//!
//! Handles store selection, database connections, and Axum server lifecycle.

use crate::config::Config;
use crate::domain::repositories::UrlRepository;
use crate::infrastructure::persistence::{InMemoryUrlRepository, PgUrlRepository};
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
/// - The mapping store: PostgreSQL when configured, in-memory otherwise
/// - Migrations (PostgreSQL only)
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let repository: Arc<dyn UrlRepository> = match &config.database_url {
        Some(database_url) => {
            let pool = PgPoolOptions::new()
                .max_connections(config.db_max_connections)
                .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
                .idle_timeout(Duration::from_secs(config.db_idle_timeout))
                .max_lifetime(Duration::from_secs(config.db_max_lifetime))
                .connect(database_url)
                .await
                .context("Failed to connect to database")?;
            tracing::info!("Connected to database");

            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .context("Failed to run migrations")?;

            Arc::new(PgUrlRepository::new(pool, config.store_timeout()))
        }
        None => {
            tracing::warn!("No database configured; mappings will not survive a restart");
            Arc::new(InMemoryUrlRepository::new())
        }
    };

    let state = AppState::new(repository, &config);

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    Ok(())
}

/// Resolves when the process receives Ctrl+C.
///
/// If the signal handler cannot be installed the future stays pending,
/// the server then runs until the process is killed.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to install shutdown signal handler: {e}");
        std::future::pending::<()>().await;
    }

    tracing::info!("Shutdown signal received, draining in-flight requests");
}
