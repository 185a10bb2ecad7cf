//! Application builder and server runner.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;

use authgate_core::config::AppConfig;
use authgate_core::error::AppError;
use authgate_database::{DatabasePool, PgSessionStore, PgUserStore};

use crate::router::build_router;
use crate::state::AppState;

/// Build the complete application over the given state.
pub fn build_app(state: AppState) -> Router {
    build_router(state)
}

/// Connect to PostgreSQL, wire the state, and serve until a shutdown signal.
pub async fn run_server(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Authgate v{}", env!("CARGO_PKG_VERSION"));

    let db = DatabasePool::connect(&config.database).await?;
    let users = Arc::new(PgUserStore::new(db.pool().clone()));
    let sessions = Arc::new(PgSessionStore::new(db.pool().clone()));

    let addr = config.server.bind_address();
    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);
    let state = AppState::new(config, users, sessions)?;
    tracing::info!(
        allowed_methods = ?state.config.auth.allowed_methods,
        api_key_gate = state.api_key_gate.is_some(),
        "Gates configured"
    );

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal("Server error", format!("Failed to bind {addr}: {e}")).caused_by(e))?;
    tracing::info!("Authgate listening on {}", addr);

    axum::serve(listener, build_app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal("Server error", format!("Server error: {e}")).caused_by(e))?;

    tracing::info!("Draining database pool");
    if tokio::time::timeout(grace, db.close()).await.is_err() {
        tracing::warn!("Database pool did not close within {:?}", grace);
    }

    tracing::info!("Authgate shut down gracefully");
    Ok(())
}

/// Resolve on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("Shutdown signal received");
}
