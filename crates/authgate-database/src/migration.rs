//! Schema migration runner.

use sqlx::PgPool;
use tracing::info;

use authgate_core::error::AppError;

/// Apply every pending migration under `migrations/`.
pub async fn run_migrations(pool: &PgPool) -> Result<(), AppError> {
    info!("Running database migrations");

    sqlx::migrate!("../../migrations")
        .run(pool)
        .await
        .map_err(|e| {
            AppError::internal("Migration failed", format!("Failed to run migrations: {e}"))
                .caused_by(e)
        })?;

    info!("Database migrations completed");
    Ok(())
}
