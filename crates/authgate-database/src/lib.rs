//! # authgate-database
//!
//! PostgreSQL connection management and the concrete user and session
//! stores backing the authentication flows.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
pub use repositories::{PgSessionStore, PgUserStore};

use authgate_core::error::AppError;

/// Wrap a driver error as an internal store failure.
pub(crate) fn store_error(action: &str, err: sqlx::Error) -> AppError {
    AppError::internal("Store failure", format!("Failed to {action}: {err}")).caused_by(err)
}
