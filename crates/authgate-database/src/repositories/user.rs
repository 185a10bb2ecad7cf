//! User store over the `users` table.

use async_trait::async_trait;
use sqlx::PgPool;

use authgate_core::model::User;
use authgate_core::result::AppResult;
use authgate_core::traits::UserStore;

use crate::store_error;

const USER_COLUMNS: &str = "id, name, email, role, deleted, password, blurhash";

/// PostgreSQL-backed [`UserStore`].
#[derive(Debug, Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    /// Create a new user store.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn get_active_user(&self, email: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1 AND deleted = FALSE"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| store_error("find user by email", e))
    }

    async fn update_password(&self, email: &str, password_hash: &str) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE users SET password = $2, updated_at = NOW() \
             WHERE email = $1 AND deleted = FALSE",
        )
        .bind(email)
        .bind(password_hash)
        .execute(&self.pool)
        .await
        .map_err(|e| store_error("update password", e))?;
        Ok(result.rows_affected() == 1)
    }

    async fn load_users(&self) -> AppResult<Vec<User>> {
        sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users ORDER BY name"))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| store_error("load users", e))
    }
}
