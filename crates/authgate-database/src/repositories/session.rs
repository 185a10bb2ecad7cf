//! Session store over the `user_sessions` table.
//!
//! One row per user. Every write draws a fresh `version` from
//! `user_session_version_seq`, so a version never repeats across a row that
//! was deleted and recreated. It guards refresh rotation through a
//! conditional `UPDATE`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use authgate_core::model::SessionRecord;
use authgate_core::result::AppResult;
use authgate_core::traits::SessionStore;
use authgate_core::types::UserId;

use crate::store_error;

/// PostgreSQL-backed [`SessionStore`].
#[derive(Debug, Clone)]
pub struct PgSessionStore {
    pool: PgPool,
}

impl PgSessionStore {
    /// Create a new session store.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionStore for PgSessionStore {
    async fn load_session(&self, user_id: UserId) -> AppResult<Option<SessionRecord>> {
        sqlx::query_as::<_, SessionRecord>(
            "SELECT user_id, refresh_token_hash, expires_at, version \
             FROM user_sessions WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| store_error("load session", e))
    }

    async fn save_session(
        &self,
        user_id: UserId,
        refresh_token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> AppResult<SessionRecord> {
        sqlx::query_as::<_, SessionRecord>(
            "INSERT INTO user_sessions (user_id, refresh_token_hash, expires_at, version) \
             VALUES ($1, $2, $3, nextval('user_session_version_seq')) \
             ON CONFLICT (user_id) DO UPDATE SET \
                 refresh_token_hash = EXCLUDED.refresh_token_hash, \
                 expires_at = EXCLUDED.expires_at, \
                 version = EXCLUDED.version, \
                 updated_at = NOW() \
             RETURNING user_id, refresh_token_hash, expires_at, version",
        )
        .bind(user_id)
        .bind(refresh_token_hash)
        .bind(expires_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| store_error("save session", e))
    }

    async fn replace_session(
        &self,
        user_id: UserId,
        expected_version: i64,
        refresh_token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE user_sessions SET \
                 refresh_token_hash = $3, \
                 expires_at = $4, \
                 version = nextval('user_session_version_seq'), \
                 updated_at = NOW() \
             WHERE user_id = $1 AND version = $2",
        )
        .bind(user_id)
        .bind(expected_version)
        .bind(refresh_token_hash)
        .bind(expires_at)
        .execute(&self.pool)
        .await
        .map_err(|e| store_error("replace session", e))?;
        Ok(result.rows_affected() == 1)
    }

    async fn end_session(&self, user_id: UserId) -> AppResult<()> {
        sqlx::query("DELETE FROM user_sessions WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| store_error("end session", e))?;
        Ok(())
    }
}
