//! Session store contract.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::model::SessionRecord;
use crate::result::AppResult;
use crate::types::UserId;

/// Persistence for the one-per-user session record.
///
/// Sign-in overwrites unconditionally; refresh goes through
/// [`SessionStore::replace_session`] so that two refreshes racing on the same
/// record cannot both succeed.
#[async_trait]
pub trait SessionStore: Send + Sync + std::fmt::Debug + 'static {
    /// Load the current record for a user.
    async fn load_session(&self, user_id: UserId) -> AppResult<Option<SessionRecord>>;

    /// Create or overwrite the record for a user under a new version.
    ///
    /// Versions come from one increasing counter for the whole store, so a
    /// version handed out before [`SessionStore::end_session`] never matches a
    /// record created afterwards.
    async fn save_session(
        &self,
        user_id: UserId,
        refresh_token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> AppResult<SessionRecord>;

    /// Overwrite the record only if its version is still `expected_version`.
    ///
    /// Returns `false` when the record changed or disappeared in between.
    async fn replace_session(
        &self,
        user_id: UserId,
        expected_version: i64,
        refresh_token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> AppResult<bool>;

    /// Remove the record. Removing an absent record is not an error.
    async fn end_session(&self, user_id: UserId) -> AppResult<()>;
}
