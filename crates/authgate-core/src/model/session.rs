//! The one-per-user session record.

use chrono::{DateTime, Utc};

use crate::types::UserId;

/// Binds a user to their current refresh token.
///
/// `version` is drawn from a store-wide counter on every write and is the
/// compare-and-swap handle for token rotation. It is never reused, even after
/// the record is removed and created again.
#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct SessionRecord {
    /// Owning user; also the session key.
    pub user_id: UserId,
    /// Credential hash of the live refresh token.
    pub refresh_token_hash: String,
    /// Absolute expiry of the refresh token.
    pub expires_at: DateTime<Utc>,
    /// Store-wide write counter value.
    pub version: i64,
}

impl SessionRecord {
    /// Whether the refresh token has expired at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

impl std::fmt::Debug for SessionRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionRecord")
            .field("user_id", &self.user_id)
            .field("expires_at", &self.expires_at)
            .field("version", &self.version)
            .finish_non_exhaustive()
    }
}
