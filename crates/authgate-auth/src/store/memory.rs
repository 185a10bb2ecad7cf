//! `DashMap`-backed user and session stores.
//!
//! Session writes hold the entry's shard lock for the whole
//! compare-and-swap, matching the single-statement guarantees of the
//! PostgreSQL store. Versions come from one counter per store, like the
//! PostgreSQL sequence.

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;

use authgate_core::model::{SessionRecord, User};
use authgate_core::result::AppResult;
use authgate_core::traits::{SessionStore, UserStore};
use authgate_core::types::UserId;

/// User store keyed by email.
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    users: DashMap<String, User>,
}

impl MemoryUserStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a user.
    pub fn insert(&self, user: User) {
        self.users.insert(user.email.clone(), user);
    }

    /// Soft-delete a user. Returns `false` when unknown.
    pub fn mark_deleted(&self, email: &str) -> bool {
        match self.users.get_mut(email) {
            Some(mut user) => {
                user.deleted = true;
                true
            }
            None => false,
        }
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn get_active_user(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self
            .users
            .get(email)
            .filter(|user| user.is_active())
            .map(|user| user.value().clone()))
    }

    async fn update_password(&self, email: &str, password_hash: &str) -> AppResult<bool> {
        match self.users.get_mut(email) {
            Some(mut user) if user.is_active() => {
                user.password = password_hash.to_string();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn load_users(&self) -> AppResult<Vec<User>> {
        let mut users: Vec<User> = self.users.iter().map(|e| e.value().clone()).collect();
        users.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(users)
    }
}

/// Session store keyed by user id.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    sessions: DashMap<UserId, SessionRecord>,
    last_version: AtomicI64,
}

impl MemorySessionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live records.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether no records are held.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    fn next_version(&self) -> i64 {
        self.last_version.fetch_add(1, Ordering::Relaxed) + 1
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn load_session(&self, user_id: UserId) -> AppResult<Option<SessionRecord>> {
        Ok(self.sessions.get(&user_id).map(|record| record.value().clone()))
    }

    async fn save_session(
        &self,
        user_id: UserId,
        refresh_token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> AppResult<SessionRecord> {
        let record = SessionRecord {
            user_id,
            refresh_token_hash: refresh_token_hash.to_string(),
            expires_at,
            version: self.next_version(),
        };
        self.sessions.insert(user_id, record.clone());
        Ok(record)
    }

    async fn replace_session(
        &self,
        user_id: UserId,
        expected_version: i64,
        refresh_token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> AppResult<bool> {
        match self.sessions.get_mut(&user_id) {
            Some(mut record) if record.version == expected_version => {
                record.refresh_token_hash = refresh_token_hash.to_string();
                record.expires_at = expires_at;
                record.version = self.next_version();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn end_session(&self, user_id: UserId) -> AppResult<()> {
        self.sessions.remove(&user_id);
        Ok(())
    }
}
