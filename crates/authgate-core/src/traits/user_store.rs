//! User store contract.

use async_trait::async_trait;

use crate::model::User;
use crate::result::AppResult;

/// Read access to user profiles plus the single credential write.
#[async_trait]
pub trait UserStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find a non-deleted user by email. `None` when absent or deleted.
    async fn get_active_user(&self, email: &str) -> AppResult<Option<User>>;

    /// Replace the credential hash of an active user.
    ///
    /// Returns `false` when no active user has that email.
    async fn update_password(&self, email: &str, password_hash: &str) -> AppResult<bool>;

    /// All users, deleted ones included, ordered by name.
    async fn load_users(&self) -> AppResult<Vec<User>>;
}
