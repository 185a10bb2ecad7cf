//! Caller check, password reset and change, and user listing.

use std::sync::Arc;

use tracing::{info, warn};

use authgate_core::error::AppError;
use authgate_core::model::User;
use authgate_core::traits::UserStore;

use crate::identity::AuthenticatedIdentity;
use crate::password::{PasswordHasher, PasswordValidator};

/// Account operations for authenticated callers.
#[derive(Clone)]
pub struct AccountService {
    users: Arc<dyn UserStore>,
    hasher: Arc<PasswordHasher>,
    validator: PasswordValidator,
}

impl std::fmt::Debug for AccountService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountService")
            .field("users", &self.users)
            .field("validator", &self.validator)
            .finish_non_exhaustive()
    }
}

impl AccountService {
    /// Create a new account service.
    pub fn new(
        users: Arc<dyn UserStore>,
        hasher: Arc<PasswordHasher>,
        validator: PasswordValidator,
    ) -> Self {
        Self {
            users,
            hasher,
            validator,
        }
    }

    /// Confirm the caller is still an active user and return their record.
    pub async fn authenticate(&self, identity: &AuthenticatedIdentity) -> Result<User, AppError> {
        self.users
            .get_active_user(&identity.email)
            .await?
            .filter(|user| user.id == identity.user_id)
            .ok_or_else(|| {
                AppError::unauthenticated(&identity.email, "caller is no longer an active user")
            })
    }

    /// Accept a password reset request for an existing account.
    ///
    /// Delivering the reset link happens outside this service.
    pub async fn reset_password(&self, email: &str) -> Result<(), AppError> {
        require_email(email)?;
        if self.users.get_active_user(email).await?.is_none() {
            warn!(email = %email, "Password reset for unknown account");
            return Err(AppError::unauthenticated(email, "no active account to reset"));
        }
        info!(email = %email, "Password reset requested");
        Ok(())
    }

    /// Set a new password for `email`.
    ///
    /// Callers may change their own password; admins may change anyone's.
    pub async fn set_password(
        &self,
        identity: &AuthenticatedIdentity,
        email: &str,
        new_password: &str,
    ) -> Result<(), AppError> {
        require_email(email)?;
        if identity.email != email && !identity.role.is_admin() {
            warn!(email = %email, caller = %identity.email, "Password change for another account refused");
            return Err(AppError::permission_denied(&identity.email));
        }

        self.validator.validate(new_password)?;
        let hash = self.hasher.hash(new_password)?;

        let updated = self
            .users
            .update_password(email, &hash)
            .await
            .map_err(|e| AppError::permission_denied(email).caused_by(e))?;
        if !updated {
            return Err(AppError::unauthenticated(email, "no active account to update"));
        }

        info!(email = %email, caller = %identity.email, "Password updated");
        Ok(())
    }

    /// Every user record, deleted ones included.
    pub async fn load_users(&self) -> Result<Vec<User>, AppError> {
        self.users.load_users().await
    }
}

fn require_email(email: &str) -> Result<(), AppError> {
    if email.trim().is_empty() {
        return Err(AppError::invalid_argument(
            "Invalid argument",
            "email must not be empty",
        ));
    }
    Ok(())
}
