//! Session lifecycle: sign-in, refresh-token rotation, sign-out.
//!
//! Each user has at most one live session. Sign-in overwrites it; refresh
//! swaps it through the store's version check so that two refreshes racing
//! with the same token cannot both win.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use authgate_core::error::AppError;
use authgate_core::model::User;
use authgate_core::traits::{SessionStore, UserStore};
use authgate_core::types::{DeviceId, InstallationId};

use crate::identity::AuthenticatedIdentity;
use crate::jwt::{JwtEncoder, RefreshToken, RefreshTokenGenerator};
use crate::password::PasswordHasher;

/// Access token plus the refresh token that rotates it.
#[derive(Debug, Clone)]
pub struct TokenPair {
    /// Signed access token.
    pub access_token: String,
    /// Opaque refresh token with its expiry.
    pub refresh: RefreshToken,
}

/// Result of a successful sign-in.
#[derive(Debug, Clone)]
pub struct SignInResult {
    /// Issued tokens.
    pub tokens: TokenPair,
    /// The signed-in user.
    pub user: User,
}

/// Sequences credential checks, token issuance, and session persistence.
#[derive(Clone)]
pub struct SessionManager {
    users: Arc<dyn UserStore>,
    sessions: Arc<dyn SessionStore>,
    hasher: Arc<PasswordHasher>,
    encoder: Arc<JwtEncoder>,
    refresh_tokens: Arc<RefreshTokenGenerator>,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("users", &self.users)
            .field("sessions", &self.sessions)
            .finish_non_exhaustive()
    }
}

impl SessionManager {
    /// Create a new session manager.
    pub fn new(
        users: Arc<dyn UserStore>,
        sessions: Arc<dyn SessionStore>,
        hasher: Arc<PasswordHasher>,
        encoder: Arc<JwtEncoder>,
        refresh_tokens: Arc<RefreshTokenGenerator>,
    ) -> Self {
        Self {
            users,
            sessions,
            hasher,
            encoder,
            refresh_tokens,
        }
    }

    /// Verify credentials and open a session, replacing any prior one.
    ///
    /// An unknown account and a wrong password produce the same error.
    pub async fn sign_in(
        &self,
        email: &str,
        password: &str,
        device_id: DeviceId,
        installation_id: InstallationId,
    ) -> Result<SignInResult, AppError> {
        if email.trim().is_empty() {
            return Err(AppError::invalid_argument(
                "Invalid argument",
                "email must not be empty",
            ));
        }

        info!(email = %email, "Sign in started");
        match self
            .try_sign_in(email, password, device_id, installation_id)
            .await
        {
            Ok(result) => {
                info!(email = %email, user_id = %result.user.id, "Sign in succeeded");
                Ok(result)
            }
            Err(e) => {
                warn!(email = %email, kind = %e.kind, "Sign in failed");
                Err(e)
            }
        }
    }

    async fn try_sign_in(
        &self,
        email: &str,
        password: &str,
        device_id: DeviceId,
        installation_id: InstallationId,
    ) -> Result<SignInResult, AppError> {
        let Some(user) = self.users.get_active_user(email).await? else {
            self.hasher.mimic_verify(password);
            return Err(AppError::unauthenticated(email, "no active user with this email"));
        };

        if !self.hasher.verify(password, &user.password) {
            return Err(AppError::unauthenticated(email, "password does not match"));
        }

        let tokens = self.issue_tokens(&user, device_id, installation_id)?;
        let hash = self.hasher.hash(&tokens.refresh.token)?;

        self.sessions
            .save_session(user.id, &hash, tokens.refresh.expires_at)
            .await
            .map_err(|e| AppError::permission_denied(email).caused_by(e))?;

        Ok(SignInResult { tokens, user })
    }

    /// Exchange the caller's refresh token for a new pair.
    ///
    /// The presented token is single-use: on success it no longer verifies.
    pub async fn refresh(
        &self,
        identity: &AuthenticatedIdentity,
        presented: &str,
    ) -> Result<TokenPair, AppError> {
        let email = identity.email.as_str();
        info!(email = %email, "Token refresh started");
        match self.try_refresh(identity, presented).await {
            Ok(tokens) => {
                info!(email = %email, "Token refresh succeeded");
                Ok(tokens)
            }
            Err(e) => {
                warn!(email = %email, kind = %e.kind, "Token refresh failed");
                Err(e)
            }
        }
    }

    async fn try_refresh(
        &self,
        identity: &AuthenticatedIdentity,
        presented: &str,
    ) -> Result<TokenPair, AppError> {
        let email = identity.email.as_str();

        let record = self
            .sessions
            .load_session(identity.user_id)
            .await?
            .ok_or_else(|| AppError::unauthenticated(email, "no session record"))?;

        if record.user_id != identity.user_id || record.is_expired_at(Utc::now()) {
            return Err(AppError::unauthenticated(
                email,
                "session record is expired or belongs to another user",
            ));
        }

        if !self.hasher.verify(presented, &record.refresh_token_hash) {
            return Err(AppError::unauthenticated(
                email,
                "refresh token does not match the session",
            ));
        }

        let user = self
            .users
            .get_active_user(email)
            .await?
            .filter(|user| user.id == identity.user_id)
            .ok_or_else(|| AppError::unauthenticated(email, "user is no longer active"))?;

        let tokens = self.issue_tokens(&user, identity.device_id, identity.installation_id)?;
        let hash = self.hasher.hash(&tokens.refresh.token)?;

        let swapped = self
            .sessions
            .replace_session(user.id, record.version, &hash, tokens.refresh.expires_at)
            .await
            .map_err(|e| AppError::permission_denied(email).caused_by(e))?;

        if !swapped {
            return Err(AppError::unauthenticated(email, "session changed during refresh"));
        }

        Ok(tokens)
    }

    /// End the caller's session. Ending an absent session succeeds.
    pub async fn sign_out(&self, identity: &AuthenticatedIdentity) -> Result<(), AppError> {
        let email = identity.email.as_str();
        info!(email = %email, "Sign out started");
        match self.sessions.end_session(identity.user_id).await {
            Ok(()) => {
                info!(email = %email, "Sign out succeeded");
                Ok(())
            }
            Err(e) => {
                warn!(email = %email, kind = %e.kind, "Sign out failed");
                Err(AppError::permission_denied(email).caused_by(e))
            }
        }
    }

    fn issue_tokens(
        &self,
        user: &User,
        device_id: DeviceId,
        installation_id: InstallationId,
    ) -> Result<TokenPair, AppError> {
        let access_token = self
            .encoder
            .issue_access_token(user, device_id, installation_id)?;
        let refresh = self.refresh_tokens.issue()?;
        Ok(TokenPair {
            access_token,
            refresh,
        })
    }
}
