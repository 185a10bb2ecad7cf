//! Application state shared across handlers and middleware.

use std::sync::Arc;

use authgate_auth::{
    AccountService, JwtDecoder, JwtEncoder, PasswordHasher, PasswordValidator,
    RefreshTokenGenerator, SessionManager,
};
use authgate_core::config::AppConfig;
use authgate_core::error::AppError;
use authgate_core::traits::{SessionStore, UserStore};

use crate::middleware::api_key::ApiKeyGate;
use crate::middleware::auth::AuthGate;

/// Shared dependencies, cheap to clone.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Immutable configuration.
    pub config: Arc<AppConfig>,
    /// Sign-in, refresh, sign-out.
    pub session_manager: Arc<SessionManager>,
    /// Account operations.
    pub accounts: Arc<AccountService>,
    /// Bearer-token gate.
    pub auth_gate: Arc<AuthGate>,
    /// Pre-shared key gate; `None` when no key is configured.
    pub api_key_gate: Option<Arc<ApiKeyGate>>,
}

impl AppState {
    /// Wire the authentication core over the given stores.
    pub fn new(
        config: AppConfig,
        users: Arc<dyn UserStore>,
        sessions: Arc<dyn SessionStore>,
    ) -> Result<Self, AppError> {
        config.auth.validate()?;
        let hasher = Arc::new(PasswordHasher::from_config(&config.auth)?);

        let session_manager = SessionManager::new(
            Arc::clone(&users),
            sessions,
            Arc::clone(&hasher),
            Arc::new(JwtEncoder::new(&config.auth)),
            Arc::new(RefreshTokenGenerator::new(&config.auth)),
        );
        let accounts = AccountService::new(users, hasher, PasswordValidator::new(&config.auth));

        let auth_gate = AuthGate::new(
            JwtDecoder::new(&config.auth),
            config.auth.allowed_methods.iter().cloned(),
        );
        let api_key_gate = match &config.auth.api_key {
            Some(key) => Some(Arc::new(ApiKeyGate::new(&config.auth.api_key_header, key)?)),
            None => None,
        };

        Ok(Self {
            config: Arc::new(config),
            session_manager: Arc::new(session_manager),
            accounts: Arc::new(accounts),
            auth_gate: Arc::new(auth_gate),
            api_key_gate,
        })
    }
}
