//! Opaque refresh tokens.

use argon2::password_hash::rand_core::{OsRng, RngCore};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE;
use chrono::{DateTime, Duration, Utc};

use authgate_core::config::AuthConfig;
use authgate_core::error::AppError;

/// Random bytes per refresh token. Encodes to exactly 72 characters, the
/// credential hasher's input limit.
pub const REFRESH_TOKEN_BYTES: usize = 54;

/// A freshly minted refresh token.
#[derive(Clone)]
pub struct RefreshToken {
    /// URL-safe encoded secret handed to the client.
    pub token: String,
    /// Absolute expiry.
    pub expires_at: DateTime<Utc>,
}

impl std::fmt::Debug for RefreshToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RefreshToken")
            .field("expires_at", &self.expires_at)
            .finish_non_exhaustive()
    }
}

/// Draws refresh tokens from the OS random source.
#[derive(Debug, Clone)]
pub struct RefreshTokenGenerator {
    ttl: Duration,
}

impl RefreshTokenGenerator {
    /// Create a generator from the `auth` section.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            ttl: Duration::days(config.refresh_ttl_days as i64),
        }
    }

    /// Mint a new token expiring `refresh_ttl_days` from now.
    pub fn issue(&self) -> Result<RefreshToken, AppError> {
        let mut buf = [0u8; REFRESH_TOKEN_BYTES];
        OsRng.try_fill_bytes(&mut buf).map_err(|e| {
            AppError::internal(
                "Failed to issue token",
                format!("Random source failure: {e}"),
            )
        })?;

        Ok(RefreshToken {
            token: URL_SAFE.encode(buf),
            expires_at: Utc::now() + self.ttl,
        })
    }
}
