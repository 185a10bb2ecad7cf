//! Access token signing.

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use uuid::Uuid;

use authgate_core::config::AuthConfig;
use authgate_core::error::AppError;
use authgate_core::model::User;
use authgate_core::types::{DeviceId, InstallationId};

use super::claims::{AUDIENCE, Claims, ISSUER};

/// Signs access tokens with HMAC-SHA256.
#[derive(Clone)]
pub struct JwtEncoder {
    encoding_key: EncodingKey,
    access_ttl: Duration,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder")
            .field("access_ttl", &self.access_ttl)
            .finish_non_exhaustive()
    }
}

impl JwtEncoder {
    /// Create an encoder from the `auth` section.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            access_ttl: Duration::hours(config.access_ttl_hours as i64),
        }
    }

    /// Build and sign the claim set for `user` on the given client install.
    pub fn issue_access_token(
        &self,
        user: &User,
        device_id: DeviceId,
        installation_id: InstallationId,
    ) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            iss: ISSUER.to_string(),
            aud: AUDIENCE.to_string(),
            sub: user.name.clone(),
            jti: Uuid::new_v4(),
            iat: now.timestamp(),
            exp: (now + self.access_ttl).timestamp(),
            role: user.role,
            user_email: user.email.clone(),
            user_id: user.id,
            device_id,
            installation_id,
        };
        self.sign(&claims)
    }

    /// Sign an arbitrary claim set.
    pub fn sign(&self, claims: &Claims) -> Result<String, AppError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key).map_err(|e| {
            AppError::internal(
                "Failed to issue token",
                format!("Failed to sign access token: {e}"),
            )
        })
    }
}
