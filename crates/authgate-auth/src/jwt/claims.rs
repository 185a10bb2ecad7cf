//! Claim set carried by every access token.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use authgate_core::model::UserRole;
use authgate_core::types::{DeviceId, InstallationId, UserId};

/// Value of the `iss` claim.
pub const ISSUER: &str = "auth-service";

/// Value of the `aud` claim.
pub const AUDIENCE: &str = "auth-service";

/// Access token payload.
///
/// Deserialization is the validation boundary: a missing claim, an unknown
/// role, or an identifier that is not a UUID fails to parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Issuer.
    pub iss: String,
    /// Audience.
    pub aud: String,
    /// Subject; the user's display name.
    pub sub: String,
    /// Per-issuance nonce.
    pub jti: Uuid,
    /// Issued-at, seconds since epoch.
    pub iat: i64,
    /// Expiry, seconds since epoch.
    pub exp: i64,
    /// Role at the time of issuance.
    pub role: UserRole,
    /// Email of the acting principal.
    #[serde(rename = "userEmail")]
    pub user_email: String,
    /// Id of the acting principal.
    #[serde(rename = "userId")]
    pub user_id: UserId,
    /// Originating client device.
    #[serde(rename = "device")]
    pub device_id: DeviceId,
    /// Originating client installation.
    #[serde(rename = "installation")]
    pub installation_id: InstallationId,
}

impl Claims {
    /// Expiry as a timestamp.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}
