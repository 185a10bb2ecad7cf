//! The verified caller identity.

use authgate_core::model::UserRole;
use authgate_core::types::{DeviceId, InstallationId, UserId};

use crate::jwt::Claims;

/// Who is calling, as established by a verified access token.
///
/// Produced once per request by the authentication gate and handed to
/// handlers explicitly; nothing reads it from ambient state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedIdentity {
    /// Acting user.
    pub user_id: UserId,
    /// Acting user's email.
    pub email: String,
    /// Acting user's display name.
    pub name: String,
    /// Role at token issuance.
    pub role: UserRole,
    /// Originating client device.
    pub device_id: DeviceId,
    /// Originating client installation.
    pub installation_id: InstallationId,
}

impl From<Claims> for AuthenticatedIdentity {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.user_id,
            email: claims.user_email,
            name: claims.sub,
            role: claims.role,
            device_id: claims.device_id,
            installation_id: claims.installation_id,
        }
    }
}
