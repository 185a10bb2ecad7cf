//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

use authgate_core::types::{DeviceId, InstallationId};

/// Client device description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceInfo {
    /// Device identifier.
    pub id: DeviceId,
}

/// `SignIn` body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SignInRequest {
    /// Login email.
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    /// Plaintext password.
    pub password: String,
    /// Originating device.
    pub device_info: DeviceInfo,
    /// Originating installation.
    pub installation_id: InstallationId,
}

/// `RefreshToken` body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenRequest {
    /// Refresh token issued by the previous sign-in or refresh.
    #[validate(length(min = 1, message = "Refresh token is required"))]
    pub refresh_token: String,
}

/// `ResetPassword` body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ResetPasswordRequest {
    /// Account email.
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
}

/// `SetPassword` body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SetPasswordRequest {
    /// Account email.
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    /// New plaintext password.
    pub password: String,
}
