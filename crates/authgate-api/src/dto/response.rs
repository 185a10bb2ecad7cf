//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use authgate_auth::{SignInResult, TokenPair};
use authgate_core::model::{User, UserRole};
use authgate_core::types::UserId;

/// `SignIn` reply.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthInfoResponse {
    /// Signed-in user.
    pub user_id: UserId,
    /// Display name.
    pub user_name: String,
    /// Role.
    pub user_role: UserRole,
    /// Avatar placeholder, when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blurhash: Option<String>,
    /// Signed access token.
    pub access_token: String,
    /// Opaque refresh token.
    pub refresh_token: String,
    /// Refresh token expiry.
    pub expires_at: DateTime<Utc>,
}

impl From<SignInResult> for AuthInfoResponse {
    fn from(result: SignInResult) -> Self {
        Self {
            user_id: result.user.id,
            user_name: result.user.name,
            user_role: result.user.role,
            blurhash: result.user.blurhash,
            access_token: result.tokens.access_token,
            refresh_token: result.tokens.refresh.token,
            expires_at: result.tokens.refresh.expires_at,
        }
    }
}

/// `RefreshToken` reply.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenResponse {
    /// Signed access token.
    pub access_token: String,
    /// Replacement refresh token.
    pub refresh_token: String,
    /// Refresh token expiry.
    pub expires_at: DateTime<Utc>,
}

impl From<TokenPair> for RefreshTokenResponse {
    fn from(tokens: TokenPair) -> Self {
        Self {
            access_token: tokens.access_token,
            refresh_token: tokens.refresh.token,
            expires_at: tokens.refresh.expires_at,
        }
    }
}

/// Plain acknowledgement.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ResultResponse {
    /// Always `true` on success.
    pub result: bool,
}

impl ResultResponse {
    /// A successful acknowledgement.
    pub fn ok() -> Self {
        Self { result: true }
    }
}

/// Public user fields, one per line of the `LoadUsersInfo` stream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfoResponse {
    /// User id.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Email.
    pub email: String,
    /// Role.
    pub role: UserRole,
    /// Soft-delete flag.
    pub deleted: bool,
    /// Avatar placeholder, when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blurhash: Option<String>,
}

impl From<User> for UserInfoResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            deleted: user.deleted,
            blurhash: user.blurhash,
        }
    }
}
