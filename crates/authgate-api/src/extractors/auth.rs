//! `AuthUser` extractor: the identity established by the authentication gate.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use authgate_auth::AuthenticatedIdentity;
use authgate_core::error::AppError;

/// The verified caller, available to handlers behind the authentication gate.
#[derive(Debug, Clone)]
pub struct AuthUser(pub AuthenticatedIdentity);

impl AuthUser {
    /// Consume the extractor, returning the identity.
    pub fn into_inner(self) -> AuthenticatedIdentity {
        self.0
    }
}

impl std::ops::Deref for AuthUser {
    type Target = AuthenticatedIdentity;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedIdentity>()
            .cloned()
            .map(AuthUser)
            .ok_or_else(|| AppError::rejected("no authenticated identity on request"))
    }
}
