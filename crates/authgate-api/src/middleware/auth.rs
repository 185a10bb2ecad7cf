//! Authentication gate: bearer-token verification per call.
//!
//! Allow-listed methods pass untouched. Every other call must carry exactly
//! one `authorization: Bearer <token>` entry whose token verifies; the
//! resulting [`AuthenticatedIdentity`] is stored in the request extensions
//! for the [`AuthUser`](crate::extractors::AuthUser) extractor. A rejected
//! call never reaches its handler.

use std::collections::HashSet;

use axum::extract::{Request, State};
use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;

use authgate_auth::{AuthenticatedIdentity, JwtDecoder};
use authgate_core::error::AppError;

use crate::state::AppState;

const BEARER: &str = "Bearer";

/// Verifies bearer tokens for every method outside the allow-list.
#[derive(Debug)]
pub struct AuthGate {
    decoder: JwtDecoder,
    allowed_methods: HashSet<String>,
}

impl AuthGate {
    /// Create a gate with the given verifier and allow-list.
    pub fn new(decoder: JwtDecoder, allowed_methods: impl IntoIterator<Item = String>) -> Self {
        Self {
            decoder,
            allowed_methods: allowed_methods.into_iter().collect(),
        }
    }

    /// Whether `method` skips verification.
    pub fn is_allowed(&self, method: &str) -> bool {
        self.allowed_methods.contains(method)
    }

    /// Decide a call.
    ///
    /// `Ok(None)` is an allow-listed bypass, `Ok(Some(_))` an authorized
    /// caller.
    pub fn authorize(
        &self,
        method: &str,
        headers: &HeaderMap,
    ) -> Result<Option<AuthenticatedIdentity>, AppError> {
        if self.is_allowed(method) {
            return Ok(None);
        }

        let token = bearer_token(headers)?;
        let claims = self.decoder.verify_access_token(token)?;
        Ok(Some(claims.into()))
    }
}

/// Extract the token from the single `authorization` entry.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AppError> {
    let mut values = headers.get_all(AUTHORIZATION).iter();
    let value = values
        .next()
        .ok_or_else(|| AppError::rejected("missing authorization header"))?;
    if values.next().is_some() {
        return Err(AppError::rejected("multiple authorization headers"));
    }

    let value = value
        .to_str()
        .map_err(|_| AppError::rejected("authorization header is not valid text"))?;

    let parts: Vec<&str> = value.split(' ').collect();
    match parts.as_slice() {
        [BEARER, token] if !token.is_empty() => Ok(token),
        _ => Err(AppError::rejected(
            "authorization header must be `Bearer <token>`",
        )),
    }
}

/// Middleware running [`AuthGate::authorize`] for each request.
///
/// The method name is the request path.
pub async fn authenticate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let method = request.uri().path().to_owned();
    match state.auth_gate.authorize(&method, request.headers()) {
        Ok(Some(identity)) => {
            tracing::debug!(method = %method, email = %identity.email, "Caller authenticated");
            request.extensions_mut().insert(identity);
        }
        Ok(None) => {
            tracing::debug!(method = %method, "Allow-listed method, skipping authentication");
        }
        Err(e) => {
            tracing::warn!(method = %method, detail = %e.detail, "Request rejected by authentication gate");
            return Err(e);
        }
    }
    Ok(next.run(request).await)
}
