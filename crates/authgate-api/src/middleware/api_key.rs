//! Static-key gate: one pre-shared key for the whole deployment.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::{HeaderMap, HeaderName};
use axum::middleware::Next;
use axum::response::Response;
use subtle::ConstantTimeEq;

use authgate_core::error::AppError;

/// Compares one request header against a fixed key in constant time.
pub struct ApiKeyGate {
    header: HeaderName,
    key: Vec<u8>,
}

impl std::fmt::Debug for ApiKeyGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiKeyGate")
            .field("header", &self.header)
            .finish_non_exhaustive()
    }
}

impl ApiKeyGate {
    /// Create a gate reading `header` and expecting `key`.
    pub fn new(header: &str, key: &str) -> Result<Self, AppError> {
        let header = HeaderName::from_bytes(header.as_bytes()).map_err(|e| {
            AppError::internal(
                "Configuration error",
                format!("invalid api key header name: {e}"),
            )
        })?;
        if key.is_empty() {
            return Err(AppError::internal(
                "Configuration error",
                "api key must not be empty",
            ));
        }
        Ok(Self {
            header,
            key: key.as_bytes().to_vec(),
        })
    }

    /// Accept the request only if the header carries the key.
    pub fn check(&self, headers: &HeaderMap) -> Result<(), AppError> {
        let provided = headers
            .get(&self.header)
            .ok_or_else(|| AppError::rejected("missing api key"))?;

        if bool::from(provided.as_bytes().ct_eq(&self.key)) {
            Ok(())
        } else {
            Err(AppError::rejected("api key mismatch"))
        }
    }
}

/// Middleware running [`ApiKeyGate::check`] before anything else.
pub async fn require_api_key(
    State(gate): State<Arc<ApiKeyGate>>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if let Err(e) = gate.check(request.headers()) {
        tracing::warn!(path = %request.uri().path(), detail = %e.detail, "Request rejected by api key gate");
        return Err(e);
    }
    Ok(next.run(request).await)
}
