//! Translates [`AppError`] into the outward-facing call status.
//!
//! This is the only place an error leaves the process. The detail and the
//! whole source chain are logged at error level first; the caller receives
//! the status code and the user-safe title.

use axum::Json;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, ErrorKind};

/// Header carrying the equivalent RPC status code.
pub const RPC_STATUS_HEADER: &str = "grpc-status";

/// Error body returned to callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusBody {
    /// Machine-readable status code.
    pub code: String,
    /// User-safe title.
    pub title: String,
    /// Detail, only present for invalid arguments.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ErrorKind {
    /// HTTP status for this kind.
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::Unauthenticated => StatusCode::UNAUTHORIZED,
            Self::PermissionDenied => StatusCode::FORBIDDEN,
            Self::InvalidArgument => StatusCode::BAD_REQUEST,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Numeric RPC status code for this kind.
    pub fn rpc_code(&self) -> u8 {
        match self {
            Self::InvalidArgument => 3,
            Self::PermissionDenied => 7,
            Self::Internal => 13,
            Self::Unauthenticated => 16,
        }
    }
}

/// Renders the full `source()` chain of an error as one line.
pub fn cause_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut parts = Vec::new();
    let mut current = err.source();
    while let Some(cause) = current {
        parts.push(cause.to_string());
        current = cause.source();
    }
    parts.join(": ")
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let cause = cause_chain(&self);
        if cause.is_empty() {
            tracing::error!(kind = %self.kind, detail = %self.detail, "{}", self.title);
        } else {
            tracing::error!(
                kind = %self.kind,
                detail = %self.detail,
                cause = %cause,
                "{}",
                self.title
            );
        }

        let detail = match self.kind {
            ErrorKind::InvalidArgument => Some(self.detail),
            _ => None,
        };

        let body = StatusBody {
            code: self.kind.to_string(),
            title: self.title,
            detail,
        };

        let mut response = (self.kind.http_status(), Json(body)).into_response();
        response.headers_mut().insert(
            RPC_STATUS_HEADER,
            HeaderValue::from(self.kind.rpc_code() as u16),
        );
        response
    }
}
