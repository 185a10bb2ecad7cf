//! Unified application error types for Authgate.
//!
//! Every crate maps its internal failures into [`AppError`]. The kind set is
//! deliberately small: it is the outward-facing status taxonomy, so callers
//! only ever learn *that* a check failed, never *which* one.

use std::fmt;
use thiserror::Error;

/// Title returned for every credential or session failure.
pub const INCORRECT_LOGIN: &str = "Incorrect login";

/// Title returned when a request is rejected by one of the gates.
pub const UNAUTHENTICATED: &str = "Unauthenticated";

/// Outward-facing error categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// Missing/invalid/expired token, wrong password, unknown or inactive user.
    Unauthenticated,
    /// A store-level write was rejected for an authenticated caller.
    PermissionDenied,
    /// Malformed request input.
    InvalidArgument,
    /// Signing, random-source, hashing, or store I/O failure.
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unauthenticated => write!(f, "UNAUTHENTICATED"),
            Self::PermissionDenied => write!(f, "PERMISSION_DENIED"),
            Self::InvalidArgument => write!(f, "INVALID_ARGUMENT"),
            Self::Internal => write!(f, "INTERNAL"),
        }
    }
}

/// The unified application error used throughout Authgate.
///
/// `title` is safe to hand to untrusted callers. `detail` is richer and is
/// written to the log; it only reaches the caller for `InvalidArgument`.
#[derive(Debug, Error)]
#[error("{kind}: {title}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// User-safe summary.
    pub title: String,
    /// Diagnostic detail for the log.
    pub detail: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, title: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            detail: detail.into(),
            source: None,
        }
    }

    /// Attach the underlying cause.
    pub fn caused_by(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Credential or session failure for `subject`.
    ///
    /// The title is identical for every cause so that an unknown account and
    /// a bad password cannot be told apart. `reason` only reaches the log.
    pub fn unauthenticated(subject: &str, reason: &str) -> Self {
        Self::new(
            ErrorKind::Unauthenticated,
            INCORRECT_LOGIN,
            format!("Unauthenticated user {subject}: {reason}"),
        )
    }

    /// Request rejected before reaching a handler.
    pub fn rejected(detail: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unauthenticated, UNAUTHENTICATED, detail)
    }

    /// Store-level write rejected for `subject`.
    pub fn permission_denied(subject: &str) -> Self {
        Self::new(
            ErrorKind::PermissionDenied,
            "Permission denied",
            format!("Permission denied: {subject}"),
        )
    }

    /// Create an internal error.
    pub fn internal(title: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, title, detail)
    }

    /// Create an invalid-argument error.
    pub fn invalid_argument(title: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidArgument, title, detail)
    }

    /// Whether this error is of the given kind.
    pub fn is(&self, kind: ErrorKind) -> bool {
        self.kind == kind
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            title: self.title.clone(),
            detail: self.detail.clone(),
            source: None,
        }
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::internal("Configuration error", format!("Configuration error: {err}")).caused_by(err)
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::internal("I/O error", format!("I/O error: {err}")).caused_by(err)
    }
}
