//! Access token verification.

use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use authgate_core::config::AuthConfig;
use authgate_core::error::AppError;

use super::claims::{AUDIENCE, Claims, ISSUER};

/// Verifies access tokens.
///
/// Only HS256 is accepted, so a token whose header names any other
/// algorithm is rejected before its signature is looked at.
#[derive(Clone)]
pub struct JwtDecoder {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish_non_exhaustive()
    }
}

impl JwtDecoder {
    /// Create a decoder from the `auth` section.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.set_issuer(&[ISSUER]);
        validation.set_audience(&[AUDIENCE]);
        validation.set_required_spec_claims(&["exp", "iss", "aud", "sub"]);

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Verify `token` and return its claims.
    ///
    /// Every failure is `Unauthenticated`; the reason only goes to the detail.
    pub fn verify_access_token(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                let reason = match e.kind() {
                    JwtErrorKind::ExpiredSignature => "token has expired".to_string(),
                    JwtErrorKind::InvalidSignature => "invalid token signature".to_string(),
                    JwtErrorKind::InvalidAlgorithm => "unexpected signing algorithm".to_string(),
                    JwtErrorKind::InvalidIssuer => "unexpected issuer".to_string(),
                    JwtErrorKind::InvalidAudience => "unexpected audience".to_string(),
                    JwtErrorKind::MissingRequiredClaim(claim) => {
                        format!("missing required claim {claim}")
                    }
                    JwtErrorKind::Json(_) => "malformed claims".to_string(),
                    _ => format!("token validation failed: {e}"),
                };
                AppError::rejected(reason)
            })
    }
}
