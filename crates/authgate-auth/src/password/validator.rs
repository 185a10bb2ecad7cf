//! Policy for newly chosen passwords.

use authgate_core::config::AuthConfig;
use authgate_core::error::AppError;

use super::hasher::MAX_SECRET_BYTES;

const TITLE: &str = "Invalid password";

/// Checks a new password before it is hashed and stored.
#[derive(Debug, Clone)]
pub struct PasswordValidator {
    min_length: usize,
}

impl PasswordValidator {
    /// Create a validator from the `auth` section.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            min_length: config.password_min_length,
        }
    }

    /// Validate a password, reporting the first violation as `InvalidArgument`.
    pub fn validate(&self, password: &str) -> Result<(), AppError> {
        if password.chars().count() < self.min_length {
            return Err(AppError::invalid_argument(
                TITLE,
                format!(
                    "Password must be at least {} characters long",
                    self.min_length
                ),
            ));
        }

        if password.len() > MAX_SECRET_BYTES {
            return Err(AppError::invalid_argument(
                TITLE,
                format!("Password must be at most {MAX_SECRET_BYTES} bytes long"),
            ));
        }

        let estimate = zxcvbn::zxcvbn(password, &[]);
        if estimate.score() < zxcvbn::Score::Three {
            return Err(AppError::invalid_argument(
                TITLE,
                "Password is too weak. Please use a stronger password.",
            ));
        }

        Ok(())
    }
}
