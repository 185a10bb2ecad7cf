//! Argon2id credential hashing and verification.

use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{
        PasswordHash, PasswordHasher as ArgonHasher, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};
use tracing::warn;

use authgate_core::config::AuthConfig;
use authgate_core::error::AppError;

/// Longest secret accepted for hashing, in bytes.
pub const MAX_SECRET_BYTES: usize = 72;

/// Hashes and verifies secrets with Argon2id.
///
/// Verification goes through the algorithm's own constant-time comparison.
/// Secrets are never logged or echoed in errors.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    params: Params,
}

impl PasswordHasher {
    /// Hasher with the library's default work factor.
    pub fn new() -> Self {
        Self {
            params: Params::default(),
        }
    }

    /// Hasher with an explicit memory (KiB), iteration, and lane cost.
    pub fn with_cost(memory_kib: u32, iterations: u32, parallelism: u32) -> Result<Self, AppError> {
        let params = Params::new(memory_kib, iterations, parallelism, None).map_err(|e| {
            AppError::internal(
                "Configuration error",
                format!("Invalid credential hashing parameters: {e}"),
            )
        })?;
        Ok(Self { params })
    }

    /// Hasher configured from the `auth` section.
    pub fn from_config(config: &AuthConfig) -> Result<Self, AppError> {
        Self::with_cost(
            config.hash_memory_kib,
            config.hash_iterations,
            config.hash_parallelism,
        )
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Hash `secret` with a fresh random salt.
    ///
    /// Secrets longer than [`MAX_SECRET_BYTES`] are refused.
    pub fn hash(&self, secret: &str) -> Result<String, AppError> {
        if secret.len() > MAX_SECRET_BYTES {
            return Err(AppError::internal(
                "Failed to hash secret",
                format!("secret exceeds {MAX_SECRET_BYTES} bytes"),
            ));
        }

        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2()
            .hash_password(secret.as_bytes(), &salt)
            .map_err(|e| AppError::internal("Failed to hash secret", format!("hashing failed: {e}")))?;

        Ok(hash.to_string())
    }

    /// Check `secret` against a stored hash.
    ///
    /// A malformed stored hash verifies as `false`.
    pub fn verify(&self, secret: &str, hash: &str) -> bool {
        if secret.len() > MAX_SECRET_BYTES {
            return false;
        }

        let parsed = match PasswordHash::new(hash) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!(error = %e, "Stored credential hash is malformed");
                return false;
            }
        };

        self.argon2()
            .verify_password(secret.as_bytes(), &parsed)
            .is_ok()
    }

    /// Spend the work of one verification without a stored hash.
    ///
    /// Called when the account is unknown so the response time does not
    /// reveal whether it exists.
    pub fn mimic_verify(&self, secret: &str) {
        let salt = SaltString::generate(&mut OsRng);
        let bytes = &secret.as_bytes()[..secret.len().min(MAX_SECRET_BYTES)];
        let _ = self.argon2().hash_password(bytes, &salt);
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}
