//! Authentication configuration.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Method that may be called without a bearer token.
pub const SIGN_IN_METHOD: &str = "/auth.AuthService/SignIn";

/// Longest accepted access token lifetime: one year.
pub const MAX_ACCESS_TTL_HOURS: u64 = 24 * 365;

/// Longest accepted refresh token lifetime: one year.
pub const MAX_REFRESH_TTL_DAYS: u64 = 365;

/// Token, gate, and credential-hashing configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HMAC-SHA256 signing key for access tokens.
    #[serde(default)]
    pub jwt_secret: String,
    /// File holding the signing key, read when `jwt_secret` is empty.
    #[serde(default)]
    pub jwt_secret_file: Option<String>,
    /// Access token lifetime in hours.
    #[serde(default = "default_access_ttl")]
    pub access_ttl_hours: u64,
    /// Refresh token lifetime in days.
    #[serde(default = "default_refresh_ttl")]
    pub refresh_ttl_days: u64,
    /// Method names exempt from bearer-token verification.
    #[serde(default = "default_allowed_methods")]
    pub allowed_methods: Vec<String>,
    /// Pre-shared deployment key; the static-key gate is off when unset.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Header the pre-shared key is read from.
    #[serde(default = "default_api_key_header")]
    pub api_key_header: String,
    /// Minimum length of a newly set password.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
    /// Argon2 memory cost in KiB.
    #[serde(default = "default_hash_memory")]
    pub hash_memory_kib: u32,
    /// Argon2 iteration count.
    #[serde(default = "default_hash_iterations")]
    pub hash_iterations: u32,
    /// Argon2 lane count.
    #[serde(default = "default_hash_parallelism")]
    pub hash_parallelism: u32,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            jwt_secret_file: None,
            access_ttl_hours: default_access_ttl(),
            refresh_ttl_days: default_refresh_ttl(),
            allowed_methods: default_allowed_methods(),
            api_key: None,
            api_key_header: default_api_key_header(),
            password_min_length: default_password_min(),
            hash_memory_kib: default_hash_memory(),
            hash_iterations: default_hash_iterations(),
            hash_parallelism: default_hash_parallelism(),
        }
    }
}

impl AuthConfig {
    /// Reject settings the token issuer and gates cannot run with.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.jwt_secret.trim().is_empty() {
            return Err(invalid("missing configuration value: auth.jwt_secret".into()));
        }
        if matches!(&self.api_key, Some(key) if key.is_empty()) {
            return Err(invalid("auth.api_key is set but empty".into()));
        }
        if !(1..=MAX_ACCESS_TTL_HOURS).contains(&self.access_ttl_hours) {
            return Err(invalid(format!(
                "auth.access_ttl_hours must be between 1 and {MAX_ACCESS_TTL_HOURS}"
            )));
        }
        if !(1..=MAX_REFRESH_TTL_DAYS).contains(&self.refresh_ttl_days) {
            return Err(invalid(format!(
                "auth.refresh_ttl_days must be between 1 and {MAX_REFRESH_TTL_DAYS}"
            )));
        }
        Ok(())
    }
}

fn invalid(detail: String) -> AppError {
    AppError::internal("Configuration error", detail)
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("access_ttl_hours", &self.access_ttl_hours)
            .field("refresh_ttl_days", &self.refresh_ttl_days)
            .field("allowed_methods", &self.allowed_methods)
            .field("api_key_enabled", &self.api_key.is_some())
            .field("api_key_header", &self.api_key_header)
            .field("password_min_length", &self.password_min_length)
            .field("hash_memory_kib", &self.hash_memory_kib)
            .field("hash_iterations", &self.hash_iterations)
            .field("hash_parallelism", &self.hash_parallelism)
            .finish_non_exhaustive()
    }
}

fn default_access_ttl() -> u64 {
    24
}

fn default_refresh_ttl() -> u64 {
    7
}

fn default_allowed_methods() -> Vec<String> {
    vec![SIGN_IN_METHOD.to_string()]
}

fn default_api_key_header() -> String {
    "x-api-key".to_string()
}

fn default_password_min() -> usize {
    8
}

fn default_hash_memory() -> u32 {
    19_456
}

fn default_hash_iterations() -> u32 {
    2
}

fn default_hash_parallelism() -> u32 {
    1
}
