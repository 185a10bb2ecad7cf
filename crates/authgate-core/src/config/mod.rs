//! Application configuration schemas.
//!
//! Loaded once at startup from TOML files and `AUTHGATE__*` environment
//! variables, then shared immutably. There is no hot reload.

pub mod app;
pub mod auth;
pub mod database;
pub mod logging;

use serde::{Deserialize, Serialize};

pub use self::app::ServerConfig;
pub use self::auth::{AuthConfig, MAX_ACCESS_TTL_HOURS, MAX_REFRESH_TTL_DAYS, SIGN_IN_METHOD};
pub use self::database::DatabaseConfig;
pub use self::logging::LoggingConfig;

use crate::error::AppError;

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Listener settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database connection settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Token, gate, and hashing settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load and validate configuration.
    pub fn load(config_path: &str, env: &str) -> Result<Self, AppError> {
        let config = Self::read(config_path, env)?;
        config.validate()?;
        Ok(config)
    }

    /// Read configuration without validating it.
    ///
    /// Merges `config_path`, the `config/{env}` overlay, and environment
    /// variables prefixed with `AUTHGATE__`, then resolves `*_file` secrets.
    pub fn read(config_path: &str, env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("AUTHGATE")
                    .prefix_separator("__")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("auth.allowed_methods")
                    .try_parsing(true),
            )
            .build()?;

        let mut config: Self = config.try_deserialize()?;
        config.resolve_secret_files()?;
        Ok(config)
    }

    /// Fill empty secrets from their `*_file` counterparts.
    pub fn resolve_secret_files(&mut self) -> Result<(), AppError> {
        if self.auth.jwt_secret.trim().is_empty() {
            if let Some(path) = &self.auth.jwt_secret_file {
                self.auth.jwt_secret = read_secret_file(path)?;
            }
        }
        if self.database.url.trim().is_empty() {
            if let Some(path) = &self.database.url_file {
                self.database.url = read_secret_file(path)?;
            }
        }
        Ok(())
    }

    /// Reject configurations the server cannot start with.
    pub fn validate(&self) -> Result<(), AppError> {
        self.auth.validate()?;
        if self.database.url.trim().is_empty() {
            return Err(missing("database.url"));
        }
        Ok(())
    }
}

fn read_secret_file(path: &str) -> Result<String, AppError> {
    let value = std::fs::read_to_string(path).map_err(|e| {
        AppError::internal(
            "Configuration error",
            format!("failed to read secret file {path}"),
        )
        .caused_by(e)
    })?;
    Ok(value.trim_end_matches(['\r', '\n']).to_string())
}

fn missing(key: &str) -> AppError {
    AppError::internal(
        "Configuration error",
        format!("missing configuration value: {key}"),
    )
}
