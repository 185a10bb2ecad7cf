//! CLI command definitions and dispatch.

pub mod migrate;
pub mod password;
pub mod serve;
pub mod user;

use clap::{Parser, Subcommand};

use authgate_core::config::AppConfig;
use authgate_core::error::AppError;
use authgate_database::DatabasePool;

use crate::output::OutputFormat;

/// Authgate: credential and session-token service
#[derive(Debug, Parser)]
#[command(name = "authgate", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Configuration overlay name, read from `config/{env}.toml`
    #[arg(short, long, env = "AUTHGATE_ENV", default_value = "development")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the server
    Serve(serve::ServeArgs),
    /// Database migrations
    Migrate(migrate::MigrateArgs),
    /// Print the credential hash of a password, for seeding users
    HashPassword(password::HashPasswordArgs),
    /// Set a user's password
    SetPassword(password::SetPasswordArgs),
    /// User directory
    User(user::UserArgs),
}

impl Cli {
    /// Execute the selected command.
    pub async fn execute(&self) -> Result<(), AppError> {
        match &self.command {
            Commands::Serve(args) => serve::execute(args, self).await,
            Commands::Migrate(args) => migrate::execute(args, self).await,
            Commands::HashPassword(args) => password::hash(args, self),
            Commands::SetPassword(args) => password::set(args, self).await,
            Commands::User(args) => user::execute(args, self).await,
        }
    }

    /// Load and validate the full configuration.
    pub fn load_config(&self) -> Result<AppConfig, AppError> {
        AppConfig::load(&self.config, &self.env)
    }

    /// Read configuration, requiring only a database URL.
    pub fn load_database_config(&self) -> Result<AppConfig, AppError> {
        let config = AppConfig::read(&self.config, &self.env)?;
        if config.database.url.trim().is_empty() {
            return Err(AppError::internal(
                "Configuration error",
                "missing configuration value: database.url",
            ));
        }
        Ok(config)
    }
}

/// Open a pool for a one-off command.
pub async fn connect(config: &AppConfig) -> Result<DatabasePool, AppError> {
    DatabasePool::connect(&config.database).await
}
