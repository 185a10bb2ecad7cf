//! Password commands for operators.

use clap::Args;
use dialoguer::Password;

use authgate_auth::{PasswordHasher, PasswordValidator};
use authgate_core::error::AppError;
use authgate_core::traits::UserStore;
use authgate_database::PgUserStore;

use super::Cli;
use crate::output;

/// Arguments for hash-password
#[derive(Debug, Args)]
pub struct HashPasswordArgs {
    /// Skip the strength policy
    #[arg(long)]
    pub no_policy: bool,
}

/// Arguments for set-password
#[derive(Debug, Args)]
pub struct SetPasswordArgs {
    /// Email of the account
    pub email: String,
}

fn prompt_password() -> Result<String, AppError> {
    Password::new()
        .with_prompt("New password")
        .with_confirmation("Confirm password", "Passwords do not match")
        .interact()
        .map_err(|e| AppError::internal("Input error", format!("Failed to read password: {e}")))
}

/// Print the credential hash of a prompted password.
pub fn hash(args: &HashPasswordArgs, cli: &Cli) -> Result<(), AppError> {
    let config = authgate_core::config::AppConfig::read(&cli.config, &cli.env)?;
    let password = prompt_password()?;

    if !args.no_policy {
        PasswordValidator::new(&config.auth).validate(&password)?;
    }

    let hash = PasswordHasher::from_config(&config.auth)?.hash(&password)?;
    println!("{hash}");
    Ok(())
}

/// Hash a prompted password and store it for `email`.
pub async fn set(args: &SetPasswordArgs, cli: &Cli) -> Result<(), AppError> {
    let config = cli.load_database_config()?;
    let password = prompt_password()?;

    PasswordValidator::new(&config.auth).validate(&password)?;
    let hash = PasswordHasher::from_config(&config.auth)?.hash(&password)?;

    let db = super::connect(&config).await?;
    let users = PgUserStore::new(db.pool().clone());
    let updated = users.update_password(&args.email, &hash).await;
    db.close().await;

    if !updated? {
        return Err(AppError::invalid_argument(
            "Unknown user",
            format!("no active user with email {}", args.email),
        ));
    }

    output::print_success(&format!("Password updated for {}", args.email));
    Ok(())
}
