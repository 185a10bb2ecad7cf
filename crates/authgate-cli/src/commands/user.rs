//! User directory commands.

use clap::{Args, Subcommand};

use authgate_api::dto::response::UserInfoResponse;
use authgate_core::error::AppError;
use authgate_core::traits::UserStore;
use authgate_database::PgUserStore;

use super::Cli;
use crate::output;

/// Arguments for the user command
#[derive(Debug, Args)]
pub struct UserArgs {
    /// User subcommand
    #[command(subcommand)]
    pub command: UserCommand,
}

/// User subcommands
#[derive(Debug, Subcommand)]
pub enum UserCommand {
    /// List all users
    List,
}

/// Execute user commands
pub async fn execute(args: &UserArgs, cli: &Cli) -> Result<(), AppError> {
    let config = cli.load_database_config()?;
    let db = super::connect(&config).await?;
    let users = PgUserStore::new(db.pool().clone());

    match &args.command {
        UserCommand::List => {
            let list: Vec<UserInfoResponse> = users
                .load_users()
                .await?
                .into_iter()
                .map(UserInfoResponse::from)
                .collect();

            output::print_list(&list, cli.format, |u| {
                format!(
                    "{}  {:<24} {:<32} {:<6}{}",
                    u.id,
                    u.name,
                    u.email,
                    u.role,
                    if u.deleted { "  (deleted)" } else { "" }
                )
            });
        }
    }

    db.close().await;
    Ok(())
}
