//! Start the server.

use clap::Args;

use authgate_core::error::AppError;
use authgate_database::migration::run_migrations;

use super::Cli;

/// Arguments for the serve command
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Override the server port
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Override the server host
    #[arg(long)]
    pub host: Option<String>,

    /// Apply pending migrations before serving
    #[arg(long)]
    pub migrate: bool,
}

/// Execute the serve command
pub async fn execute(args: &ServeArgs, cli: &Cli) -> Result<(), AppError> {
    let mut config = cli.load_config()?;

    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(host) = &args.host {
        config.server.host = host.clone();
    }

    if args.migrate {
        let db = super::connect(&config).await?;
        run_migrations(db.pool()).await?;
        db.close().await;
    }

    println!("Starting Authgate on {}", config.server.bind_address());
    authgate_api::run_server(config).await
}
