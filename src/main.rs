//! Authgate server: credential and session-token service.
//!
//! Loads configuration, initializes logging, and serves until shutdown.

use tracing_subscriber::{EnvFilter, fmt};

use authgate_core::config::AppConfig;
use authgate_core::error::AppError;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}: {}", e.title, e.detail);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = authgate_api::run_server(config).await {
        tracing::error!(kind = %e.kind, detail = %e.detail, "{}", e.title);
        std::process::exit(1);
    }
}

/// Load configuration from file overlays and the environment.
fn load_configuration() -> Result<AppConfig, AppError> {
    let config_path =
        std::env::var("AUTHGATE_CONFIG").unwrap_or_else(|_| "config/default.toml".to_string());
    let env = std::env::var("AUTHGATE_ENV").unwrap_or_else(|_| "development".to_string());

    AppConfig::load(&config_path, &env)
}

/// Initialize tracing. `RUST_LOG` overrides the configured level.
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_current_span(false)
                .init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}
