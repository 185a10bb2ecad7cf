//! Plain and JSON output for CLI commands.

use serde::Serialize;

use authgate_core::error::AppError;

/// Output format selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// One line per item.
    #[default]
    Plain,
    /// Pretty-printed JSON.
    Json,
}

/// Print items one per line, or as a JSON array.
pub fn print_list<T, F>(items: &[T], format: OutputFormat, line: F)
where
    T: Serialize,
    F: Fn(&T) -> String,
{
    match format {
        OutputFormat::Plain => {
            if items.is_empty() {
                println!("No results found.");
            }
            for item in items {
                println!("{}", line(item));
            }
        }
        OutputFormat::Json => match serde_json::to_string_pretty(items) {
            Ok(json) => println!("{json}"),
            Err(e) => eprintln!("Failed to serialize output: {e}"),
        },
    }
}

/// Print a success message.
pub fn print_success(message: &str) {
    println!("✓ {message}");
}

/// Print an error with its detail.
pub fn print_error(err: &AppError) {
    eprintln!("✗ {}: {}", err.title, err.detail);
}
