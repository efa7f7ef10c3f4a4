//! CLI entry point for the event portal.
//!
//! `main` only initializes the runtime and logging, then hands over to
//! [`ceo_portal::cli::run`].
//!
//! Logging is controlled through the environment:
//! - `RUST_LOG`: Filter directives (default `ceo_portal=info,warn`)
//! - `LOG_JSON`: JSON console output (`true` or `false`)
//! - `LOG_FILE`: Also write JSON logs to this file, rotated daily

use ceo_portal::{cli, observability};
use tracing::error;

#[tokio::main]
async fn main() {
    let log_file = std::env::var("LOG_FILE").ok().map(std::path::PathBuf::from);
    let json_output = std::env::var("LOG_JSON")
        .ok()
        .and_then(|v| v.parse::<bool>().ok())
        .unwrap_or(false);

    // Held until exit so the file writer flushes.
    let _log_guard = match observability::init_tracing(None, log_file, json_output) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize tracing: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = cli::run().await {
        error!(error = %e, "Application error");
        eprintln!("Error: {e:?}");
        std::process::exit(1);
    }
}
