//! Structured logging setup.
//!
//! The portal logs through `tracing`. [`init_tracing`] installs a subscriber
//! with an `EnvFilter`, a console layer (pretty or JSON) and an optional
//! daily-rotated JSON file.
//!
//! # Usage
//!
//! ```no_run
//! use ceo_portal::observability;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//!     // Keep the guard alive for the life of the process
//!     let _guard = observability::init_tracing(None, None, false)?;
//!     Ok(())
//! }
//! ```
//!
//! # Environment Configuration
//!
//! ```bash
//! # Component-specific levels
//! RUST_LOG=ceo_portal=debug,sqlx=warn ceo-portal serve
//!
//! # JSON console output and a rotating file
//! LOG_JSON=true LOG_FILE=./logs/portal.log ceo-portal serve
//! ```

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Filter used when neither `RUST_LOG` nor a level is given.
pub const DEFAULT_FILTER: &str = "ceo_portal=info,warn";

/// Pick the filter directive: `RUST_LOG` wins, then the explicit level, then the default.
fn filter_directive(rust_log: Option<String>, log_level: Option<String>) -> String {
    rust_log
        .filter(|v| !v.trim().is_empty())
        .or(log_level)
        .unwrap_or_else(|| DEFAULT_FILTER.to_string())
}

/// Initialize the tracing subscriber.
///
/// # Arguments
///
/// * `log_level` - Optional filter override (e.g. `debug`); `RUST_LOG` takes precedence.
/// * `log_file` - Optional file path; enables a daily-rotated JSON log.
/// * `json_output` - JSON console output instead of pretty-printed.
///
/// Returns the file writer guard when file logging is enabled. Dropping it
/// flushes and stops the background writer.
///
/// # Errors
///
/// Returns an error if:
/// - The log directory cannot be created
/// - A global subscriber is already installed
pub fn init_tracing(
    log_level: Option<String>,
    log_file: Option<PathBuf>,
    json_output: bool,
) -> Result<Option<WorkerGuard>, Box<dyn std::error::Error + Send + Sync>> {
    let env_filter = EnvFilter::try_new(filter_directive(std::env::var("RUST_LOG").ok(), log_level))?;

    let console_layer = if json_output {
        fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .with_target(true)
            .boxed()
    } else {
        fmt::layer()
            .pretty()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .boxed()
    };

    let (file_layer, guard) = match log_file.as_deref() {
        Some(path) => {
            let dir = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or_else(|| Path::new("."));
            std::fs::create_dir_all(dir)?;

            let appender = tracing_appender::rolling::daily(
                dir,
                path.file_name().unwrap_or_else(|| OsStr::new("ceo_portal.log")),
            );
            let (writer, guard) = tracing_appender::non_blocking(appender);

            let layer = fmt::layer()
                .json()
                .with_writer(writer)
                .with_current_span(true)
                .with_target(true)
                .boxed();
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()?;

    info!(json_output, file_logging = log_file.is_some(), "Tracing initialized");

    Ok(guard)
}

/// Route logs to the test harness. Safe to call repeatedly.
#[cfg(test)]
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}
