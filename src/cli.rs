//! Command-line interface for the event portal.
//!
//! # Commands
//!
//! - `serve`: Run the HTTP API
//! - `generate`: Print a business document from the command line
//!
//! # Example
//!
//! ```bash
//! # Run against the SQLite store on port 3000
//! ceo-portal serve --port 3000
//!
//! # Try the API without touching disk
//! ceo-portal serve --ephemeral
//!
//! # Print a fallback pitch outline
//! ceo-portal generate --type pitch_outline \
//!     --input concept="a scheduling app for small businesses" \
//!     --input needs="seed funding"
//! ```

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use colored::Colorize;
use eyre::{eyre, Result, WrapErr};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::info;

use crate::ai::{generate_with_fallback, AnthropicClient, ContentModel, ContentSource};
use crate::api::run_server;
use crate::app_state::AppState;
use crate::config::Config;
use crate::content::{self, ContentKind, Document, GenerationRequest, Inputs};
use crate::db::{create_pool, MemorySheets, SheetRepository, SheetStore};

/// College entrepreneurship summit portal
#[derive(Parser, Debug)]
#[command(name = "ceo-portal")]
#[command(about = "Registration, participation intake and content generation for the summit", long_about = None)]
#[command(version)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API
    Serve {
        /// Listen port (overrides PORT)
        #[arg(short, long)]
        port: Option<u16>,

        /// Keep all data in memory instead of the SQLite store
        #[arg(long)]
        ephemeral: bool,
    },

    /// Print a generated document
    Generate {
        /// Content type: business_description, pitch_outline,
        /// executive_summary, presentation_slides (anything else is generic)
        #[arg(short = 't', long = "type")]
        kind: String,

        /// Input as key=value, repeatable
        #[arg(short, long = "input", value_parser = parse_input)]
        inputs: Vec<(String, String)>,

        /// Preparation date for dated documents (YYYY-MM-DD, default today)
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Ask the configured AI model first
        #[arg(long)]
        ai: bool,
    },
}

/// Parse a `key=value` argument.
fn parse_input(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got `{raw}`"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty key in `{raw}`"));
    }
    Ok((key.to_string(), value.to_string()))
}

/// Parse CLI arguments and execute the appropriate command.
///
/// # Errors
///
/// Returns an error if configuration, storage setup or the server fails.
pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { port, ephemeral } => run_serve_command(port, ephemeral).await,
        Commands::Generate {
            kind,
            inputs,
            date,
            ai,
        } => run_generate_command(&kind, inputs, date, ai).await,
    }
}

/// Execute the serve command.
async fn run_serve_command(port: Option<u16>, ephemeral: bool) -> Result<()> {
    let mut config = Config::from_env().wrap_err("Failed to load configuration")?;
    if let Some(port) = port {
        config = config.with_port(port);
    }
    info!(?config, "Configuration loaded");

    let store: Arc<dyn SheetStore> = if ephemeral {
        println!("{}", "Running with in-memory storage; data is lost on exit".yellow().bold());
        Arc::new(MemorySheets::new())
    } else {
        let pool = create_pool(config.database_url())
            .await
            .wrap_err_with(|| format!("Failed to open database {}", config.database_url()))?;
        Arc::new(SheetRepository::new(pool))
    };

    let state = AppState::from_config(&config, store).wrap_err("Failed to initialize services")?;

    println!(
        "{} http://localhost:{}  (docs at /swagger-ui)",
        "Portal listening on".green().bold(),
        config.port()
    );

    run_server(state, config.port(), config.rate_limit_rpm(), config.sweep_interval())
        .await
        .map_err(|e| eyre!("Server error: {e}"))
}

/// Execute the generate command.
async fn run_generate_command(
    tag: &str,
    inputs: Vec<(String, String)>,
    date: Option<NaiveDate>,
    ai: bool,
) -> Result<()> {
    let kind = ContentKind::parse(tag);
    let inputs: Inputs = Inputs::new(inputs.into_iter().collect::<BTreeMap<_, _>>());

    if ai {
        let config = Config::from_env().wrap_err("Failed to load configuration")?;
        let model = match config.anthropic_api_key() {
            Some(key) => Some(
                AnthropicClient::new(key.to_string(), config.ai_model().to_string(), config.ai_timeout())
                    .wrap_err("Failed to create AI client")?,
            ),
            None => {
                println!("{}", "ANTHROPIC_API_KEY not set, using templates".yellow());
                None
            }
        };

        let request = GenerationRequest::new(kind, inputs);
        let generated =
            generate_with_fallback(model.as_ref().map(|m| m as &dyn ContentModel), &request).await;
        let label = match generated.source {
            ContentSource::Ai => "Generated by AI".green(),
            ContentSource::Fallback => "Generated from templates".yellow(),
        };
        println!("{}\n", label.bold());
        println!("{}", generated.content);
        return Ok(());
    }

    let today = date.unwrap_or_else(|| chrono::Local::now().date_naive());
    print_document(&content::document(&kind, &inputs, today));
    Ok(())
}

/// Print a document with colored headers.
fn print_document(document: &Document) {
    println!("{}", document.title.bold());
    if let Some(subtitle) = &document.subtitle {
        println!("{}", subtitle.dimmed());
    }
    for section in &document.sections {
        println!();
        println!("{}", section.header.cyan().bold());
        println!("{}", section.body);
    }
}
