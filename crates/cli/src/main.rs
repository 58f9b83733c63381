//! Synthseed CLI - AI-generated seed data for MySQL.
//!
//! # Usage
//!
//! ```bash
//! # Generate and insert the configured number of records
//! synthseed seed
//!
//! # Start from empty tables, 100 users and 40 contact requests
//! synthseed seed --clear-existing --users 100 --contact-requests 40
//!
//! # Run database migrations
//! synthseed migrate
//!
//! # Validate a saved batch without touching the database or API
//! synthseed check --kind users batch.json
//! ```
//!
//! # Commands
//!
//! - `seed` - Generate records with Gemini and insert the valid ones
//! - `migrate` - Run database migrations
//! - `check` - Validate generated records from a JSON or YAML file
//!
//! Set `LOG_FORMAT=json` for JSON log lines and `RUST_LOG` to override the
//! default filter.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use commands::CommandError;
use commands::check::RecordKind;
use commands::seed::SeedArgs;

const DEFAULT_LOG_FILTER: &str = "synthseed=info,synthseed_cli=info";

#[derive(Parser)]
#[command(name = "synthseed")]
#[command(author, version, about = "Seed a MySQL database with AI-generated records")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate records and insert the valid ones
    Seed(SeedArgs),
    /// Run database migrations
    Migrate,
    /// Validate generated records from a JSON or YAML file
    Check {
        /// Which record type the file holds
        #[arg(short, long, value_enum)]
        kind: RecordKind,

        /// Path to a JSON or YAML array of records
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    init_tracing();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

/// Install the tracing subscriber: text by default, JSON when
/// `LOG_FORMAT=json`.
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());

    let json = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));
    let json_layer = json.then(|| tracing_subscriber::fmt::layer().json().flatten_event(true));
    let text_layer = (!json).then(tracing_subscriber::fmt::layer);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}

async fn run(cli: Cli) -> Result<(), CommandError> {
    match cli.command {
        Commands::Seed(args) => commands::seed::run(args).await?,
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Check { kind, file } => {
            commands::check::run(kind, &file).await?;
        }
    }
    Ok(())
}
