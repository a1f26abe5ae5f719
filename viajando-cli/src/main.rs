//! Viajando command-line frontend.
//!
//! Thin shell over `TripService`: each subcommand performs one persistence
//! operation and prints the result to stdout. Logs go to stderr.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use viajando_app::{AppStateBuilder, StorageConfig};
use viajando_core::error::CoreError;
use viajando_core::services::TripService;
use viajando_core::types::{Platform, Trip, WriteOutcome};
use viajando_core::utils::format_date;

/// Track planned trips on this device.
#[derive(Parser, Debug)]
#[command(name = "viajando", version, about, long_about = None)]
struct Cli {
    /// Storage platform (native = `SQLite` file, web = in-memory)
    #[arg(long, global = true)]
    platform: Option<Platform>,

    /// Directory holding the trip database
    #[arg(long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Do not seed the in-memory store with sample trips
    #[arg(long, global = true)]
    no_seed: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List all trips
    List,

    /// Add a new trip
    Add {
        destination: String,
        /// Trip date (YYYY-MM-DD or RFC 3339)
        date: String,
        #[arg(short, long)]
        description: Option<String>,
    },

    /// Replace the fields of an existing trip
    Update {
        #[arg(allow_negative_numbers = true)]
        id: i64,
        destination: String,
        date: String,
        #[arg(short, long, default_value = "")]
        description: String,
    },

    /// Delete a trip
    Delete {
        #[arg(allow_negative_numbers = true)]
        id: i64,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if is_expected_failure(&e) {
                tracing::warn!("{e:#}");
            } else {
                tracing::error!("{e:#}");
            }
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Bad user input is logged as a warning, storage failures as errors.
fn is_expected_failure(e: &anyhow::Error) -> bool {
    e.downcast_ref::<CoreError>()
        .is_some_and(CoreError::is_expected)
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .without_time(),
        )
        .with(EnvFilter::from_default_env().add_directive(level.into()))
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli)?;
    let state = AppStateBuilder::new()
        .config(config)
        .build()
        .context("Failed to set up storage")?;

    state
        .run_startup()
        .await
        .context("Failed to initialize storage")?;
    log::debug!(
        "Using {} backend at {}",
        state.trip_service.backend_name(),
        state.config.database_path().display()
    );

    execute(&state.trip_service, cli.command).await
}

/// Environment first, then command-line overrides.
fn load_config(cli: &Cli) -> Result<StorageConfig> {
    let mut config = StorageConfig::from_env().context("Invalid environment configuration")?;
    if let Some(platform) = cli.platform {
        config.platform = Some(platform);
    }
    if let Some(dir) = &cli.data_dir {
        config.data_dir.clone_from(dir);
    }
    if cli.no_seed {
        config.seed_examples = false;
    }
    Ok(config)
}

async fn execute(service: &TripService, command: Commands) -> Result<()> {
    match command {
        Commands::List => {
            let trips = service.get_trips().await?;
            if trips.is_empty() {
                println!("No trips yet.");
            }
            for trip in &trips {
                println!("{}", render_trip(trip));
            }
        }
        Commands::Add {
            destination,
            date,
            description,
        } => {
            let trip = service
                .add_trip(&destination, &date, description.as_deref())
                .await?;
            println!("Added {}", render_trip(&trip));
        }
        Commands::Update {
            id,
            destination,
            date,
            description,
        } => {
            let outcome = service
                .update_trip(id, &destination, &date, &description)
                .await?;
            report(outcome, "Updated", id);
        }
        Commands::Delete { id } => {
            let outcome = service.delete_trip(id).await?;
            report(outcome, "Deleted", id);
        }
    }
    Ok(())
}

fn report(outcome: WriteOutcome, verb: &str, id: i64) {
    if outcome.is_applied() {
        println!("{verb} trip #{id}");
    } else {
        println!("No trip with id {id}; nothing changed");
    }
}

fn render_trip(trip: &Trip) -> String {
    let mut line = format!(
        "#{} {} ({})",
        trip.id,
        trip.destination,
        format_date(trip.date)
    );
    if !trip.description.is_empty() {
        line.push_str(" - ");
        line.push_str(&trip.description);
    }
    line
}
