//! CLI commands for paddock-api.
//!
//! Supports the API server mode and an explicit demo-data seeding step.

use clap::{Parser, Subcommand};
use std::path::Path;

use crate::config::AppConfig;
use crate::storage::seed::{seed_events, seed_races};
use crate::storage::{EventRepository, RaceRepository};

#[derive(Parser)]
#[command(name = "paddock-api")]
#[command(version, about = "Paddock: racing and sports catalog API", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the API server
    Serve {
        /// Host to bind to
        #[arg(short = 'H', long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind to
        #[arg(short, long, default_value_t = 8080)]
        port: u16,
    },

    /// Populate both catalogs with demo data (idempotent)
    Seed {
        /// Number of demo races
        #[arg(long, default_value_t = 100)]
        races: i64,

        /// Number of demo events
        #[arg(long, default_value_t = 100)]
        events: i64,
    },
}

/// Seed both catalog databases with demo data.
///
/// Runs before the server is started; `serve` itself never inserts rows.
pub fn run_seed(races: i64, events: i64) -> anyhow::Result<()> {
    let config = AppConfig::load()?;

    let race_repo = RaceRepository::open(Path::new(&config.database.racing_path))?;
    seed_races(&race_repo, races)?;
    eprintln!(
        "Seeded {} races into {}",
        races, config.database.racing_path
    );

    let event_repo = EventRepository::open(Path::new(&config.database.sports_path))?;
    seed_events(&event_repo, events)?;
    eprintln!(
        "Seeded {} events into {}",
        events, config.database.sports_path
    );

    Ok(())
}
