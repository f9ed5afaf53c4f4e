//! Paddock API
//!
//! Read-only catalog API for races and sporting events over SQLite.

mod cli;
mod config;
mod routes;
mod service;
mod storage;
mod types;

use axum::{routing::get, routing::post, Router};
use clap::Parser;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, Commands};
use crate::config::AppConfig;
use crate::routes::AppState;
use crate::service::{RacingService, SportsService};
use crate::storage::{EventRepository, RaceRepository};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { host, port } => run_server(Some(host), Some(port)).await,
        Commands::Seed { races, events } => cli::run_seed(races, events),
    }
}

/// Run the API server.
async fn run_server(host: Option<String>, port: Option<u16>) -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "paddock_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let mut config = AppConfig::load()?;

    // Override with CLI args
    if let Some(h) = host {
        config.server.host = h;
    }
    if let Some(p) = port {
        config.server.port = p;
    }

    tracing::info!("Configuration loaded");
    tracing::info!("Racing database: {}", config.database.racing_path);
    tracing::info!("Sports database: {}", config.database.sports_path);

    // Open both catalogs; schema DDL runs here, before any traffic.
    let race_repo = Arc::new(RaceRepository::open(Path::new(
        &config.database.racing_path,
    ))?);
    let event_repo = Arc::new(EventRepository::open(Path::new(
        &config.database.sports_path,
    ))?);

    // Create application state
    let state = Arc::new(AppState {
        racing: RacingService::new(race_repo),
        sports: SportsService::new(event_repo),
    });

    // Build router
    let app = Router::new()
        .route("/health", get(routes::health))
        .route("/v1/list-races", post(routes::list_races))
        .route("/v1/races/{id}", get(routes::get_race))
        .route("/v1/list-events", post(routes::list_events))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state);

    // Start server
    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
