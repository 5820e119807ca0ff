//! WeatherDesk CLI
//!
//! Command-line front end over the weather store.

#![allow(clippy::print_stdout)]

mod cli;
mod render;

use std::sync::Arc;

use anyhow::{Context, bail};
use application::{FetchOutcome, WeatherStore};
use clap::Parser;
use infrastructure::{AppConfig, LoggingConfig, WeatherAdapter, init_logging};
use tracing::{debug, info};

use crate::cli::{Cli, Commands, log_filter_from_verbosity};

fn build_store(config: &AppConfig) -> anyhow::Result<Arc<WeatherStore>> {
    let adapter = WeatherAdapter::with_config(config.weather.clone())
        .context("Failed to create weather adapter")?;
    Ok(Arc::new(WeatherStore::new(Arc::new(adapter))))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load_from(cli.config.as_deref()).context("Failed to load configuration")?;

    let logging = log_filter_from_verbosity(cli.verbose).map_or_else(
        || config.logging.clone(),
        |filter| LoggingConfig {
            filter: filter.to_string(),
            ..config.logging.clone()
        },
    );
    init_logging(&logging)?;
    debug!(filter = %logging.filter, json = logging.json, "Logging initialized");

    match cli.command {
        Commands::Locations { json } => {
            let store = build_store(&config)?;
            if json {
                println!("{}", serde_json::to_string_pretty(store.locations())?);
            } else {
                print!("{}", render::render_locations(store.locations()));
            }
        },

        Commands::Show { location, json } => {
            let store = build_store(&config)?;
            let location = store.catalog().resolve(&location)?.clone();
            info!(location = %location, "Fetching weather");

            let outcome = store.select_location(location).wait().await;
            let snapshot = store.snapshot();

            if json {
                println!("{}", serde_json::to_string_pretty(&snapshot)?);
            } else {
                print!("{}", render::render_snapshot(&snapshot));
            }

            if let FetchOutcome::Failed(message) = outcome {
                bail!(message);
            }
        },

        Commands::Health => {
            let store = build_store(&config)?;
            if store.is_service_available().await {
                println!("Weather service at {} is reachable", config.weather.base_url);
            } else {
                bail!("Weather service at {} is not reachable", config.weather.base_url);
            }
        },

        Commands::Config => {
            print!("{}", config.to_toml()?);
        },
    }

    Ok(())
}
