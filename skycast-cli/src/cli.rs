use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{Select, Text};

use skycast_core::{
    Config, ForecastRequest, ProviderId, UnitSystem, fetch,
    provider::{self, WeatherProvider},
    units::UnitProfile,
};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skycast", version, about = "Weather CLI")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configure credentials and units for a specific provider.
    Configure {
        /// Provider short name, e.g. "forecastio".
        provider: String,
    },

    /// Show weather for a coordinate pair.
    Show {
        /// Latitude in decimal degrees.
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        /// Longitude in decimal degrees.
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,

        /// Read the raw payload from a file instead of fetching it.
        #[arg(long)]
        file: Option<PathBuf>,

        /// Print the hourly forecast instead of current conditions.
        #[arg(long, conflicts_with = "daily")]
        hourly: bool,

        /// Print the daily forecast instead of current conditions.
        #[arg(long)]
        daily: bool,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure { provider } => configure(&provider),
            Command::Show { lat, lon, file, hourly, daily } => {
                show(lat, lon, file, hourly, daily).await
            }
        }
    }
}

fn configure(provider: &str) -> anyhow::Result<()> {
    let id = ProviderId::try_from(provider)?;
    let mut config = Config::load()?;

    let api_key = Text::new("API key:").prompt().context("Failed to read API key")?;

    let selectors: Vec<&str> = UnitSystem::all().iter().map(UnitSystem::as_str).collect();
    let selector =
        Select::new("Unit system:", selectors).prompt().context("Failed to read unit system")?;

    config.upsert_provider_api_key(id, api_key);
    config.set_unit_system(UnitSystem::try_from(selector)?);
    config.save()?;

    println!("Saved configuration for provider '{id}'.");
    Ok(())
}

async fn show(
    lat: f64,
    lon: f64,
    file: Option<PathBuf>,
    hourly: bool,
    daily: bool,
) -> anyhow::Result<()> {
    let config = Config::load()?;
    let id = config.default_provider_id()?;
    let provider = provider::provider_from_config(id, &config)?;

    let request = ForecastRequest { latitude: lat, longitude: lon };
    let payload = match file {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read payload file: {}", path.display()))?,
        None => {
            let url = provider.request_url(&request)?;
            let http = reqwest::Client::new();
            fetch::fetch_payload(&http, &url).await?
        }
    };

    if hourly {
        render::print_series("Hourly forecast", &provider.hourly_forecast(&payload)?);
    } else if daily {
        render::print_series("Daily forecast", &provider.daily_forecast(&payload)?);
    } else {
        let units = UnitProfile::for_system(config.unit_system()?);
        render::print_current(&provider.current_conditions(&payload)?, &units);
    }

    Ok(())
}
