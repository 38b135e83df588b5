use clap::{Parser, Subcommand};
use skycast_core::{Config, Coordinates, GeonamesClient, Orchestrator, SourceId};

use crate::{render, session};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skycast", version, about = "Day and night aware weather lookups")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the GeoNames account name and geolocation defaults.
    Configure,

    /// Start the interactive session.
    Run {
        /// Jump straight to one input path on start: device, manual, or
        /// search.
        #[arg(long)]
        source: Option<String>,
    },

    /// One-shot lookup for an explicit coordinate pair.
    Show {
        /// Latitude in decimal degrees.
        #[arg(allow_negative_numbers = true)]
        latitude: f64,

        /// Longitude in decimal degrees.
        #[arg(allow_negative_numbers = true)]
        longitude: f64,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Run { source } => {
                let source = source.as_deref().map(SourceId::try_from).transpose()?;
                let config = Config::load()?;
                session::run(config, source).await
            }
            Command::Show { latitude, longitude } => {
                show(Coordinates { latitude, longitude }).await
            }
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let current = config.username.clone().unwrap_or_default();
    let username = inquire::Text::new("GeoNames account name:")
        .with_initial_value(&current)
        .prompt()?;

    let username = username.trim();
    if username.is_empty() {
        anyhow::bail!("Account name cannot be empty.");
    }
    config.username = Some(username.to_string());

    let keep_position = inquire::Confirm::new("Store a fixed position for device lookups?")
        .with_default(config.geolocation.position.is_some())
        .prompt()?;

    config.geolocation.position = if keep_position {
        let latitude = inquire::CustomType::<f64>::new("Latitude:")
            .with_error_message("Enter a decimal number, e.g. 45.28")
            .prompt()?;
        let longitude = inquire::CustomType::<f64>::new("Longitude:")
            .with_error_message("Enter a decimal number, e.g. -65.99")
            .prompt()?;
        Some(Coordinates { latitude, longitude })
    } else {
        None
    };

    config.save()?;
    println!("Saved {}", Config::config_file_path()?.display());
    Ok(())
}

async fn show(coordinates: Coordinates) -> anyhow::Result<()> {
    let config = Config::load()?;
    let client = GeonamesClient::new(&config)?;
    let mut orchestrator = Orchestrator::new(client);

    let payload = orchestrator.submit_coordinates(coordinates).await?;
    render::result_panel(payload);
    Ok(())
}
