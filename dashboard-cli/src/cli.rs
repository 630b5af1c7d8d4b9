use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand};
use dashboard_core::{
    Config, Coordinates, Dashboard, FixedGeolocator, Geolocator, IpGeolocator, NoGeolocator, Query,
    provider_from_config,
};
use inquire::{Confirm, Password, PasswordDisplayMode, Text};

use crate::{render, session};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-dashboard", version, about = "Terminal weather dashboard")]
pub struct Cli {
    /// Log debug output to stderr (RUST_LOG takes precedence).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key and display preferences.
    Configure,

    /// Look up one location and print the dashboard.
    Show {
        /// City name; defaults to the configured fallback city.
        #[arg(conflicts_with_all = ["lat", "lon"])]
        city: Option<String>,

        #[command(flatten)]
        position: PositionArgs,
    },

    /// Interactive dashboard, starting from the device location.
    Dashboard {
        #[command(flatten)]
        position: PositionArgs,

        /// Skip location lookup and start with the fallback city.
        #[arg(long, conflicts_with_all = ["lat", "lon"])]
        no_locate: bool,
    },
}

#[derive(Debug, Args)]
pub struct PositionArgs {
    /// Latitude in decimal degrees.
    #[arg(long, requires = "lon", allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// Longitude in decimal degrees.
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    pub lon: Option<f64>,
}

impl PositionArgs {
    fn coordinates(&self) -> Option<Coordinates> {
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => Some(Coordinates { lat, lon }),
            _ => None,
        }
    }
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { city, position } => {
                let config = Config::load()?;
                let dashboard = build_dashboard(&config)?;

                let query = match (position.coordinates(), city) {
                    (Some(coords), _) => Query::Coordinates(coords),
                    (None, Some(city)) => Query::name(city),
                    (None, None) => Query::name(config.fallback_city()),
                };

                dashboard.search(query).await;

                let state = dashboard.snapshot();
                print!("{}", render::render(&state));

                if let Some(error) = state.error {
                    bail!("Search failed: {error}");
                }
                Ok(())
            }
            Command::Dashboard { position, no_locate } => {
                let config = Config::load()?;
                let dashboard = build_dashboard(&config)?;

                let geo: Box<dyn Geolocator> = match position.coordinates() {
                    Some(coords) => Box::new(FixedGeolocator(coords)),
                    None if no_locate => Box::new(NoGeolocator),
                    None => Box::new(IpGeolocator::default()),
                };

                session::run(&dashboard, geo.as_ref()).await
            }
        }
    }
}

fn build_dashboard(config: &Config) -> anyhow::Result<Dashboard> {
    tracing::debug!(
        base_url = config.base_url(),
        fallback_city = config.fallback_city(),
        dark_mode = config.dark_mode,
        "building dashboard"
    );

    let provider = provider_from_config(config)?;
    Ok(Dashboard::new(provider)
        .with_fallback_city(config.fallback_city())
        .with_dark_mode(config.dark_mode))
}

/// Interactive configuration; environment overrides are not written back.
fn configure() -> anyhow::Result<()> {
    let path = Config::config_file_path()?;
    let mut config = Config::load_from(&path)?;

    let mut key_prompt = Password::new("OpenWeather API key:")
        .without_confirmation()
        .with_display_mode(PasswordDisplayMode::Masked);
    if config.api_key.is_some() {
        key_prompt = key_prompt.with_help_message("Leave empty to keep the current key");
    }
    let api_key = key_prompt.prompt().context("Failed to read API key")?;
    if !api_key.trim().is_empty() {
        config.set_api_key(api_key.trim().to_string());
    }
    if config.api_key.is_none() {
        bail!("An API key is required; get one at https://openweathermap.org/api");
    }

    let default_city = Text::new("Fallback city when location is unavailable:")
        .with_default(config.fallback_city())
        .prompt()
        .context("Failed to read fallback city")?;
    config.default_city = Some(default_city.trim().to_string()).filter(|c| !c.is_empty());

    config.dark_mode = Confirm::new("Start with the dark theme?")
        .with_default(config.dark_mode)
        .prompt()
        .context("Failed to read theme preference")?;

    config.save()?;
    println!("Configuration saved to {}", path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn show_accepts_negative_coordinates() {
        let cli = Cli::try_parse_from(["weather-dashboard", "show", "--lat", "-33.87", "--lon", "151.21"])
            .expect("valid arguments");

        match cli.command {
            Command::Show { city, position } => {
                assert!(city.is_none());
                assert_eq!(position.coordinates(), Some(Coordinates { lat: -33.87, lon: 151.21 }));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn lat_requires_lon() {
        assert!(Cli::try_parse_from(["weather-dashboard", "show", "--lat", "1.0"]).is_err());
    }

    #[test]
    fn city_conflicts_with_coordinates() {
        let parsed =
            Cli::try_parse_from(["weather-dashboard", "show", "Paris", "--lat", "1", "--lon", "2"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn no_locate_flag_parses() {
        let cli = Cli::try_parse_from(["weather-dashboard", "-v", "dashboard", "--no-locate"])
            .expect("valid arguments");

        assert!(cli.verbose);
        assert!(matches!(cli.command, Command::Dashboard { no_locate: true, .. }));
    }
}
