//! Common types and utilities shared across CLI commands.
//!
//! Every `resolve_*` function applies the same precedence: command-line
//! arguments first, then the config file, then built-in defaults.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::ValueEnum;
use tracing::info;

use skyradar::alert::{write_default_beep, AlertSink, CommandAlert, SilentAlert, TerminalBell};
use skyradar::config::{config_directory, AlertMode, ConfigFile};
use skyradar::geo::GeoPoint;
use skyradar::simulator::SimulatorConfig;
use skyradar::source::{OpenSkyCredentials, SourceConfig};
use skyradar::tracking::TrackerSettings;

use crate::error::CliError;

/// Data source selection for CLI arguments.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum SourceType {
    /// OpenSky Network (free, optional account for better rate limits)
    Opensky,
    /// ADS-B Exchange via RapidAPI (requires API key)
    Adsbexchange,
    /// AirLabs flight tracker (requires API key)
    Airlabs,
    /// AviationStack (requires access key)
    Aviationstack,
    /// FlightRadar24 live feed (requires API key)
    Flightradar24,
    /// FlightAware FlightXML3 (requires username and API key)
    Flightaware,
    /// Simulated traffic, no network access
    Mock,
}

impl SourceType {
    /// Convert to a SourceConfig, requiring a key for the keyed sources.
    pub fn to_config(
        self,
        credentials: SourceCredentials,
        simulator: SimulatorConfig,
    ) -> Result<SourceConfig, CliError> {
        let require_key = |key: Option<String>, name: &str, config_key: &str| {
            key.ok_or_else(|| {
                CliError::Config(format!(
                    "{} requires an API key. Set {} in config.ini or use --api-key",
                    name, config_key
                ))
            })
        };

        match self {
            SourceType::Opensky => {
                let credentials = match (credentials.username, credentials.password) {
                    (Some(username), Some(password)) => Some(OpenSkyCredentials { username, password }),
                    (None, None) => None,
                    _ => {
                        return Err(CliError::Config(
                            "OpenSky needs both a username and a password".to_string(),
                        ))
                    }
                };
                Ok(SourceConfig::opensky(credentials))
            }
            SourceType::Adsbexchange => Ok(SourceConfig::adsbexchange(require_key(
                credentials.api_key,
                "ADS-B Exchange",
                "adsbexchange_api_key",
            )?)),
            SourceType::Airlabs => Ok(SourceConfig::airlabs(require_key(
                credentials.api_key,
                "AirLabs",
                "airlabs_api_key",
            )?)),
            SourceType::Aviationstack => Ok(SourceConfig::aviationstack(require_key(
                credentials.api_key,
                "AviationStack",
                "aviationstack_api_key",
            )?)),
            SourceType::Flightradar24 => Ok(SourceConfig::flightradar24(require_key(
                credentials.api_key,
                "FlightRadar24",
                "flightradar24_api_key",
            )?)),
            SourceType::Flightaware => {
                let username = credentials.username.ok_or_else(|| {
                    CliError::Config(
                        "FlightAware requires a username. Set flightaware_username in config.ini or use --username"
                            .to_string(),
                    )
                })?;
                let api_key = require_key(credentials.api_key, "FlightAware", "flightaware_api_key")?;
                Ok(SourceConfig::flightaware(username, api_key))
            }
            SourceType::Mock => Ok(SourceConfig::Simulated(simulator)),
        }
    }

    /// Parse from config file string.
    pub fn from_config_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "opensky" => Some(SourceType::Opensky),
            "adsbexchange" => Some(SourceType::Adsbexchange),
            "airlabs" => Some(SourceType::Airlabs),
            "aviationstack" => Some(SourceType::Aviationstack),
            "flightradar24" => Some(SourceType::Flightradar24),
            "flightaware" => Some(SourceType::Flightaware),
            "mock" => Some(SourceType::Mock),
            _ => None,
        }
    }

    /// API key stored in the config file for this source.
    fn config_api_key(self, config: &ConfigFile) -> Option<String> {
        match self {
            SourceType::Adsbexchange => config.source.adsbexchange_api_key.clone(),
            SourceType::Airlabs => config.source.airlabs_api_key.clone(),
            SourceType::Aviationstack => config.source.aviationstack_api_key.clone(),
            SourceType::Flightradar24 => config.source.flightradar24_api_key.clone(),
            SourceType::Flightaware => config.source.flightaware_api_key.clone(),
            SourceType::Opensky | SourceType::Mock => None,
        }
    }

    /// Account name stored in the config file for this source.
    fn config_username(self, config: &ConfigFile) -> Option<String> {
        match self {
            SourceType::Opensky => config.source.opensky_username.clone(),
            SourceType::Flightaware => config.source.flightaware_username.clone(),
            _ => None,
        }
    }
}

/// Alert mode selection for CLI arguments.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum AlertType {
    /// Terminal bell
    Bell,
    /// Play a WAV file with an external player
    Command,
    /// No alert
    Off,
}

impl From<AlertType> for AlertMode {
    fn from(alert: AlertType) -> Self {
        match alert {
            AlertType::Bell => AlertMode::Bell,
            AlertType::Command => AlertMode::Command,
            AlertType::Off => AlertMode::Off,
        }
    }
}

/// Credentials gathered from CLI arguments.
#[derive(Debug, Clone, Default)]
pub struct SourceCredentials {
    pub username: Option<String>,
    pub password: Option<String>,
    pub api_key: Option<String>,
}

/// Source-related CLI arguments shared by `track` and `lookup`.
#[derive(Debug, Clone, Default)]
pub struct SourceArgs {
    pub source: Option<SourceType>,
    pub credentials: SourceCredentials,
    pub timeout: Option<u64>,
}

/// Resolve the data source from CLI args and config.
pub fn resolve_source(
    args: &SourceArgs,
    simulator: SimulatorConfig,
    config: &ConfigFile,
) -> Result<SourceConfig, CliError> {
    let source = match args.source {
        Some(source) => source,
        None => SourceType::from_config_str(&config.tracking.source).ok_or_else(|| {
            CliError::Config(format!("Unknown source '{}'", config.tracking.source))
        })?,
    };

    let credentials = SourceCredentials {
        username: args
            .credentials
            .username
            .clone()
            .or_else(|| source.config_username(config)),
        password: args
            .credentials
            .password
            .clone()
            .or_else(|| config.source.opensky_password.clone()),
        api_key: args
            .credentials
            .api_key
            .clone()
            .or_else(|| source.config_api_key(config)),
    };

    source.to_config(credentials, simulator)
}

/// Resolve the HTTP timeout from CLI args and config.
pub fn resolve_timeout(cli_timeout: Option<u64>, config: &ConfigFile) -> Duration {
    Duration::from_secs(cli_timeout.unwrap_or(config.source.timeout).max(1))
}

/// Tracking-related CLI arguments.
#[derive(Debug, Clone, Default)]
pub struct LocationArgs {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub radius: Option<f64>,
    pub update_interval: Option<f64>,
    pub callsigns: Vec<String>,
    pub mock_aircraft_count: Option<usize>,
    pub seed: Option<u64>,
}

/// Resolve and validate tracker settings from CLI args and config.
pub fn resolve_settings(args: &LocationArgs, config: &ConfigFile) -> Result<TrackerSettings, CliError> {
    let latitude = args.latitude.or(config.location.latitude).ok_or_else(|| {
        CliError::Config("latitude is required (--latitude or [location] latitude)".to_string())
    })?;
    let longitude = args.longitude.or(config.location.longitude).ok_or_else(|| {
        CliError::Config("longitude is required (--longitude or [location] longitude)".to_string())
    })?;

    let interval = args.update_interval.unwrap_or(config.tracking.update_interval);
    let update_interval = Duration::try_from_secs_f64(interval).map_err(|_| {
        CliError::Config(format!(
            "update interval must be a number of seconds, got {}",
            interval
        ))
    })?;

    let mut settings = TrackerSettings::new(GeoPoint::new(latitude, longitude));
    settings.radius_km = args.radius.unwrap_or(config.location.radius_km);
    settings.update_interval = update_interval;
    settings.target_count = args.mock_aircraft_count.unwrap_or(config.simulator.target_count);
    settings.seed = args.seed.or(config.simulator.seed);
    settings.highlight = if args.callsigns.is_empty() {
        config.tracking.highlight.clone()
    } else {
        args.callsigns.clone()
    };

    settings.validate()?;
    Ok(settings)
}

/// Build the alert sink from CLI args and config.
///
/// Command mode without a sound file writes the built-in beep next to the
/// config file and plays that.
pub fn resolve_alert(
    cli_alert: Option<AlertType>,
    cli_sound_file: Option<PathBuf>,
    config: &ConfigFile,
) -> Result<Arc<dyn AlertSink>, CliError> {
    let sound_file = cli_sound_file.or_else(|| config.alert.sound_file.clone());

    // A sound file on the command line implies command mode
    let mode = match (cli_alert, &sound_file) {
        (Some(alert), _) => alert.into(),
        (None, Some(_)) if config.alert.mode == AlertMode::Bell => AlertMode::Command,
        (None, _) => config.alert.mode,
    };

    let alert: Arc<dyn AlertSink> = match mode {
        AlertMode::Bell => Arc::new(TerminalBell),
        AlertMode::Off => Arc::new(SilentAlert),
        AlertMode::Command => {
            let path = match sound_file {
                Some(path) => path,
                None => write_default_beep(&config_directory())?,
            };
            info!(command = %config.alert.command, sound_file = %path.display(), "Using command alert");
            Arc::new(CommandAlert::new(config.alert.command.clone(), path)?)
        }
    };

    Ok(alert)
}
