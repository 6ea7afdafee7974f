//! Data-source factory for centralized source creation.
//!
//! The CLI resolves a [`SourceConfig`] from arguments and the config file,
//! and the [`SourceFactory`] turns it into a boxed [`TrafficSource`].

use std::time::Duration;

use super::adsbexchange::AdsbExchangeSource;
use super::airlabs::AirLabsSource;
use super::aviationstack::AviationStackSource;
use super::flightaware::{FlightAwareCredentials, FlightAwareSource};
use super::flightradar24::FlightRadar24Source;
use super::http::{ReqwestClient, DEFAULT_TIMEOUT};
use super::opensky::{OpenSkyCredentials, OpenSkySource};
use super::types::{SourceError, TrafficSource};
use crate::simulator::{SimulatedSource, SimulatorConfig};

/// Configuration for creating a data source.
///
/// # Example
///
/// ```
/// use skyradar::source::SourceConfig;
///
/// // Anonymous OpenSky access
/// let opensky = SourceConfig::opensky(None);
///
/// // Reproducible simulated traffic
/// let mock = SourceConfig::simulated(5, Some(42));
/// assert_eq!(mock.name(), "Simulated");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum SourceConfig {
    /// OpenSky Network, anonymous or with basic-auth credentials.
    OpenSky {
        credentials: Option<OpenSkyCredentials>,
    },

    /// ADS-B Exchange via RapidAPI.
    AdsbExchange { api_key: String },

    /// AirLabs flight tracker.
    AirLabs { api_key: String },

    /// AviationStack flight data.
    AviationStack { access_key: String },

    /// FlightRadar24 live feed.
    FlightRadar24 { api_key: String },

    /// FlightAware FlightXML3.
    FlightAware { credentials: FlightAwareCredentials },

    /// Seeded simulated traffic, no network access.
    Simulated(SimulatorConfig),
}

impl SourceConfig {
    pub fn opensky(credentials: Option<OpenSkyCredentials>) -> Self {
        Self::OpenSky { credentials }
    }

    pub fn adsbexchange(api_key: impl Into<String>) -> Self {
        Self::AdsbExchange {
            api_key: api_key.into(),
        }
    }

    pub fn airlabs(api_key: impl Into<String>) -> Self {
        Self::AirLabs {
            api_key: api_key.into(),
        }
    }

    pub fn aviationstack(access_key: impl Into<String>) -> Self {
        Self::AviationStack {
            access_key: access_key.into(),
        }
    }

    pub fn flightradar24(api_key: impl Into<String>) -> Self {
        Self::FlightRadar24 {
            api_key: api_key.into(),
        }
    }

    pub fn flightaware(username: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self::FlightAware {
            credentials: FlightAwareCredentials {
                username: username.into(),
                api_key: api_key.into(),
            },
        }
    }

    pub fn simulated(target_count: usize, seed: Option<u64>) -> Self {
        Self::Simulated(SimulatorConfig::new(target_count).with_seed(seed))
    }

    /// Returns the source name for this configuration.
    pub fn name(&self) -> &str {
        match self {
            Self::OpenSky { .. } => "OpenSky Network",
            Self::AdsbExchange { .. } => "ADS-B Exchange",
            Self::AirLabs { .. } => "AirLabs",
            Self::AviationStack { .. } => "AviationStack",
            Self::FlightRadar24 { .. } => "FlightRadar24",
            Self::FlightAware { .. } => "FlightAware",
            Self::Simulated(_) => "Simulated",
        }
    }

    /// Whether this source talks to the network.
    pub fn is_remote(&self) -> bool {
        !matches!(self, Self::Simulated(_))
    }
}

/// Factory for creating data sources.
pub struct SourceFactory {
    timeout: Duration,
}

impl Default for SourceFactory {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl SourceFactory {
    /// Create a factory whose HTTP clients use `timeout` per request.
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Create a data source from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn create(&self, config: &SourceConfig) -> Result<Box<dyn TrafficSource>, SourceError> {
        let source: Box<dyn TrafficSource> = match config {
            SourceConfig::OpenSky { credentials } => Box::new(
                OpenSkySource::new(self.http_client()?).with_credentials(credentials.clone()),
            ),
            SourceConfig::AdsbExchange { api_key } => {
                Box::new(AdsbExchangeSource::new(self.http_client()?, api_key.clone()))
            }
            SourceConfig::AirLabs { api_key } => {
                Box::new(AirLabsSource::new(self.http_client()?, api_key.clone()))
            }
            SourceConfig::AviationStack { access_key } => Box::new(AviationStackSource::new(
                self.http_client()?,
                access_key.clone(),
            )),
            SourceConfig::FlightRadar24 { api_key } => {
                Box::new(FlightRadar24Source::new(self.http_client()?, api_key.clone()))
            }
            SourceConfig::FlightAware { credentials } => Box::new(FlightAwareSource::new(
                self.http_client()?,
                credentials.clone(),
            )),
            SourceConfig::Simulated(sim) => Box::new(SimulatedSource::new(sim.clone())),
        };

        Ok(source)
    }

    fn http_client(&self) -> Result<ReqwestClient, SourceError> {
        ReqwestClient::with_timeout(self.timeout)
    }
}
