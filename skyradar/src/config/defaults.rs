//! Default values for all configuration settings.

use super::file::config_directory;
use super::settings::*;
use crate::simulator::DEFAULT_TARGET_COUNT;
use crate::source::DEFAULT_TIMEOUT;
use crate::tracking::{DEFAULT_RADIUS_KM, DEFAULT_UPDATE_INTERVAL};

/// Default data source.
pub const DEFAULT_SOURCE: &str = "opensky";

/// Source names accepted in `[tracking] source`.
pub const VALID_SOURCES: &[&str] = &[
    "opensky",
    "adsbexchange",
    "airlabs",
    "aviationstack",
    "flightradar24",
    "flightaware",
    "mock",
];

/// Default log file name inside the config directory.
pub const DEFAULT_LOG_FILE: &str = "skyradar.log";

/// Player used for command alerts.
#[cfg(target_os = "macos")]
pub const DEFAULT_ALERT_COMMAND: &str = "afplay";

/// Player used for command alerts.
#[cfg(not(target_os = "macos"))]
pub const DEFAULT_ALERT_COMMAND: &str = "aplay";

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            location: LocationSettings {
                latitude: None,
                longitude: None,
                radius_km: DEFAULT_RADIUS_KM,
            },
            tracking: TrackingSettings {
                update_interval: DEFAULT_UPDATE_INTERVAL.as_secs_f64(),
                source: DEFAULT_SOURCE.to_string(),
                highlight: Vec::new(),
                non_interactive: false,
            },
            source: SourceSettings {
                opensky_username: None,
                opensky_password: None,
                adsbexchange_api_key: None,
                airlabs_api_key: None,
                aviationstack_api_key: None,
                flightradar24_api_key: None,
                flightaware_username: None,
                flightaware_api_key: None,
                timeout: DEFAULT_TIMEOUT.as_secs(),
            },
            simulator: SimulatorSettings {
                target_count: DEFAULT_TARGET_COUNT,
                seed: None,
            },
            alert: AlertSettings {
                mode: AlertMode::Bell,
                command: DEFAULT_ALERT_COMMAND.to_string(),
                sound_file: None,
            },
            logging: LoggingSettings {
                file: config_directory().join(DEFAULT_LOG_FILE),
            },
        }
    }
}
