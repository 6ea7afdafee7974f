//! Settings structs for all configuration sections.
//!
//! Each struct represents one `[section]` of the INI config file.

use std::path::PathBuf;

/// Complete configuration loaded from config.ini.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigFile {
    pub location: LocationSettings,
    pub tracking: TrackingSettings,
    pub source: SourceSettings,
    pub simulator: SimulatorSettings,
    pub alert: AlertSettings,
    pub logging: LoggingSettings,
}

/// Region of interest.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationSettings {
    /// Center latitude; unset means it must come from the command line
    pub latitude: Option<f64>,
    /// Center longitude
    pub longitude: Option<f64>,
    pub radius_km: f64,
}

/// Polling and display.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackingSettings {
    /// Seconds between polls
    pub update_interval: f64,
    /// Source name, one of `VALID_SOURCES`
    pub source: String,
    /// Callsigns to highlight
    pub highlight: Vec<String>,
    /// Print reports instead of drawing the radar
    pub non_interactive: bool,
}

/// Credentials and HTTP settings for the data sources.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceSettings {
    pub opensky_username: Option<String>,
    pub opensky_password: Option<String>,
    pub adsbexchange_api_key: Option<String>,
    pub airlabs_api_key: Option<String>,
    pub aviationstack_api_key: Option<String>,
    pub flightradar24_api_key: Option<String>,
    pub flightaware_username: Option<String>,
    pub flightaware_api_key: Option<String>,
    /// Request timeout in seconds
    pub timeout: u64,
}

/// Simulated traffic.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulatorSettings {
    pub target_count: usize,
    pub seed: Option<u64>,
}

/// How arrivals are announced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertMode {
    /// Terminal bell
    Bell,
    /// External player command
    Command,
    Off,
}

impl AlertMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bell => "bell",
            Self::Command => "command",
            Self::Off => "off",
        }
    }

    pub fn from_config_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "bell" => Some(Self::Bell),
            "command" => Some(Self::Command),
            "off" | "none" => Some(Self::Off),
            _ => None,
        }
    }
}

/// Alert settings.
#[derive(Debug, Clone, PartialEq)]
pub struct AlertSettings {
    pub mode: AlertMode,
    /// Player program used in command mode
    pub command: String,
    /// WAV file; the generated beep is used when unset
    pub sound_file: Option<PathBuf>,
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingSettings {
    pub file: PathBuf,
}
