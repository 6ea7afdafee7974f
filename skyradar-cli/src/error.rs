//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and appropriate exit codes.

use std::fmt;
use std::io;
use std::process;

use skyradar::alert::AlertError;
use skyradar::config::ConfigFileError;
use skyradar::source::SourceError;
use skyradar::tracking::SettingsError;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Configuration error
    Config(String),
    /// Config file could not be read or written
    ConfigFile(ConfigFileError),
    /// Tracker settings out of range
    Settings(SettingsError),
    /// Data source failure
    Source(SourceError),
    /// Alert setup failure
    Alert(AlertError),
    /// Terminal could not be set up or drawn
    Terminal(io::Error),
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        match self {
            CliError::Source(SourceError::Auth { .. }) => {
                eprintln!();
                eprintln!("Check the credentials for this source:");
                eprintln!("  --username/--password for OpenSky, --api-key for the others,");
                eprintln!("  or the [source] section of the config file.");
            }
            CliError::Source(SourceError::Http(_)) => {
                eprintln!();
                eprintln!("The data source could not be reached. Try --source mock to run offline.");
            }
            CliError::Config(_) | CliError::ConfigFile(_) | CliError::Settings(_) => {
                eprintln!();
                eprintln!(
                    "Config file: {}",
                    skyradar::config::config_file_path().display()
                );
            }
            _ => {}
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::ConfigFile(e) => write!(f, "{}", e),
            CliError::Settings(e) => write!(f, "Invalid settings: {}", e),
            CliError::Source(e) => write!(f, "Data source error: {}", e),
            CliError::Alert(e) => write!(f, "Alert setup failed: {}", e),
            CliError::Terminal(e) => write!(f, "Terminal error: {}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::ConfigFile(e) => Some(e),
            CliError::Settings(e) => Some(e),
            CliError::Source(e) => Some(e),
            CliError::Alert(e) => Some(e),
            CliError::Terminal(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigFileError> for CliError {
    fn from(e: ConfigFileError) -> Self {
        CliError::ConfigFile(e)
    }
}

impl From<SettingsError> for CliError {
    fn from(e: SettingsError) -> Self {
        CliError::Settings(e)
    }
}

impl From<SourceError> for CliError {
    fn from(e: SourceError) -> Self {
        CliError::Source(e)
    }
}

impl From<AlertError> for CliError {
    fn from(e: AlertError) -> Self {
        CliError::Alert(e)
    }
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        CliError::Terminal(e)
    }
}
