//! User configuration in `~/.skyradar/config.ini`.
//!
//! # Example
//!
//! ```no_run
//! use skyradar::config::ConfigFile;
//!
//! let config = ConfigFile::load()?;
//! println!("polling {} every {}s", config.tracking.source, config.tracking.update_interval);
//! # Ok::<(), skyradar::config::ConfigFileError>(())
//! ```

mod defaults;
mod file;
mod parser;
mod settings;
mod writer;

pub use defaults::{DEFAULT_ALERT_COMMAND, DEFAULT_LOG_FILE, DEFAULT_SOURCE, VALID_SOURCES};
pub use file::{config_directory, config_file_path, ConfigFileError};
pub use settings::{
    AlertMode, AlertSettings, ConfigFile, LocationSettings, LoggingSettings, SimulatorSettings,
    SourceSettings, TrackingSettings,
};
