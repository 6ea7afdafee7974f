//! CLI runner for common setup.
//!
//! Encapsulates config loading and logging initialization so every command
//! handler starts the same way.

use tracing::info;

use skyradar::config::{ConfigFile, DEFAULT_LOG_FILE};
use skyradar::logging::{init_logging, LoggingGuard};

use crate::error::CliError;

/// Runner that manages CLI lifecycle.
pub struct CliRunner {
    /// Logging guard - keeps logging active while runner exists
    _logging_guard: LoggingGuard,
    /// Loaded configuration file
    config: ConfigFile,
}

impl CliRunner {
    /// Load the config file and initialize logging.
    ///
    /// Stdout logging is disabled when `takes_terminal` is set and stdout is a
    /// TTY, so log lines never corrupt the radar display.
    ///
    /// # Arguments
    ///
    /// * `debug_mode` - Default to debug level when RUST_LOG is unset
    /// * `takes_terminal` - The command will draw a full-screen UI
    pub fn new(debug_mode: bool, takes_terminal: bool) -> Result<Self, CliError> {
        Self::with_config(ConfigFile::load()?, debug_mode, takes_terminal)
    }

    /// Initialize logging for an already loaded config file.
    ///
    /// For commands whose terminal use depends on config values.
    pub fn with_config(
        config: ConfigFile,
        debug_mode: bool,
        takes_terminal: bool,
    ) -> Result<Self, CliError> {
        let log_path = &config.logging.file;
        let log_dir = log_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| ".".into());
        let log_file = log_path
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| DEFAULT_LOG_FILE.to_string());

        let stdout_enabled = !(takes_terminal && atty::is(atty::Stream::Stdout));

        let logging_guard = init_logging(&log_dir, &log_file, stdout_enabled, debug_mode)
            .map_err(|e| CliError::LoggingInit(e.to_string()))?;

        Ok(Self {
            _logging_guard: logging_guard,
            config,
        })
    }

    /// Get the loaded configuration.
    pub fn config(&self) -> &ConfigFile {
        &self.config
    }

    /// Log startup information for a command.
    pub fn log_startup(&self, command: &str) {
        info!("SkyRadar v{}", skyradar::VERSION);
        info!("SkyRadar CLI: {} command", command);
    }
}
