//! Track command - poll a source and show aircraft around a location.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::info;

use skyradar::config::ConfigFile;
use skyradar::source::SourceFactory;
use skyradar::tracking::TrackingLoop;

use super::common::{
    resolve_alert, resolve_settings, resolve_source, resolve_timeout, AlertType, LocationArgs,
    SourceArgs,
};
use crate::error::CliError;
use crate::runner::CliRunner;
use crate::tui_app::{run_headless, run_tui};

/// Arguments for the track command.
pub struct TrackArgs {
    pub location: LocationArgs,
    pub source: SourceArgs,
    pub alert: Option<AlertType>,
    pub sound_file: Option<PathBuf>,
    pub non_interactive: bool,
    pub debug: bool,
}

/// Whether to draw the radar dashboard rather than text reports.
///
/// Either the flag or the config file can force text output; the
/// dashboard also needs stdout to be a terminal.
fn wants_dashboard(
    cli_non_interactive: bool,
    config_non_interactive: bool,
    stdout_is_tty: bool,
) -> bool {
    !cli_non_interactive && !config_non_interactive && stdout_is_tty
}

/// Run the track command.
pub fn run(args: TrackArgs) -> Result<(), CliError> {
    // Decided before logging starts: headless runs keep stdout logging
    let config = ConfigFile::load()?;
    let interactive = wants_dashboard(
        args.non_interactive,
        config.tracking.non_interactive,
        atty::is(atty::Stream::Stdout),
    );

    let runner = CliRunner::with_config(config, args.debug, interactive)?;
    runner.log_startup("track");
    let config = runner.config();

    let settings = resolve_settings(&args.location, config)?;
    let source_config = resolve_source(&args.source, settings.simulator_config(), config)?;
    let timeout = resolve_timeout(args.source.timeout, config);
    let alert = resolve_alert(args.alert, args.sound_file, config)?;

    let source = SourceFactory::new(timeout).create(&source_config)?;
    info!(
        source = source.name(),
        latitude = settings.center.lat,
        longitude = settings.center.lon,
        radius_km = settings.radius_km,
        "Data source ready"
    );

    let mut tracking = TrackingLoop::new(source, &settings, alert);

    // Set up signal handler for graceful shutdown
    let shutdown = Arc::new(AtomicBool::new(false));
    let shutdown_clone = shutdown.clone();

    ctrlc::set_handler(move || {
        shutdown_clone.store(true, Ordering::SeqCst);
    })
    .map_err(|e| CliError::Config(format!("Failed to set signal handler: {}", e)))?;

    if interactive {
        run_tui(&mut tracking, shutdown)
    } else {
        run_headless(&mut tracking, shutdown)
    }
}
