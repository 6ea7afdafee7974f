//! TUI application module for the SkyRadar CLI.
//!
//! Separates presenter selection from argument parsing.
//!
//! - `run_tui()` - Interactive radar dashboard
//! - `run_headless()` - Plain-text reports for non-TTY environments

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use tracing::info;

use skyradar::tracking::TrackingLoop;

use crate::error::CliError;
use crate::ui::{Dashboard, ReportPresenter};

/// Run the tracking loop behind the full-screen dashboard.
///
/// The terminal is restored before returning, also on error.
pub fn run_tui(tracking: &mut TrackingLoop, shutdown: Arc<AtomicBool>) -> Result<(), CliError> {
    let mut dashboard = Dashboard::new()?;

    let result = tracking.run(&mut dashboard, &shutdown);
    dashboard.restore()?;
    result?;

    info!("Dashboard closed");
    Ok(())
}

/// Run the tracking loop with line-oriented output until Ctrl+C.
pub fn run_headless(tracking: &mut TrackingLoop, shutdown: Arc<AtomicBool>) -> Result<(), CliError> {
    println!(
        "Tracking aircraft via {}. Press Ctrl+C to stop.",
        tracking.source_name()
    );
    println!();

    let mut presenter = ReportPresenter::stdout();
    tracking.run(&mut presenter, &shutdown)?;

    println!();
    println!("Stopped.");
    Ok(())
}
