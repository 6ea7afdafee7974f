//! The poll, diff, alert and render cycle.
//!
//! [`TrackingLoop`] owns the data source, the [`RegionTracker`] and the
//! alert sink. Display and input are abstracted behind [`Presenter`] so the
//! same loop drives the interactive dashboard and the headless reporter.
//!
//! ```text
//! IDLE ──interval / Refresh──► POLLING ──► ALERTING? ──► RENDERING ──► IDLE
//! ```

mod settings;

pub use settings::{
    SettingsError, TrackerSettings, DEFAULT_RADIUS_KM, DEFAULT_UPDATE_INTERVAL, MIN_UPDATE_INTERVAL,
};

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::alert::AlertSink;
use crate::geo::GeoPoint;
use crate::record::PositionRecord;
use crate::region::{ArrivalDeparture, RegionTracker};
use crate::source::{SourceError, TrafficSource};

/// Longest single wait for input, so shutdown is noticed promptly.
pub const INPUT_SLICE: Duration = Duration::from_millis(250);

/// User intent, produced by the presenter's input handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerCommand {
    Quit,
    ToggleInfoPanel,
    Refresh,
}

/// Everything a presenter needs to draw one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackingView {
    pub source_name: String,
    pub center: GeoPoint,
    pub radius_km: f64,
    /// Aircraft in the region, nearest first.
    pub contacts: Vec<PositionRecord>,
    pub updated_at: Option<DateTime<Utc>>,
    pub last_error: Option<String>,
    pub show_info_panel: bool,
    pub highlight: Vec<String>,
}

impl TrackingView {
    /// Whether `record` carries one of the highlighted callsigns.
    pub fn is_highlighted(&self, record: &PositionRecord) -> bool {
        self.highlight.iter().any(|label| record.has_label(label))
    }
}

/// Display and input surface driven by [`TrackingLoop::run`].
pub trait Presenter {
    /// Draws the current state.
    fn render(&mut self, view: &TrackingView) -> io::Result<()>;

    /// Announces aircraft that just entered the region.
    fn show_arrivals(&mut self, arrivals: &[PositionRecord]) -> io::Result<()>;

    /// Waits up to `timeout` for a command.
    fn next_command(&mut self, timeout: Duration) -> io::Result<Option<TrackerCommand>>;
}

/// Outcome of a single poll.
#[derive(Debug, Default)]
pub struct CycleReport {
    pub changes: ArrivalDeparture,
    pub error: Option<SourceError>,
}

impl CycleReport {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Drives one region against one source.
pub struct TrackingLoop {
    source: Box<dyn TrafficSource>,
    tracker: RegionTracker,
    alert: Arc<dyn AlertSink>,
    update_interval: Duration,
    highlight: Vec<String>,
    show_info_panel: bool,
    updated_at: Option<DateTime<Utc>>,
    last_error: Option<String>,
}

impl TrackingLoop {
    /// Creates a loop from validated settings.
    pub fn new(
        source: Box<dyn TrafficSource>,
        settings: &TrackerSettings,
        alert: Arc<dyn AlertSink>,
    ) -> Self {
        Self {
            source,
            tracker: RegionTracker::new(settings.region()),
            alert,
            update_interval: settings.update_interval,
            highlight: settings.highlight.clone(),
            show_info_panel: true,
            updated_at: None,
            last_error: None,
        }
    }

    pub fn tracker(&self) -> &RegionTracker {
        &self.tracker
    }

    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    /// Fetches, diffs and alerts once.
    ///
    /// A source failure keeps the previous snapshot and is remembered for
    /// the status line until the next successful poll.
    pub fn poll_once(&mut self) -> CycleReport {
        let region = *self.tracker.region();

        let records = match self.source.fetch_in_radius(region.center, region.radius_km) {
            Ok(records) => records,
            Err(e) => {
                warn!(source = self.source.name(), error = %e, "Failed to fetch aircraft");
                self.last_error = Some(e.to_string());
                return CycleReport {
                    changes: ArrivalDeparture::default(),
                    error: Some(e),
                };
            }
        };

        debug!(source = self.source.name(), count = records.len(), "Fetched aircraft");
        let changes = self.tracker.update(records);
        self.updated_at = Some(Utc::now());
        self.last_error = None;

        for record in &changes.arrivals {
            info!(id = %record.id, callsign = record.display_name(), "Aircraft entered region");
        }
        for id in &changes.departed {
            info!(id = %id, "Aircraft left region");
        }

        if !changes.arrived.is_empty() {
            self.alert.trigger();
        }

        CycleReport {
            changes,
            error: None,
        }
    }

    /// Applies a command. Returns `true` when a poll should happen now.
    pub fn apply(&mut self, command: TrackerCommand, shutdown: &AtomicBool) -> bool {
        match command {
            TrackerCommand::Quit => {
                shutdown.store(true, Ordering::SeqCst);
                false
            }
            TrackerCommand::ToggleInfoPanel => {
                self.show_info_panel = !self.show_info_panel;
                false
            }
            TrackerCommand::Refresh => true,
        }
    }

    /// Current frame contents.
    pub fn view(&self) -> TrackingView {
        let region = self.tracker.region();
        TrackingView {
            source_name: self.source.name().to_string(),
            center: region.center,
            radius_km: region.radius_km,
            contacts: self.tracker.snapshot(),
            updated_at: self.updated_at,
            last_error: self.last_error.clone(),
            show_info_panel: self.show_info_panel,
            highlight: self.highlight.clone(),
        }
    }

    /// Runs until `shutdown` is set, either externally or by
    /// [`TrackerCommand::Quit`].
    ///
    /// Commands are applied at the top of each iteration, so a frame is
    /// never abandoned halfway.
    pub fn run(&mut self, presenter: &mut dyn Presenter, shutdown: &AtomicBool) -> io::Result<()> {
        info!(
            source = self.source.name(),
            center = %self.tracker.region().center,
            radius_km = self.tracker.region().radius_km,
            interval_secs = self.update_interval.as_secs_f64(),
            "Tracking started"
        );

        let mut pending: Option<TrackerCommand> = None;
        let mut next_poll = Instant::now();

        while !shutdown.load(Ordering::SeqCst) {
            let mut poll_now = Instant::now() >= next_poll;
            let mut redraw = false;

            if let Some(command) = pending.take() {
                debug!(?command, "Applying command");
                poll_now |= self.apply(command, shutdown);
                redraw = command == TrackerCommand::ToggleInfoPanel;
                if shutdown.load(Ordering::SeqCst) {
                    break;
                }
            }

            if poll_now {
                let report = self.poll_once();
                if !report.changes.arrivals.is_empty() {
                    presenter.show_arrivals(&report.changes.arrivals)?;
                }
                next_poll = Instant::now() + self.update_interval;
                redraw = true;
            }

            if redraw {
                presenter.render(&self.view())?;
            }

            let wait = next_poll
                .saturating_duration_since(Instant::now())
                .min(INPUT_SLICE);
            pending = presenter.next_command(wait)?;
        }

        info!("Tracking stopped");
        Ok(())
    }
}
