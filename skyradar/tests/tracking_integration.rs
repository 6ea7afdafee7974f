//! Integration tests for the tracking loop.
//!
//! These tests drive the public API end to end:
//! - Seeded simulator population over a long tick
//! - `TrackingLoop::run` with a scripted presenter and a recording alert
//! - Source failures surfacing in the view without losing the snapshot
//!
//! Run with: `cargo test --test tracking_integration`

use std::collections::VecDeque;
use std::io;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::Utc;

use skyradar::alert::AlertSink;
use skyradar::geo::{self, GeoPoint};
use skyradar::record::PositionRecord;
use skyradar::region::Region;
use skyradar::simulator::{MotionSimulator, SimulatedSource, SimulatorConfig};
use skyradar::source::{SourceError, TrafficSource};
use skyradar::tracking::{Presenter, TrackerCommand, TrackerSettings, TrackingLoop, TrackingView};

// ============================================================================
// Helpers
// ============================================================================

const ZURICH: GeoPoint = GeoPoint::new(47.3769, 8.5417);

fn aircraft(id: &str, bearing: f64, km: f64) -> PositionRecord {
    PositionRecord::new(id, Utc::now())
        .with_label(Some(id.to_uppercase()))
        .with_position(Some(geo::offset_point(ZURICH, bearing, km)))
        .with_altitude_m(Some(10_000.0))
        .with_speed_mps(Some(230.0))
        .with_heading_deg(Some(bearing))
}

/// Replays fetch results in order, then keeps returning the last one.
struct ScriptedSource {
    script: Mutex<VecDeque<Result<Vec<PositionRecord>, SourceError>>>,
}

impl ScriptedSource {
    fn new(script: Vec<Result<Vec<PositionRecord>, SourceError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
        }
    }
}

impl TrafficSource for ScriptedSource {
    fn name(&self) -> &str {
        "Scripted"
    }

    fn fetch_in_radius(&self, center: GeoPoint, radius_km: f64) -> Result<Vec<PositionRecord>, SourceError> {
        let mut script = self.script.lock().unwrap();
        let next = if script.len() > 1 {
            script.pop_front().unwrap()
        } else {
            script.front().cloned().unwrap_or_else(|| Ok(Vec::new()))
        };
        next.map(|records| Region::new(center, radius_km).filter(records))
    }

    fn fetch_by_label(&self, label: &str) -> Result<Option<PositionRecord>, SourceError> {
        let script = self.script.lock().unwrap();
        Ok(script
            .front()
            .and_then(|r| r.as_ref().ok())
            .and_then(|records| records.iter().find(|r| r.has_label(label)).cloned()))
    }
}

#[derive(Default)]
struct RecordingAlert {
    count: AtomicUsize,
}

impl AlertSink for RecordingAlert {
    fn trigger(&self) {
        self.count.fetch_add(1, Ordering::SeqCst);
    }
}

/// Feeds a fixed list of commands, then quits.
struct ScriptedPresenter {
    commands: VecDeque<Option<TrackerCommand>>,
    frames: Vec<TrackingView>,
    arrivals: Vec<Vec<String>>,
}

impl ScriptedPresenter {
    fn new(commands: Vec<Option<TrackerCommand>>) -> Self {
        Self {
            commands: commands.into(),
            frames: Vec::new(),
            arrivals: Vec::new(),
        }
    }
}

impl Presenter for ScriptedPresenter {
    fn render(&mut self, view: &TrackingView) -> io::Result<()> {
        self.frames.push(view.clone());
        Ok(())
    }

    fn show_arrivals(&mut self, arrivals: &[PositionRecord]) -> io::Result<()> {
        self.arrivals
            .push(arrivals.iter().map(|r| r.id.clone()).collect());
        Ok(())
    }

    fn next_command(&mut self, _timeout: Duration) -> io::Result<Option<TrackerCommand>> {
        Ok(self
            .commands
            .pop_front()
            .unwrap_or(Some(TrackerCommand::Quit)))
    }
}

fn settings() -> TrackerSettings {
    let mut settings = TrackerSettings::new(ZURICH);
    settings.radius_km = 10.0;
    // Long enough that only explicit refreshes poll during a test
    settings.update_interval = Duration::from_secs(3600);
    settings.highlight = vec!["swr1".to_string()];
    settings
}

// ============================================================================
// Simulator
// ============================================================================

/// Seed 42, five aircraft: the first tick fills the population, an hour
/// later every original aircraft has flown far beyond twice the radius and
/// has been replaced.
#[test]
fn test_simulator_end_to_end() {
    let mut sim = MotionSimulator::new(SimulatorConfig::new(5).with_seed(Some(42)));

    let first = sim.tick(ZURICH, 10.0, Duration::ZERO);
    assert!(!first.advanced);
    assert_eq!(first.spawned.len(), 5);
    assert_eq!(sim.len(), 5);

    let later = sim.tick(ZURICH, 10.0, Duration::from_secs(3600));
    assert!(later.advanced);

    let mut retired = later.retired.clone();
    let mut original = first.spawned.clone();
    retired.sort();
    original.sort();
    assert_eq!(retired, original);
    assert_eq!(later.spawned.len(), 5);
    assert_eq!(sim.len(), 5);
}

#[test]
fn test_simulated_source_results_stay_in_region() {
    let source = SimulatedSource::new(SimulatorConfig::new(50).with_seed(Some(7)));
    let region = Region::new(ZURICH, 10.0);

    let records = source.fetch_in_radius(ZURICH, 10.0).unwrap();
    assert!(records.iter().all(|r| region.contains(r)));
    assert_eq!(source.name(), "Simulated");
}

// ============================================================================
// Tracking loop
// ============================================================================

#[test]
fn test_run_polls_alerts_and_quits() {
    let source = ScriptedSource::new(vec![
        Ok(vec![aircraft("swr1", 0.0, 3.0), aircraft("dlh2", 90.0, 6.0)]),
        Ok(vec![
            aircraft("swr1", 0.0, 2.0),
            aircraft("dlh2", 90.0, 6.5),
            aircraft("far9", 180.0, 40.0),
        ]),
        Ok(vec![aircraft("swr1", 0.0, 1.0), aircraft("afr3", 270.0, 4.0)]),
    ]);
    let alert = Arc::new(RecordingAlert::default());
    let mut tracking = TrackingLoop::new(Box::new(source), &settings(), alert.clone());

    let mut presenter = ScriptedPresenter::new(vec![
        None,
        Some(TrackerCommand::Refresh),
        Some(TrackerCommand::ToggleInfoPanel),
        Some(TrackerCommand::Refresh),
    ]);
    let shutdown = AtomicBool::new(false);

    tracking.run(&mut presenter, &shutdown).unwrap();

    assert!(shutdown.load(Ordering::SeqCst));

    // Initial poll, refresh, toggle redraw, refresh
    assert_eq!(presenter.frames.len(), 4);
    assert_eq!(
        presenter.arrivals,
        vec![vec!["dlh2".to_string(), "swr1".to_string()], vec!["afr3".to_string()]]
    );
    assert_eq!(alert.count.load(Ordering::SeqCst), 2);

    let first = &presenter.frames[0];
    assert_eq!(first.source_name, "Scripted");
    assert!(first.show_info_panel);
    let ids: Vec<&str> = first.contacts.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["swr1", "dlh2"]);
    assert!(first.is_highlighted(&first.contacts[0]));
    assert!(!first.is_highlighted(&first.contacts[1]));

    // Out-of-region aircraft never reach the view
    assert_eq!(presenter.frames[1].contacts.len(), 2);
    assert!(!presenter.frames[2].show_info_panel);

    let last = presenter.frames.last().unwrap();
    let ids: Vec<&str> = last.contacts.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["swr1", "afr3"]);
}

#[test]
fn test_run_survives_source_failure() {
    let source = ScriptedSource::new(vec![
        Ok(vec![aircraft("swr1", 0.0, 3.0)]),
        Err(SourceError::Status {
            status: 503,
            url: "https://example.invalid/states".to_string(),
        }),
        Ok(vec![aircraft("swr1", 0.0, 2.0)]),
    ]);
    let alert = Arc::new(RecordingAlert::default());
    let mut tracking = TrackingLoop::new(Box::new(source), &settings(), alert.clone());

    let mut presenter = ScriptedPresenter::new(vec![
        Some(TrackerCommand::Refresh),
        Some(TrackerCommand::Refresh),
    ]);
    tracking.run(&mut presenter, &AtomicBool::new(false)).unwrap();

    assert_eq!(presenter.frames.len(), 3);

    let failed = &presenter.frames[1];
    assert_eq!(failed.contacts.len(), 1);
    assert!(failed.last_error.as_deref().unwrap().contains("503"));
    assert_eq!(failed.updated_at, presenter.frames[0].updated_at);

    let recovered = &presenter.frames[2];
    assert_eq!(recovered.last_error, None);
    assert_eq!(alert.count.load(Ordering::SeqCst), 1);
}

#[test]
fn test_external_shutdown_stops_before_polling() {
    let alert = Arc::new(RecordingAlert::default());
    let mut tracking = TrackingLoop::new(
        Box::new(ScriptedSource::new(vec![Ok(vec![aircraft("swr1", 0.0, 3.0)])])),
        &settings(),
        alert.clone(),
    );

    let mut presenter = ScriptedPresenter::new(vec![]);
    let shutdown = AtomicBool::new(true);
    tracking.run(&mut presenter, &shutdown).unwrap();

    assert!(presenter.frames.is_empty());
    assert_eq!(alert.count.load(Ordering::SeqCst), 0);
}
