//! The simulator exposed as a data source.

use std::time::{Duration, Instant};

use parking_lot::Mutex;

use super::{MotionSimulator, SimulatorConfig};
use crate::geo::GeoPoint;
use crate::record::PositionRecord;
use crate::region::Region;
use crate::source::{SourceError, TrafficSource};

struct SimulatorState {
    simulator: MotionSimulator,
    /// Last tick that moved aircraft. `None` until the first fetch.
    last_advance: Option<Instant>,
}

/// Wall-clock driven [`MotionSimulator`].
///
/// Each `fetch_in_radius` ticks the simulator with the time elapsed since
/// the last tick that actually moved aircraft, so frequent polling still
/// accumulates motion instead of being swallowed by the one-second floor.
pub struct SimulatedSource {
    state: Mutex<SimulatorState>,
}

impl SimulatedSource {
    pub fn new(config: SimulatorConfig) -> Self {
        Self {
            state: Mutex::new(SimulatorState {
                simulator: MotionSimulator::new(config),
                last_advance: None,
            }),
        }
    }

    /// Ticks with an explicit clock reading (used by tests).
    pub fn fetch_at(&self, center: GeoPoint, radius_km: f64, now: Instant) -> Vec<PositionRecord> {
        let mut state = self.state.lock();

        let elapsed = state
            .last_advance
            .map(|t| now.saturating_duration_since(t))
            .unwrap_or(Duration::ZERO);

        let report = state.simulator.tick(center, radius_km, elapsed);
        if report.advanced || state.last_advance.is_none() {
            state.last_advance = Some(now);
        }

        // Spawned aircraft start outside the radius and fly in
        Region::new(center, radius_km).filter(state.simulator.records())
    }
}

impl TrafficSource for SimulatedSource {
    fn name(&self) -> &str {
        "Simulated"
    }

    fn fetch_in_radius(
        &self,
        center: GeoPoint,
        radius_km: f64,
    ) -> Result<Vec<PositionRecord>, SourceError> {
        Ok(self.fetch_at(center, radius_km, Instant::now()))
    }

    fn fetch_by_label(&self, label: &str) -> Result<Option<PositionRecord>, SourceError> {
        let state = self.state.lock();

        Ok(state
            .simulator
            .records()
            .into_iter()
            .find(|r| r.has_label(label)))
    }
}
