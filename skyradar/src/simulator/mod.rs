//! Simulated traffic
//!
//! A seeded dead-reckoning model that produces a plausible "aircraft near
//! me" feed without network access. Used by the `mock` data source and by
//! tests.
//!
//! # Lifecycle
//!
//! Each simulated aircraft goes through `SPAWNED → ADVANCING → RETIRED`:
//!
//! - spawned on a random bearing between 0.8× and 1.5× the query radius,
//!   so aircraft enter the region instead of popping up in the middle
//! - advanced in a straight line along a heading fixed at spawn time
//! - retired once further than 2× the radius from the center
//!
//! The gap between the spawn band and the retire distance keeps aircraft
//! from flickering at the edge of the scope.
//!
//! # Determinism
//!
//! All randomness comes from a [`ChaCha8Rng`]. With the same seed and the
//! same sequence of `tick` calls the simulator reproduces identical ids,
//! positions and retirements.

mod source;

pub use source::SimulatedSource;

use std::time::Duration;

use chrono::{DateTime, Utc};
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::geo::{distance_km, offset_point, GeoPoint};
use crate::record::PositionRecord;

/// Ticks shorter than this do not move aircraft.
pub const MIN_TICK: Duration = Duration::from_secs(1);

/// Spawn band, as fractions of the query radius.
pub const SPAWN_MIN_RADIUS_FACTOR: f64 = 0.8;
pub const SPAWN_MAX_RADIUS_FACTOR: f64 = 1.5;

/// Aircraft further than this fraction of the radius are retired.
pub const RETIRE_RADIUS_FACTOR: f64 = 2.0;

/// Default number of simulated aircraft.
pub const DEFAULT_TARGET_COUNT: usize = 20;

const AIRLINES: &[&str] = &[
    "SWR", "DLH", "BAW", "AFR", "KLM", "UAE", "QTR", "SIA", "AAL", "UAL",
];

const ORIGIN: &str = "Mock Country";

/// Simulator settings.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulatorConfig {
    /// Number of aircraft kept alive.
    pub target_count: usize,
    /// RNG seed; `None` seeds from the operating system.
    pub seed: Option<u64>,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            target_count: DEFAULT_TARGET_COUNT,
            seed: None,
        }
    }
}

impl SimulatorConfig {
    pub fn new(target_count: usize) -> Self {
        Self {
            target_count,
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }
}

/// What a single [`MotionSimulator::tick`] changed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    /// Whether aircraft were moved (elapsed time was at least [`MIN_TICK`]).
    pub advanced: bool,
    /// Ids spawned this tick, in spawn order.
    pub spawned: Vec<String>,
    /// Ids retired this tick.
    pub retired: Vec<String>,
}

/// A simulated aircraft with its fixed motion vector.
#[derive(Debug, Clone)]
struct SimulatedEntity {
    record: PositionRecord,
    position: GeoPoint,
    heading_deg: f64,
    speed_mps: f64,
}

impl SimulatedEntity {
    fn advance(&mut self, elapsed: Duration, now: DateTime<Utc>) {
        let distance = self.speed_mps * 3.6 * elapsed.as_secs_f64() / 3600.0;
        self.position = offset_point(self.position, self.heading_deg, distance);
        self.record.position = Some(self.position);
        self.record.observed_at = now;
    }
}

/// Seeded dead-reckoning traffic generator.
#[derive(Debug)]
pub struct MotionSimulator {
    config: SimulatorConfig,
    rng: ChaCha8Rng,
    /// Live aircraft in spawn order.
    entities: Vec<SimulatedEntity>,
}

impl MotionSimulator {
    pub fn new(config: SimulatorConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_rng(&mut rand::rng()),
        };

        Self {
            config,
            rng,
            entities: Vec::new(),
        }
    }

    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// Number of live aircraft.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Live aircraft as plain records, in spawn order.
    pub fn records(&self) -> Vec<PositionRecord> {
        self.entities.iter().map(|e| e.record.clone()).collect()
    }

    /// Advance the simulation by `elapsed`, timestamping with the current time.
    pub fn tick(&mut self, center: GeoPoint, radius_km: f64, elapsed: Duration) -> TickReport {
        self.tick_at(center, radius_km, elapsed, Utc::now())
    }

    /// Advance the simulation by `elapsed` with an explicit observation time.
    ///
    /// Motion and retirement only run when `elapsed` is at least
    /// [`MIN_TICK`]. The population is always topped up to the target count.
    pub fn tick_at(
        &mut self,
        center: GeoPoint,
        radius_km: f64,
        elapsed: Duration,
        now: DateTime<Utc>,
    ) -> TickReport {
        let mut report = TickReport::default();

        if elapsed >= MIN_TICK {
            report.advanced = true;

            for entity in &mut self.entities {
                entity.advance(elapsed, now);
            }

            let retire_km = RETIRE_RADIUS_FACTOR * radius_km;
            self.entities.retain(|e| {
                if distance_km(center, e.position) > retire_km {
                    report.retired.push(e.record.id.clone());
                    false
                } else {
                    true
                }
            });
        }

        while self.entities.len() < self.config.target_count {
            let entity = self.spawn(center, radius_km, now);
            report.spawned.push(entity.record.id.clone());
            self.entities.push(entity);
        }

        if !report.spawned.is_empty() || !report.retired.is_empty() {
            debug!(
                spawned = report.spawned.len(),
                retired = report.retired.len(),
                live = self.entities.len(),
                "Simulator tick"
            );
        }

        report
    }

    fn spawn(&mut self, center: GeoPoint, radius_km: f64, now: DateTime<Utc>) -> SimulatedEntity {
        let bearing = self.rng.random_range(0.0..360.0);
        let distance = self.rng.random_range(
            SPAWN_MIN_RADIUS_FACTOR * radius_km..=SPAWN_MAX_RADIUS_FACTOR * radius_km,
        );
        let position = offset_point(center, bearing, distance);

        let altitude_m = self.rng.random_range(3000.0..=12000.0);
        let speed_mps = self.rng.random_range(200.0..=300.0);
        let heading_deg = self.rng.random_range(0.0..360.0);
        let vertical_rate_mps = self.rng.random_range(-5.0..=5.0);

        let id = self.unique_id();
        let label = self.callsign();

        let record = PositionRecord::new(&id, now)
            .with_label(Some(label))
            .with_origin(Some(ORIGIN))
            .with_position(Some(position))
            .with_altitude_m(Some(altitude_m))
            .with_speed_mps(Some(speed_mps))
            .with_heading_deg(Some(heading_deg))
            .with_vertical_rate_mps(Some(vertical_rate_mps));

        SimulatedEntity {
            record,
            position,
            heading_deg,
            speed_mps,
        }
    }

    /// Six lowercase hex digits not used by any live aircraft.
    fn unique_id(&mut self) -> String {
        loop {
            let id = format!("{:06x}", self.rng.random_range(0..0x100_0000u32));
            if !self.entities.iter().any(|e| e.record.id == id) {
                return id;
            }
        }
    }

    fn callsign(&mut self) -> String {
        let airline = AIRLINES.choose(&mut self.rng).copied().unwrap_or("SWR");
        let number = self.rng.random_range(100..=9999u32);
        format!("{}{}", airline, number)
    }
}
