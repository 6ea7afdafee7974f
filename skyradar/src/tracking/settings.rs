//! Validated tracker configuration.

use std::time::Duration;

use thiserror::Error;

use crate::geo::GeoPoint;
use crate::region::Region;
use crate::simulator::{SimulatorConfig, DEFAULT_TARGET_COUNT};

/// Default region radius.
pub const DEFAULT_RADIUS_KM: f64 = 5.0;

/// Default time between polls.
pub const DEFAULT_UPDATE_INTERVAL: Duration = Duration::from_secs(5);

/// Shortest accepted poll interval.
pub const MIN_UPDATE_INTERVAL: Duration = Duration::from_secs(1);

/// Rejected tracker settings.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SettingsError {
    #[error("Latitude {0} is outside [-90, 90]")]
    Latitude(f64),

    #[error("Longitude {0} is outside [-180, 180]")]
    Longitude(f64),

    #[error("Radius must be a positive number of kilometres, got {0}")]
    Radius(f64),

    #[error("Update interval must be at least 1 second, got {0:?}")]
    UpdateInterval(Duration),

    #[error("Simulated aircraft count must be at least 1")]
    TargetCount,
}

/// What to track and how often.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackerSettings {
    pub center: GeoPoint,
    pub radius_km: f64,
    pub update_interval: Duration,
    /// Population of the simulated source.
    pub target_count: usize,
    /// Simulator seed; `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Callsigns to emphasize on the display.
    pub highlight: Vec<String>,
}

impl TrackerSettings {
    /// Settings around `center` with default radius and interval.
    pub fn new(center: GeoPoint) -> Self {
        Self {
            center,
            radius_km: DEFAULT_RADIUS_KM,
            update_interval: DEFAULT_UPDATE_INTERVAL,
            target_count: DEFAULT_TARGET_COUNT,
            seed: None,
            highlight: Vec::new(),
        }
    }

    /// Checks every field, reporting the first problem.
    pub fn validate(&self) -> Result<(), SettingsError> {
        let GeoPoint { lat, lon } = self.center;

        if !(-90.0..=90.0).contains(&lat) {
            return Err(SettingsError::Latitude(lat));
        }
        if !(-180.0..=180.0).contains(&lon) {
            return Err(SettingsError::Longitude(lon));
        }
        if !(self.radius_km.is_finite() && self.radius_km > 0.0) {
            return Err(SettingsError::Radius(self.radius_km));
        }
        if self.update_interval < MIN_UPDATE_INTERVAL {
            return Err(SettingsError::UpdateInterval(self.update_interval));
        }
        if self.target_count == 0 {
            return Err(SettingsError::TargetCount);
        }
        Ok(())
    }

    pub fn region(&self) -> Region {
        Region::new(self.center, self.radius_km)
    }

    pub fn simulator_config(&self) -> SimulatorConfig {
        SimulatorConfig::new(self.target_count).with_seed(self.seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> TrackerSettings {
        TrackerSettings::new(GeoPoint::new(47.3769, 8.5417))
    }

    #[test]
    fn test_defaults_are_valid() {
        let settings = valid();
        assert_eq!(settings.radius_km, 5.0);
        assert_eq!(settings.update_interval, Duration::from_secs(5));
        assert_eq!(settings.target_count, 20);
        assert_eq!(settings.validate(), Ok(()));
    }

    #[test]
    fn test_boundaries_are_inclusive() {
        let mut settings = valid();
        settings.center = GeoPoint::new(-90.0, 180.0);
        settings.update_interval = Duration::from_secs(1);
        settings.target_count = 1;
        assert_eq!(settings.validate(), Ok(()));
    }

    #[test]
    fn test_rejections() {
        let mut s = valid();
        s.center.lat = 90.5;
        assert_eq!(s.validate(), Err(SettingsError::Latitude(90.5)));

        let mut s = valid();
        s.center.lon = -180.1;
        assert_eq!(s.validate(), Err(SettingsError::Longitude(-180.1)));

        let mut s = valid();
        s.center.lat = f64::NAN;
        assert!(matches!(s.validate(), Err(SettingsError::Latitude(_))));

        let mut s = valid();
        s.radius_km = 0.0;
        assert_eq!(s.validate(), Err(SettingsError::Radius(0.0)));

        let mut s = valid();
        s.update_interval = Duration::from_millis(999);
        assert!(matches!(s.validate(), Err(SettingsError::UpdateInterval(_))));

        let mut s = valid();
        s.target_count = 0;
        assert_eq!(s.validate(), Err(SettingsError::TargetCount));
    }

    #[test]
    fn test_simulator_config() {
        let mut settings = valid();
        settings.target_count = 7;
        settings.seed = Some(9);
        assert_eq!(
            settings.simulator_config(),
            SimulatorConfig::new(7).with_seed(Some(9))
        );
    }
}
