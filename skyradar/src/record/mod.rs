//! Normalized aircraft position records.
//!
//! Every data source translates its provider-specific payload into a
//! [`PositionRecord`]. Downstream code (region tracking, projection, display)
//! only ever sees records, always in SI units.

pub mod units;

use chrono::{DateTime, Utc};

use crate::geo::GeoPoint;

/// A single aircraft observation.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionRecord {
    /// Lowercase hex transponder address (or provider equivalent).
    pub id: String,
    /// Display callsign.
    pub label: Option<String>,
    /// Provenance such as the registration country.
    pub origin: Option<String>,
    /// Position fix, absent when the provider has none.
    pub position: Option<GeoPoint>,
    pub altitude_m: Option<f64>,
    pub speed_mps: Option<f64>,
    pub heading_deg: Option<f64>,
    pub vertical_rate_mps: Option<f64>,
    /// When the observation was made.
    pub observed_at: DateTime<Utc>,
}

impl PositionRecord {
    /// Create a record with only an identifier and observation time.
    ///
    /// The identifier is trimmed and lowercased.
    pub fn new(id: impl AsRef<str>, observed_at: DateTime<Utc>) -> Self {
        Self {
            id: id.as_ref().trim().to_lowercase(),
            label: None,
            origin: None,
            position: None,
            altitude_m: None,
            speed_mps: None,
            heading_deg: None,
            vertical_rate_mps: None,
            observed_at,
        }
    }

    /// Set the callsign. Blank callsigns are dropped.
    pub fn with_label(mut self, label: Option<impl AsRef<str>>) -> Self {
        self.label = label
            .map(|l| l.as_ref().trim().to_string())
            .filter(|l| !l.is_empty());
        self
    }

    /// Set the origin. Blank values are dropped.
    pub fn with_origin(mut self, origin: Option<impl AsRef<str>>) -> Self {
        self.origin = origin
            .map(|o| o.as_ref().trim().to_string())
            .filter(|o| !o.is_empty());
        self
    }

    pub fn with_position(mut self, position: Option<GeoPoint>) -> Self {
        self.position = position;
        self
    }

    pub fn with_altitude_m(mut self, altitude_m: Option<f64>) -> Self {
        self.altitude_m = altitude_m;
        self
    }

    pub fn with_speed_mps(mut self, speed_mps: Option<f64>) -> Self {
        self.speed_mps = speed_mps;
        self
    }

    pub fn with_heading_deg(mut self, heading_deg: Option<f64>) -> Self {
        self.heading_deg = heading_deg;
        self
    }

    pub fn with_vertical_rate_mps(mut self, vertical_rate_mps: Option<f64>) -> Self {
        self.vertical_rate_mps = vertical_rate_mps;
        self
    }

    /// Callsign if known, otherwise the identifier.
    pub fn display_name(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.id)
    }

    /// Whether this record carries `label`, ignoring case and surrounding whitespace.
    pub fn has_label(&self, label: &str) -> bool {
        let wanted = normalize_label(label);
        !wanted.is_empty()
            && self
                .label
                .as_deref()
                .is_some_and(|l| normalize_label(l) == wanted)
    }

    /// Ground speed in km/h, if known.
    pub fn speed_kmh(&self) -> Option<f64> {
        self.speed_mps.map(units::mps_to_kmh)
    }
}

/// Canonical form used to compare callsigns.
pub fn normalize_label(label: &str) -> String {
    label.trim().to_uppercase()
}
