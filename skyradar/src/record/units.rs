//! Unit conversions from provider units into the SI units of [`PositionRecord`].
//!
//! [`PositionRecord`]: super::PositionRecord

use chrono::{DateTime, Duration, Utc};

/// Metres per foot.
pub const METERS_PER_FOOT: f64 = 0.3048;

/// Metres per second per knot.
pub const MPS_PER_KNOT: f64 = 0.514444;

/// Metres per second per foot-per-minute.
pub const MPS_PER_FPM: f64 = 0.00508;

/// Kilometres per hour per metre-per-second.
pub const KMH_PER_MPS: f64 = 3.6;

pub fn feet_to_meters(feet: f64) -> f64 {
    feet * METERS_PER_FOOT
}

pub fn knots_to_mps(knots: f64) -> f64 {
    knots * MPS_PER_KNOT
}

pub fn fpm_to_mps(fpm: f64) -> f64 {
    fpm * MPS_PER_FPM
}

pub fn kmh_to_mps(kmh: f64) -> f64 {
    kmh / KMH_PER_MPS
}

pub fn mps_to_kmh(mps: f64) -> f64 {
    mps * KMH_PER_MPS
}

/// Observation time for a report that is `age_secs` old at `now`.
///
/// Negative or non-finite ages are treated as zero.
pub fn observed_from_age(now: DateTime<Utc>, age_secs: f64) -> DateTime<Utc> {
    if !age_secs.is_finite() || age_secs <= 0.0 {
        return now;
    }
    now - Duration::milliseconds((age_secs * 1000.0).round() as i64)
}

/// Observation time from an epoch timestamp, falling back to `now`.
///
/// Providers send `0`, `null` or nothing at all when they have no
/// observation time.
pub fn observed_from_epoch(epoch_secs: Option<i64>, now: DateTime<Utc>) -> DateTime<Utc> {
    epoch_secs
        .filter(|secs| *secs > 0)
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .unwrap_or(now)
}
