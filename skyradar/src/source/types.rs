//! Data-source trait and error types

use thiserror::Error;

use crate::geo::GeoPoint;
use crate::record::PositionRecord;

/// Errors that can occur while querying a data source.
///
/// An error is always distinct from an empty result: a source that answered
/// successfully with no aircraft returns `Ok(vec![])`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SourceError {
    /// Transport-level failure (connect, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(String),

    /// Non-success HTTP status.
    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    /// Credentials were rejected or are missing.
    #[error("Authentication failed for {source_name}: {reason}")]
    Auth { source_name: String, reason: String },

    /// The response body could not be understood.
    #[error("Invalid response: {0}")]
    Parse(String),

    /// The source cannot perform the requested query.
    #[error("{0}")]
    Unsupported(String),
}

impl From<serde_json::Error> for SourceError {
    fn from(e: serde_json::Error) -> Self {
        SourceError::Parse(e.to_string())
    }
}

/// A provider of aircraft positions.
///
/// Implementations own their endpoint URLs, authentication and unit
/// conversion. Every record they return is already normalized.
pub trait TrafficSource: Send + Sync {
    /// Returns the source's name for logging and display.
    fn name(&self) -> &str;

    /// Fetches the aircraft within `radius_km` of `center`.
    ///
    /// # Arguments
    ///
    /// * `center` - Center of the query circle
    /// * `radius_km` - Query radius in kilometres
    fn fetch_in_radius(
        &self,
        center: GeoPoint,
        radius_km: f64,
    ) -> Result<Vec<PositionRecord>, SourceError>;

    /// Looks up a single aircraft by callsign.
    ///
    /// Returns `Ok(None)` when the source answered but knows no such flight.
    fn fetch_by_label(&self, label: &str) -> Result<Option<PositionRecord>, SourceError>;
}

impl<T: TrafficSource + ?Sized> TrafficSource for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn fetch_in_radius(
        &self,
        center: GeoPoint,
        radius_km: f64,
    ) -> Result<Vec<PositionRecord>, SourceError> {
        (**self).fetch_in_radius(center, radius_km)
    }

    fn fetch_by_label(&self, label: &str) -> Result<Option<PositionRecord>, SourceError> {
        (**self).fetch_by_label(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SourceError::Status {
            status: 503,
            url: "https://example.com".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 503 from https://example.com");

        let err = SourceError::Auth {
            source_name: "OpenSky".to_string(),
            reason: "HTTP 401".to_string(),
        };
        assert!(err.to_string().contains("OpenSky"));
    }

    #[test]
    fn test_json_error_is_parse_error() {
        let err: SourceError = serde_json::from_slice::<serde_json::Value>(b"{oops")
            .unwrap_err()
            .into();
        assert!(matches!(err, SourceError::Parse(_)));
    }
}
