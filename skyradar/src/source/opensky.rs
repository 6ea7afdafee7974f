//! OpenSky Network data source.
//!
//! Uses the public state-vector endpoint:
//! `https://opensky-network.org/api/states/all?lamin=..&lomin=..&lamax=..&lomax=..`
//!
//! Anonymous access works with a reduced rate limit; registered users can
//! pass basic-auth credentials.
//!
//! # State vectors
//!
//! Each entry of `states` is a positional array. The indices used here:
//!
//! | index | field          | unit |
//! |-------|----------------|------|
//! | 0     | icao24         |      |
//! | 1     | callsign       |      |
//! | 2     | origin_country |      |
//! | 5     | longitude      | deg  |
//! | 6     | latitude       | deg  |
//! | 7     | baro_altitude  | m    |
//! | 9     | velocity       | m/s  |
//! | 10    | true_track     | deg  |
//! | 11    | vertical_rate  | m/s  |

use chrono::{DateTime, Utc};
use serde_json::Value;

use super::fields::{number_at, text_at};
use super::{HttpClient, HttpRequest, SourceError, TrafficSource};
use crate::geo::{BoundingBox, GeoPoint};
use crate::record::{units, PositionRecord};
use crate::region::Region;

const STATES_URL: &str = "https://opensky-network.org/api/states/all";

/// Basic-auth credentials for a registered OpenSky account.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenSkyCredentials {
    pub username: String,
    pub password: String,
}

/// OpenSky Network state-vector source.
pub struct OpenSkySource<C: HttpClient> {
    http_client: C,
    credentials: Option<OpenSkyCredentials>,
}

impl<C: HttpClient> OpenSkySource<C> {
    /// Creates an anonymous OpenSky source.
    pub fn new(http_client: C) -> Self {
        Self {
            http_client,
            credentials: None,
        }
    }

    /// Uses basic-auth credentials for every request.
    pub fn with_credentials(mut self, credentials: Option<OpenSkyCredentials>) -> Self {
        self.credentials = credentials;
        self
    }

    fn request(&self) -> HttpRequest {
        let request = HttpRequest::get(STATES_URL);
        match &self.credentials {
            Some(c) => request.basic_auth(&c.username, &c.password),
            None => request,
        }
    }

    fn fetch_states(&self, request: &HttpRequest) -> Result<Vec<PositionRecord>, SourceError> {
        let body = self.http_client.get_json(request).map_err(|e| match e {
            SourceError::Auth { reason, .. } => SourceError::Auth {
                source_name: self.name().to_string(),
                reason,
            },
            other => other,
        })?;
        Ok(parse_states(&body, Utc::now()))
    }
}

impl<C: HttpClient> TrafficSource for OpenSkySource<C> {
    fn name(&self) -> &str {
        "OpenSky Network"
    }

    fn fetch_in_radius(
        &self,
        center: GeoPoint,
        radius_km: f64,
    ) -> Result<Vec<PositionRecord>, SourceError> {
        let bbox = BoundingBox::around(center, radius_km);
        let request = self
            .request()
            .query("lamin", bbox.lamin)
            .query("lomin", bbox.lomin)
            .query("lamax", bbox.lamax)
            .query("lomax", bbox.lomax);

        let records = self.fetch_states(&request)?;
        Ok(Region::new(center, radius_km).filter(records))
    }

    fn fetch_by_label(&self, label: &str) -> Result<Option<PositionRecord>, SourceError> {
        // No callsign filter on this endpoint, so scan all states
        let records = self.fetch_states(&self.request())?;
        Ok(records.into_iter().find(|r| r.has_label(label)))
    }
}

/// Parses a `states/all` response body.
///
/// `states` may be `null` when nothing is in the box. Entries without an
/// icao24 address are skipped.
pub fn parse_states(body: &Value, now: DateTime<Utc>) -> Vec<PositionRecord> {
    let observed_at = units::observed_from_epoch(body.get("time").and_then(Value::as_i64), now);

    body.get("states")
        .and_then(Value::as_array)
        .map(|states| {
            states
                .iter()
                .filter_map(|state| parse_state(state, observed_at))
                .collect()
        })
        .unwrap_or_default()
}

fn parse_state(state: &Value, observed_at: DateTime<Utc>) -> Option<PositionRecord> {
    let id = text_at(state, 0)?;

    Some(
        PositionRecord::new(id, observed_at)
            .with_label(text_at(state, 1))
            .with_origin(text_at(state, 2))
            .with_position(GeoPoint::from_parts(number_at(state, 6), number_at(state, 5)))
            .with_altitude_m(number_at(state, 7))
            .with_speed_mps(number_at(state, 9))
            .with_heading_deg(number_at(state, 10))
            .with_vertical_rate_mps(number_at(state, 11)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MockHttpClient;
    use serde_json::json;

    fn sample_body() -> Value {
        json!({
            "time": 1_700_000_000,
            "states": [
                ["4b1805", "SWR12   ", "Switzerland", 1_700_000_000, 1_700_000_000,
                 8.55, 47.40, 3000.0, false, 200.0, 90.0, -2.5, null, 3100.0, "1000", false, 0],
                ["3c6444", "DLH4AB  ", "Germany", null, null,
                 null, null, 11000.0, false, 240.0, 180.0, 0.0, null, null, null, false, 0],
                ["4b1806", "", "Switzerland", null, null,
                 12.0, 48.5, 9000.0, false, 230.0, 270.0, 0.0, null, null, null, false, 0],
                [null, "NOID", "Nowhere"]
            ]
        })
    }

    #[test]
    fn test_parse_states() {
        let records = parse_states(&sample_body(), Utc::now());
        assert_eq!(records.len(), 3);

        let swr = &records[0];
        assert_eq!(swr.id, "4b1805");
        assert_eq!(swr.label.as_deref(), Some("SWR12"));
        assert_eq!(swr.origin.as_deref(), Some("Switzerland"));
        assert_eq!(swr.position, Some(GeoPoint::new(47.40, 8.55)));
        assert_eq!(swr.altitude_m, Some(3000.0));
        assert_eq!(swr.speed_mps, Some(200.0));
        assert_eq!(swr.heading_deg, Some(90.0));
        assert_eq!(swr.vertical_rate_mps, Some(-2.5));
        assert_eq!(swr.observed_at.timestamp(), 1_700_000_000);

        // No fix
        assert_eq!(records[1].position, None);
        // Blank callsign
        assert_eq!(records[2].label, None);
    }

    #[test]
    fn test_parse_null_states() {
        let records = parse_states(&json!({"time": 1, "states": null}), Utc::now());
        assert!(records.is_empty());
    }

    #[test]
    fn test_missing_time_falls_back_to_now() {
        let now = Utc::now();
        let body = json!({"states": [["abcdef", "X", "Y", null, null, 8.0, 47.0]]});
        let records = parse_states(&body, now);
        assert_eq!(records[0].observed_at, now);
    }

    #[test]
    fn test_fetch_in_radius_uses_bbox_and_filters_circle() {
        let source = OpenSkySource::new(MockHttpClient::json(sample_body()));
        let center = GeoPoint::new(47.3769, 8.5417);

        let records = source.fetch_in_radius(center, 10.0).unwrap();
        let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["4b1805"]);

        let request = &source.http_client.requests()[0];
        assert_eq!(request.url, STATES_URL);
        let lamin: f64 = request.query_value("lamin").unwrap().parse().unwrap();
        let lamax: f64 = request.query_value("lamax").unwrap().parse().unwrap();
        assert!(lamin < 47.3769 && lamax > 47.3769);
        assert!(request.basic_auth.is_none());
    }

    #[test]
    fn test_credentials_are_sent() {
        let source = OpenSkySource::new(MockHttpClient::json(sample_body())).with_credentials(
            Some(OpenSkyCredentials {
                username: "pilot".to_string(),
                password: "secret".to_string(),
            }),
        );
        source
            .fetch_in_radius(GeoPoint::new(47.0, 8.0), 5.0)
            .unwrap();

        let request = &source.http_client.requests()[0];
        assert_eq!(
            request.basic_auth,
            Some(("pilot".to_string(), "secret".to_string()))
        );
    }

    #[test]
    fn test_fetch_by_label() {
        let source = OpenSkySource::new(MockHttpClient::json(sample_body()));

        let found = source.fetch_by_label("dlh4ab").unwrap();
        assert_eq!(found.map(|r| r.id), Some("3c6444".to_string()));

        let missing = source.fetch_by_label("BAW1").unwrap();
        assert!(missing.is_none());
    }

    #[test]
    fn test_error_is_not_empty_result() {
        let source = OpenSkySource::new(MockHttpClient::error(SourceError::Status {
            status: 503,
            url: STATES_URL.to_string(),
        }));
        assert!(source.fetch_in_radius(GeoPoint::new(47.0, 8.0), 5.0).is_err());
    }

    #[test]
    fn test_auth_error_names_source() {
        let source = OpenSkySource::new(MockHttpClient::error(SourceError::Auth {
            source_name: STATES_URL.to_string(),
            reason: "HTTP 401".to_string(),
        }));

        match source.fetch_by_label("SWR12") {
            Err(SourceError::Auth { source_name, .. }) => assert_eq!(source_name, "OpenSky Network"),
            other => panic!("unexpected {:?}", other),
        }
    }
}
