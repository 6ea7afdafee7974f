//! AirLabs data source.
//!
//! # API Endpoints
//!
//! - Radius query: `https://airlabs.co/api/v9/flights?lat=..&lng=..&distance=..&api_key=..`
//! - Single flight: `https://airlabs.co/api/v9/flight?flight_icao=..&api_key=..`
//!
//! Flights come back under `response` (an array for `flights`, an object
//! for `flight`). Altitude is reported in feet and speed in knots.

use chrono::{DateTime, Utc};
use serde_json::Value;

use super::fields::{integer, number, text};
use super::lookup::first_hit;
use super::{HttpClient, HttpRequest, SourceError, TrafficSource};
use crate::geo::GeoPoint;
use crate::record::{normalize_label, units, PositionRecord};
use crate::region::Region;

const BASE_URL: &str = "https://airlabs.co/api/v9";

/// Query parameters tried in order for a label lookup.
const LABEL_STRATEGIES: &[&str] = &["flight_icao", "flight_iata"];

/// AirLabs flight tracker source.
pub struct AirLabsSource<C: HttpClient> {
    http_client: C,
    api_key: String,
}

impl<C: HttpClient> AirLabsSource<C> {
    pub fn new(http_client: C, api_key: impl Into<String>) -> Self {
        Self {
            http_client,
            api_key: api_key.into(),
        }
    }

    fn request(&self, endpoint: &str) -> HttpRequest {
        HttpRequest::get(format!("{}/{}", BASE_URL, endpoint)).query("api_key", &self.api_key)
    }

    fn fetch(&self, request: &HttpRequest) -> Result<Value, SourceError> {
        let body = self.http_client.get_json(request)?;

        // AirLabs reports bad keys in the body with a 200 status
        if let Some(error) = body.get("error") {
            let message = text(error, "message").unwrap_or_else(|| error.to_string());
            return Err(SourceError::Auth {
                source_name: self.name().to_string(),
                reason: message,
            });
        }
        Ok(body)
    }
}

impl<C: HttpClient> TrafficSource for AirLabsSource<C> {
    fn name(&self) -> &str {
        "AirLabs"
    }

    fn fetch_in_radius(
        &self,
        center: GeoPoint,
        radius_km: f64,
    ) -> Result<Vec<PositionRecord>, SourceError> {
        // The API takes whole kilometres; round up so the circle filter has
        // the full radius to work with
        let request = self
            .request("flights")
            .query("lat", center.lat)
            .query("lng", center.lon)
            .query("distance", radius_km.ceil().max(1.0) as u32);

        let body = self.fetch(&request)?;
        let now = Utc::now();
        let records = body
            .get("response")
            .and_then(Value::as_array)
            .map(|list| list.iter().filter_map(|f| parse_flight(f, now)).collect::<Vec<_>>())
            .unwrap_or_default();

        Ok(Region::new(center, radius_km).filter(records))
    }

    fn fetch_by_label(&self, label: &str) -> Result<Option<PositionRecord>, SourceError> {
        let code = normalize_label(label);

        first_hit(LABEL_STRATEGIES, |param| {
            let request = self.request("flight").query(param, &code);
            let body = self.fetch(&request)?;
            Ok(body
                .get("response")
                .filter(|r| r.is_object())
                .and_then(|r| parse_flight(r, Utc::now())))
        })
    }
}

/// Parses one flight object.
pub fn parse_flight(flight: &Value, now: DateTime<Utc>) -> Option<PositionRecord> {
    let id = text(flight, "hex")?;
    let label = text(flight, "flight_iata").or_else(|| text(flight, "flight_icao"));
    let observed_at = units::observed_from_epoch(integer(flight, "updated"), now);

    Some(
        PositionRecord::new(id, observed_at)
            .with_label(label)
            .with_origin(text(flight, "flag"))
            .with_position(GeoPoint::from_parts(number(flight, "lat"), number(flight, "lng")))
            .with_altitude_m(number(flight, "alt").map(units::feet_to_meters))
            .with_speed_mps(number(flight, "speed").map(units::knots_to_mps))
            .with_heading_deg(number(flight, "dir"))
            .with_vertical_rate_mps(number(flight, "v_speed").map(units::fpm_to_mps)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MockHttpClient;
    use serde_json::json;

    fn flight_json() -> Value {
        json!({
            "hex": "4B1805", "flag": "CH", "lat": 47.40, "lng": 8.55,
            "alt": 10000, "dir": 270, "speed": 400, "v_speed": 500,
            "flight_icao": "SWR12", "flight_iata": "LX12", "updated": 1_700_000_000
        })
    }

    #[test]
    fn test_parse_flight() {
        let record = parse_flight(&flight_json(), Utc::now()).unwrap();
        assert_eq!(record.id, "4b1805");
        assert_eq!(record.label.as_deref(), Some("LX12"));
        assert_eq!(record.origin.as_deref(), Some("CH"));
        assert!((record.altitude_m.unwrap() - 3048.0).abs() < 1e-9);
        assert!((record.speed_mps.unwrap() - 205.7776).abs() < 1e-9);
        assert!((record.vertical_rate_mps.unwrap() - 2.54).abs() < 1e-9);
        assert_eq!(record.heading_deg, Some(270.0));
        assert_eq!(record.observed_at.timestamp(), 1_700_000_000);
    }

    #[test]
    fn test_fetch_in_radius() {
        let body = json!({"response": [
            flight_json(),
            {"hex": "3c6444", "lat": 50.0, "lng": 8.5},
            {"hex": "3c6445"}
        ]});
        let source = AirLabsSource::new(MockHttpClient::json(body), "k");
        let records = source
            .fetch_in_radius(GeoPoint::new(47.3769, 8.5417), 9.5)
            .unwrap();

        assert_eq!(records.len(), 1);
        let request = &source.http_client.requests()[0];
        assert_eq!(request.query_value("distance"), Some("10"));
        assert_eq!(request.query_value("lng"), Some("8.5417"));
        assert_eq!(request.query_value("api_key"), Some("k"));
    }

    #[test]
    fn test_label_lookup_falls_back_to_iata() {
        let client = MockHttpClient::new(vec![
            Ok(json!({"response": null}).to_string().into_bytes()),
            Ok(json!({"response": flight_json()}).to_string().into_bytes()),
        ]);
        let source = AirLabsSource::new(client, "k");

        let found = source.fetch_by_label("lx12").unwrap();
        assert_eq!(found.map(|r| r.id), Some("4b1805".to_string()));

        let requests = source.http_client.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].query_value("flight_icao"), Some("LX12"));
        assert_eq!(requests[1].query_value("flight_iata"), Some("LX12"));
    }

    #[test]
    fn test_label_lookup_stops_at_first_hit() {
        let client = MockHttpClient::json(json!({"response": flight_json()}));
        let source = AirLabsSource::new(client, "k");

        assert!(source.fetch_by_label("SWR12").unwrap().is_some());
        assert_eq!(source.http_client.requests().len(), 1);
    }

    #[test]
    fn test_error_body_is_auth_error() {
        let client = MockHttpClient::json(
            json!({"error": {"message": "Unknown api_key", "code": "unknown_api_key"}}),
        );
        let source = AirLabsSource::new(client, "bad");

        let result = source.fetch_in_radius(GeoPoint::new(47.0, 8.0), 5.0);
        assert!(matches!(result, Err(SourceError::Auth { .. })));
    }
}
