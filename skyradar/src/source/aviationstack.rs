//! AviationStack data source.
//!
//! The `flights` endpoint has no geographic filter, so radius queries fetch
//! a page of active flights and filter by distance locally. Only flights
//! with a `live` block carry a position.
//!
//! Live data units: altitude in feet, speed in knots.

use chrono::{DateTime, Utc};
use serde_json::Value;

use super::fields::{integer, number, text};
use super::lookup::first_hit;
use super::{HttpClient, HttpRequest, SourceError, TrafficSource};
use crate::geo::GeoPoint;
use crate::record::{normalize_label, units, PositionRecord};
use crate::region::Region;

const FLIGHTS_URL: &str = "http://api.aviationstack.com/v1/flights";

/// Maximum page size on the free plan.
const PAGE_LIMIT: u32 = 100;

/// Query parameters tried in order for a label lookup.
const LABEL_STRATEGIES: &[&str] = &["flight_iata", "flight_icao", "flight_number"];

/// AviationStack flight data source.
pub struct AviationStackSource<C: HttpClient> {
    http_client: C,
    access_key: String,
}

impl<C: HttpClient> AviationStackSource<C> {
    pub fn new(http_client: C, access_key: impl Into<String>) -> Self {
        Self {
            http_client,
            access_key: access_key.into(),
        }
    }

    fn fetch(&self, request: HttpRequest) -> Result<Vec<PositionRecord>, SourceError> {
        let request = request.query("access_key", &self.access_key);
        let body = self.http_client.get_json(&request)?;

        if let Some(error) = body.get("error") {
            return Err(SourceError::Auth {
                source_name: self.name().to_string(),
                reason: text(error, "message").unwrap_or_else(|| error.to_string()),
            });
        }

        Ok(parse_flights(&body, Utc::now()))
    }
}

impl<C: HttpClient> TrafficSource for AviationStackSource<C> {
    fn name(&self) -> &str {
        "AviationStack"
    }

    fn fetch_in_radius(
        &self,
        center: GeoPoint,
        radius_km: f64,
    ) -> Result<Vec<PositionRecord>, SourceError> {
        let request = HttpRequest::get(FLIGHTS_URL)
            .query("flight_status", "active")
            .query("limit", PAGE_LIMIT);

        let records = self.fetch(request)?;
        Ok(Region::new(center, radius_km).filter(records))
    }

    fn fetch_by_label(&self, label: &str) -> Result<Option<PositionRecord>, SourceError> {
        let code = normalize_label(label);

        first_hit(LABEL_STRATEGIES, |param| {
            let request = HttpRequest::get(FLIGHTS_URL).query(param, &code);
            Ok(self.fetch(request)?.into_iter().next())
        })
    }
}

/// Parses the `data` array, keeping only flights with live data.
pub fn parse_flights(body: &Value, now: DateTime<Utc>) -> Vec<PositionRecord> {
    body.get("data")
        .and_then(Value::as_array)
        .map(|list| list.iter().filter_map(|f| parse_flight(f, now)).collect())
        .unwrap_or_default()
}

fn parse_flight(entry: &Value, now: DateTime<Utc>) -> Option<PositionRecord> {
    let live = entry.get("live").filter(|l| l.is_object())?;
    let aircraft = entry.get("aircraft").unwrap_or(&Value::Null);
    let flight = entry.get("flight").unwrap_or(&Value::Null);

    // Registration stands in when the transponder address is unknown
    let id = text(aircraft, "icao24").or_else(|| text(aircraft, "registration"))?;
    let label = text(flight, "iata")
        .or_else(|| text(flight, "icao"))
        .or_else(|| text(flight, "number"));
    let origin = entry.get("airline").and_then(|a| text(a, "country_name"));
    let observed_at = units::observed_from_epoch(integer(live, "updated"), now);

    Some(
        PositionRecord::new(id, observed_at)
            .with_label(label)
            .with_origin(origin)
            .with_position(GeoPoint::from_parts(
                number(live, "latitude"),
                number(live, "longitude"),
            ))
            .with_altitude_m(number(live, "altitude").map(units::feet_to_meters))
            .with_speed_mps(number(live, "speed").map(units::knots_to_mps))
            .with_heading_deg(number(live, "direction")),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MockHttpClient;
    use serde_json::json;

    fn live_flight() -> Value {
        json!({
            "flight": {"number": "12", "iata": "LX12", "icao": "SWR12"},
            "airline": {"name": "Swiss", "country_name": "Switzerland"},
            "aircraft": {"registration": "HB-JNA", "icao24": "4B1805"},
            "live": {
                "updated": "1700000000", "latitude": 47.40, "longitude": 8.55,
                "altitude": 10000, "direction": 90, "speed": 400,
                "is_ground": false
            }
        })
    }

    #[test]
    fn test_parse_live_flight() {
        let records = parse_flights(&json!({"data": [live_flight()]}), Utc::now());
        assert_eq!(records.len(), 1);

        let r = &records[0];
        assert_eq!(r.id, "4b1805");
        assert_eq!(r.label.as_deref(), Some("LX12"));
        assert_eq!(r.origin.as_deref(), Some("Switzerland"));
        assert!((r.speed_mps.unwrap() - 205.7776).abs() < 1e-9);
        assert!((r.altitude_m.unwrap() - 3048.0).abs() < 1e-9);
        assert_eq!(r.vertical_rate_mps, None);
        assert_eq!(r.observed_at.timestamp(), 1_700_000_000);
    }

    #[test]
    fn test_flights_without_live_data_are_skipped() {
        let body = json!({"data": [
            {"flight": {"iata": "LX13"}, "aircraft": {"icao24": "4b1806"}, "live": null},
            {"flight": {"iata": "LX14"}, "aircraft": {"icao24": "4b1807"}}
        ]});
        assert!(parse_flights(&body, Utc::now()).is_empty());
    }

    #[test]
    fn test_registration_fallback_id() {
        let body = json!({"data": [{
            "aircraft": {"registration": "HB-JNA", "icao24": null},
            "live": {"latitude": 47.0, "longitude": 8.0}
        }]});
        let records = parse_flights(&body, Utc::now());
        assert_eq!(records[0].id, "hb-jna");
    }

    #[test]
    fn test_fetch_in_radius_filters_locally() {
        let far = json!({
            "aircraft": {"icao24": "abcdef"},
            "live": {"latitude": 40.0, "longitude": -3.0}
        });
        let client = MockHttpClient::json(json!({"data": [live_flight(), far]}));
        let source = AviationStackSource::new(client, "key");

        let records = source
            .fetch_in_radius(GeoPoint::new(47.3769, 8.5417), 10.0)
            .unwrap();
        assert_eq!(records.len(), 1);

        let request = &source.http_client.requests()[0];
        assert_eq!(request.query_value("flight_status"), Some("active"));
        assert_eq!(request.query_value("access_key"), Some("key"));
    }

    #[test]
    fn test_label_lookup_tries_all_strategies_in_order() {
        let client = MockHttpClient::new(vec![
            Ok(json!({"data": []}).to_string().into_bytes()),
            Ok(json!({"data": []}).to_string().into_bytes()),
            Ok(json!({"data": [live_flight()]}).to_string().into_bytes()),
        ]);
        let source = AviationStackSource::new(client, "key");

        let found = source.fetch_by_label("12").unwrap();
        assert!(found.is_some());

        let params: Vec<String> = source
            .http_client
            .requests()
            .iter()
            .map(|r| r.query[0].0.clone())
            .collect();
        assert_eq!(params, vec!["flight_iata", "flight_icao", "flight_number"]);
    }

    #[test]
    fn test_api_error_body() {
        let client = MockHttpClient::json(json!({"error": {"code": "invalid_access_key",
            "message": "You have not supplied a valid API Access Key."}}));
        let source = AviationStackSource::new(client, "bad");
        assert!(matches!(
            source.fetch_by_label("LX12"),
            Err(SourceError::Auth { .. })
        ));
    }
}
