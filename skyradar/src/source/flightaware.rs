//! FlightAware FlightXML3 data source.
//!
//! Both queries go through `SearchBirdseyeInFlight` with HTTP basic auth
//! (account name and API key). Radius queries use the `-latlong` search
//! expression, whose radius is in nautical miles.
//!
//! Position units: altitude in feet, groundspeed in knots, vertical speed
//! in feet per minute.

use chrono::{DateTime, Utc};
use serde_json::Value;

use super::fields::{integer, number, text};
use super::{HttpClient, HttpRequest, SourceError, TrafficSource};
use crate::geo::GeoPoint;
use crate::record::{normalize_label, units, PositionRecord};
use crate::region::Region;

const SEARCH_URL: &str = "https://flightxml.flightaware.com/json/FlightXML3/SearchBirdseyeInFlight";

/// Nautical miles per kilometre.
const NM_PER_KM: f64 = 0.539957;

/// Page size for radius queries.
const MAX_RESULTS: u32 = 100;

/// FlightAware account credentials.
#[derive(Debug, Clone, PartialEq)]
pub struct FlightAwareCredentials {
    pub username: String,
    pub api_key: String,
}

/// FlightAware FlightXML3 source.
pub struct FlightAwareSource<C: HttpClient> {
    http_client: C,
    credentials: FlightAwareCredentials,
}

impl<C: HttpClient> FlightAwareSource<C> {
    pub fn new(http_client: C, credentials: FlightAwareCredentials) -> Self {
        Self {
            http_client,
            credentials,
        }
    }

    fn search(&self, request: HttpRequest) -> Result<Vec<PositionRecord>, SourceError> {
        let request = request.basic_auth(&self.credentials.username, &self.credentials.api_key);
        let body = self.http_client.get_json(&request).map_err(|e| match e {
            SourceError::Auth { reason, .. } => SourceError::Auth {
                source_name: self.name().to_string(),
                reason,
            },
            other => other,
        })?;

        if let Some(error) = text(&body, "error") {
            return Err(SourceError::Parse(format!("{}: {}", self.name(), error)));
        }

        Ok(parse_search(&body, Utc::now()))
    }
}

impl<C: HttpClient> TrafficSource for FlightAwareSource<C> {
    fn name(&self) -> &str {
        "FlightAware"
    }

    fn fetch_in_radius(
        &self,
        center: GeoPoint,
        radius_km: f64,
    ) -> Result<Vec<PositionRecord>, SourceError> {
        let expression = format!(
            "-latlong \"{} {} {}\"",
            center.lat,
            center.lon,
            radius_km * NM_PER_KM
        );
        let request = HttpRequest::get(SEARCH_URL)
            .query("query", expression)
            .query("howMany", MAX_RESULTS)
            .query("offset", 0);

        let records = self.search(request)?;
        Ok(Region::new(center, radius_km).filter(records))
    }

    fn fetch_by_label(&self, label: &str) -> Result<Option<PositionRecord>, SourceError> {
        let request = HttpRequest::get(SEARCH_URL)
            .query("ident", normalize_label(label))
            .query("howMany", 1);

        Ok(self.search(request)?.into_iter().next())
    }
}

/// Parses `SearchBirdseyeInFlightResult.aircraft`.
pub fn parse_search(body: &Value, now: DateTime<Utc>) -> Vec<PositionRecord> {
    body.get("SearchBirdseyeInFlightResult")
        .and_then(|result| result.get("aircraft"))
        .and_then(Value::as_array)
        .map(|list| list.iter().filter_map(|a| parse_aircraft(a, now)).collect())
        .unwrap_or_default()
}

fn parse_aircraft(entry: &Value, now: DateTime<Utc>) -> Option<PositionRecord> {
    let id = text(entry, "hex_ident")?;
    let position = entry.get("last_position").unwrap_or(&Value::Null);
    let flight = entry.get("flight").unwrap_or(&Value::Null);

    Some(
        PositionRecord::new(id, units::observed_from_epoch(integer(position, "timestamp"), now))
            .with_label(text(flight, "ident"))
            .with_origin(flight.get("origin").and_then(|o| text(o, "country_name")))
            .with_position(GeoPoint::from_parts(
                number(position, "latitude"),
                number(position, "longitude"),
            ))
            .with_altitude_m(number(position, "altitude").map(units::feet_to_meters))
            .with_speed_mps(number(position, "groundspeed").map(units::knots_to_mps))
            .with_heading_deg(number(position, "heading"))
            .with_vertical_rate_mps(number(position, "vertical_speed").map(units::fpm_to_mps)),
    )
}
