//! FlightRadar24 data source.
//!
//! # API Endpoints
//!
//! - Live feed: `https://data-live.flightradar24.com/zones/fcgi/feed.js?bounds=..`
//! - Flight detail: `https://data-live.flightradar24.com/clickhandler/?id=..`
//!
//! The feed is an object keyed by FlightRadar24 flight id. Metadata keys
//! (`full_count`, `version`, `stats`) are not arrays and are skipped. Each
//! flight is a positional array:
//!
//! | index | field          | unit   |
//! |-------|----------------|--------|
//! | 0     | icao24         |        |
//! | 1     | latitude       | deg    |
//! | 2     | longitude      | deg    |
//! | 3     | heading        | deg    |
//! | 4     | altitude       | ft     |
//! | 5     | ground speed   | kn     |
//! | 6     | callsign       |        |
//! | 9     | timestamp      | epoch  |
//! | 13    | vertical speed | ft/min |
//!
//! The detail endpoint reports metres, km/h and m/s instead.

use chrono::{DateTime, Utc};
use serde_json::Value;

use super::fields::{integer, number, number_at, text, text_at};
use super::{HttpClient, HttpRequest, SourceError, TrafficSource};
use crate::geo::{BoundingBox, GeoPoint};
use crate::record::{units, PositionRecord};
use crate::region::Region;

const FEED_URL: &str = "https://data-live.flightradar24.com/zones/fcgi/feed.js";
const DETAIL_URL: &str = "https://data-live.flightradar24.com/clickhandler/";

/// Label lookups scan the whole world.
const WORLD_BOUNDS: &str = "-90,90,-180,180";

/// Oldest report the feed should include, in seconds.
const FEED_MAX_AGE_SECS: u32 = 14_400;

/// Feed filters switched on for every query.
const FEED_FLAGS: &[&str] = &[
    "faa", "satellite", "mlat", "flarm", "adsb", "gnd", "air", "vehicles", "estimated", "gliders",
    "stats",
];

/// FlightRadar24 live-feed source.
pub struct FlightRadar24Source<C: HttpClient> {
    http_client: C,
    api_key: String,
}

impl<C: HttpClient> FlightRadar24Source<C> {
    pub fn new(http_client: C, api_key: impl Into<String>) -> Self {
        Self {
            http_client,
            api_key: api_key.into(),
        }
    }

    fn feed_request(&self, bounds: &str) -> HttpRequest {
        let request = HttpRequest::get(FEED_URL).query("bounds", bounds);
        FEED_FLAGS
            .iter()
            .fold(request, |request, flag| request.query(flag, 1))
            .query("maxage", FEED_MAX_AGE_SECS)
            .query("apiKey", &self.api_key)
    }

    fn get_json(&self, request: &HttpRequest) -> Result<Value, SourceError> {
        self.http_client.get_json(request).map_err(|e| match e {
            SourceError::Auth { reason, .. } => SourceError::Auth {
                source_name: self.name().to_string(),
                reason,
            },
            other => other,
        })
    }

    fn fetch_detail(&self, flight_id: &str) -> Result<Option<PositionRecord>, SourceError> {
        let request = HttpRequest::get(DETAIL_URL)
            .query("id", flight_id)
            .query("apiKey", &self.api_key);
        let body = self.get_json(&request)?;
        Ok(parse_detail(&body, Utc::now()))
    }
}

impl<C: HttpClient> TrafficSource for FlightRadar24Source<C> {
    fn name(&self) -> &str {
        "FlightRadar24"
    }

    fn fetch_in_radius(
        &self,
        center: GeoPoint,
        radius_km: f64,
    ) -> Result<Vec<PositionRecord>, SourceError> {
        let bbox = BoundingBox::around(center, radius_km);
        let bounds = format!("{},{},{},{}", bbox.lamin, bbox.lamax, bbox.lomin, bbox.lomax);

        let body = self.get_json(&self.feed_request(&bounds))?;
        let records: Vec<_> = parse_feed(&body, Utc::now())
            .into_iter()
            .map(|(_, record)| record)
            .collect();
        Ok(Region::new(center, radius_km).filter(records))
    }

    fn fetch_by_label(&self, label: &str) -> Result<Option<PositionRecord>, SourceError> {
        let body = self.get_json(&self.feed_request(WORLD_BOUNDS))?;
        let Some((flight_id, summary)) = parse_feed(&body, Utc::now())
            .into_iter()
            .find(|(_, record)| record.has_label(label))
        else {
            return Ok(None);
        };

        // The feed entry stands in when the detail has no aircraft block
        Ok(Some(self.fetch_detail(&flight_id)?.unwrap_or(summary)))
    }
}

/// Parses a `feed.js` body into `(flight id, record)` pairs.
pub fn parse_feed(body: &Value, now: DateTime<Utc>) -> Vec<(String, PositionRecord)> {
    let Some(flights) = body.as_object() else {
        return Vec::new();
    };

    flights
        .iter()
        .filter(|(key, value)| !key.starts_with('_') && value.is_array())
        .filter_map(|(key, value)| Some((key.clone(), parse_feed_entry(value, now)?)))
        .collect()
}

fn parse_feed_entry(entry: &Value, now: DateTime<Utc>) -> Option<PositionRecord> {
    let id = text_at(entry, 0)?;
    let timestamp = number_at(entry, 9).map(|t| t as i64);

    Some(
        PositionRecord::new(id, units::observed_from_epoch(timestamp, now))
            .with_label(text_at(entry, 6))
            .with_position(GeoPoint::from_parts(number_at(entry, 1), number_at(entry, 2)))
            .with_heading_deg(number_at(entry, 3))
            .with_altitude_m(number_at(entry, 4).map(units::feet_to_meters))
            .with_speed_mps(number_at(entry, 5).map(units::knots_to_mps))
            .with_vertical_rate_mps(number_at(entry, 13).map(units::fpm_to_mps)),
    )
}

/// Parses a clickhandler body. `None` without an `aircraft` block or hex id.
pub fn parse_detail(body: &Value, now: DateTime<Utc>) -> Option<PositionRecord> {
    let aircraft = body.get("aircraft").filter(|a| a.is_object())?;
    let id = text(aircraft, "hex")?;
    let nested = |key: &str, field: &str| aircraft.get(key).and_then(|v| number(v, field));

    Some(
        PositionRecord::new(id, units::observed_from_epoch(integer(aircraft, "time"), now))
            .with_label(aircraft.get("identification").and_then(|i| text(i, "callsign")))
            .with_origin(aircraft.get("airline").and_then(|a| text(a, "country")))
            .with_position(GeoPoint::from_parts(
                number(aircraft, "latitude"),
                number(aircraft, "longitude"),
            ))
            .with_altitude_m(nested("altitude", "meters"))
            .with_speed_mps(nested("speed", "kmh").map(units::kmh_to_mps))
            .with_heading_deg(number(aircraft, "heading"))
            .with_vertical_rate_mps(nested("verticalSpeed", "ms")),
    )
}
