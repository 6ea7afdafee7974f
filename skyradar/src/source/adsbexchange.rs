//! ADS-B Exchange data source (via RapidAPI).
//!
//! # API Endpoints
//!
//! - Radius query: `https://adsbexchange-com1.p.rapidapi.com/v2/lat/lon/dist?lat=..&lon=..&dist=..`
//! - Callsign lookup: `https://adsbexchange-com1.p.rapidapi.com/v2/callsign?q=..`
//!
//! Every request carries the `X-RapidAPI-Key` and `X-RapidAPI-Host` headers.
//! Aircraft are returned in an `ac` array using aviation units: altitude in
//! feet (or the string `"ground"`), ground speed in knots and barometric
//! rate in feet per minute. `seen` is the age of the report in seconds.

use chrono::{DateTime, Utc};
use serde_json::Value;

use super::fields::{number, text};
use super::{HttpClient, HttpRequest, SourceError, TrafficSource};
use crate::geo::GeoPoint;
use crate::record::{normalize_label, units, PositionRecord};
use crate::region::Region;

const BASE_URL: &str = "https://adsbexchange-com1.p.rapidapi.com/v2";
const RAPIDAPI_HOST: &str = "adsbexchange-com1.p.rapidapi.com";

/// ADS-B Exchange source.
pub struct AdsbExchangeSource<C: HttpClient> {
    http_client: C,
    api_key: String,
}

impl<C: HttpClient> AdsbExchangeSource<C> {
    /// Creates a new source with a RapidAPI key.
    ///
    /// # Arguments
    ///
    /// * `http_client` - HTTP client for making requests
    /// * `api_key` - RapidAPI key subscribed to the ADS-B Exchange API
    pub fn new(http_client: C, api_key: impl Into<String>) -> Self {
        Self {
            http_client,
            api_key: api_key.into(),
        }
    }

    fn request(&self, endpoint: &str) -> HttpRequest {
        HttpRequest::get(format!("{}/{}", BASE_URL, endpoint))
            .header("X-RapidAPI-Key", self.api_key.clone())
            .header("X-RapidAPI-Host", RAPIDAPI_HOST)
    }

    fn fetch(&self, request: &HttpRequest) -> Result<Vec<PositionRecord>, SourceError> {
        let body = self.http_client.get_json(request).map_err(|e| match e {
            SourceError::Auth { reason, .. } => SourceError::Auth {
                source_name: self.name().to_string(),
                reason,
            },
            other => other,
        })?;
        Ok(parse_aircraft(&body, Utc::now()))
    }
}

impl<C: HttpClient> TrafficSource for AdsbExchangeSource<C> {
    fn name(&self) -> &str {
        "ADS-B Exchange"
    }

    fn fetch_in_radius(
        &self,
        center: GeoPoint,
        radius_km: f64,
    ) -> Result<Vec<PositionRecord>, SourceError> {
        let request = self
            .request("lat/lon/dist")
            .query("lat", center.lat)
            .query("lon", center.lon)
            .query("dist", radius_km);

        let records = self.fetch(&request)?;
        Ok(Region::new(center, radius_km).filter(records))
    }

    fn fetch_by_label(&self, label: &str) -> Result<Option<PositionRecord>, SourceError> {
        let request = self.request("callsign").query("q", normalize_label(label));
        let records = self.fetch(&request)?;
        Ok(records.into_iter().next())
    }
}

/// Parses the `ac` array of a response.
pub fn parse_aircraft(body: &Value, now: DateTime<Utc>) -> Vec<PositionRecord> {
    body.get("ac")
        .and_then(Value::as_array)
        .map(|list| list.iter().filter_map(|ac| parse_entry(ac, now)).collect())
        .unwrap_or_default()
}

fn parse_entry(ac: &Value, now: DateTime<Utc>) -> Option<PositionRecord> {
    let id = text(ac, "hex")?;

    // alt_baro is the string "ground" for aircraft on the ground
    let altitude_m = match ac.get("alt_baro") {
        Some(Value::String(s)) if s.eq_ignore_ascii_case("ground") => Some(0.0),
        _ => number(ac, "alt_baro").map(units::feet_to_meters),
    };

    let observed_at = number(ac, "seen")
        .map(|age| units::observed_from_age(now, age))
        .unwrap_or(now);

    Some(
        PositionRecord::new(id, observed_at)
            .with_label(text(ac, "flight"))
            .with_origin(text(ac, "cou"))
            .with_position(GeoPoint::from_parts(number(ac, "lat"), number(ac, "lon")))
            .with_altitude_m(altitude_m)
            .with_speed_mps(number(ac, "gs").map(units::knots_to_mps))
            .with_heading_deg(number(ac, "track"))
            .with_vertical_rate_mps(number(ac, "baro_rate").map(units::fpm_to_mps)),
    )
}
