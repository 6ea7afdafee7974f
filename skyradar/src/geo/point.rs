//! Geographic point and query bounding box types.

use std::fmt;

use super::{km_per_deg_lon, KM_PER_DEG_LAT};

/// A WGS-84 position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    /// Latitude in degrees, positive north.
    pub lat: f64,
    /// Longitude in degrees, positive east.
    pub lon: f64,
}

impl GeoPoint {
    /// Create a new point.
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Build a point from optional provider fields.
    ///
    /// A fix is only usable when both coordinates are present and finite;
    /// a partial fix yields `None`.
    pub fn from_parts(lat: Option<f64>, lon: Option<f64>) -> Option<Self> {
        match (lat, lon) {
            (Some(lat), Some(lon)) if lat.is_finite() && lon.is_finite() => {
                Some(Self::new(lat, lon))
            }
            _ => None,
        }
    }

    /// Whether the point lies in the valid WGS-84 range.
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lon)
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}, {:.4}", self.lat, self.lon)
    }
}

/// Latitude/longitude box enclosing a query circle.
///
/// Providers that only support rectangular queries are asked for this box,
/// and the results are then filtered by true distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub lamin: f64,
    pub lamax: f64,
    pub lomin: f64,
    pub lomax: f64,
}

impl BoundingBox {
    /// Box around `center` extending `radius_km` in each direction.
    pub fn around(center: GeoPoint, radius_km: f64) -> Self {
        let lat_diff = radius_km / KM_PER_DEG_LAT;
        let lon_diff = radius_km / km_per_deg_lon(center.lat);

        Self {
            lamin: (center.lat - lat_diff).max(-90.0),
            lamax: (center.lat + lat_diff).min(90.0),
            lomin: (center.lon - lon_diff).max(-180.0),
            lomax: (center.lon + lon_diff).min(180.0),
        }
    }

    /// Whether `point` lies inside the box (edges inclusive).
    pub fn contains(&self, point: GeoPoint) -> bool {
        (self.lamin..=self.lamax).contains(&point.lat)
            && (self.lomin..=self.lomax).contains(&point.lon)
    }
}
