//! Polar projection of aircraft positions onto a character grid.
//!
//! North is up. A contact at the region edge lands on the outer ring, one
//! at the center on the center cell. Everything here is pure.

use crate::geo::{self, GeoPoint};
use crate::record::PositionRecord;

/// Cells kept free between the outer ring and the drawing area edge.
pub const RADAR_MARGIN: i32 = 5;

/// Cardinal labels sit slightly outside the outer ring.
pub const CARDINAL_RADIUS_FACTOR: f64 = 1.1;

/// Range ring label bearing.
pub const RING_LABEL_BEARING_DEG: f64 = 45.0;

/// A cell on the screen grid. `y` grows downwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScreenPoint {
    pub x: i32,
    pub y: i32,
}

impl ScreenPoint {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Projects `record` around `center` onto the screen.
///
/// Returns `None` when the record has no position or no center is known.
/// Contacts outside `radius_km` project outside the outer ring; clipping is
/// up to the caller.
pub fn project(
    center: Option<GeoPoint>,
    record: &PositionRecord,
    radius_km: f64,
    screen_center: ScreenPoint,
    screen_radius_px: f64,
) -> Option<ScreenPoint> {
    let center = center?;
    let position = record.position?;

    let ratio = geo::distance_km(center, position) / radius_km;
    let bearing = geo::initial_bearing_deg(center, position);
    Some(polar_to_screen(screen_center, screen_radius_px * ratio, bearing))
}

/// Recovers `(ratio, bearing_deg)` from a projected cell.
///
/// Inverse of [`project`] up to cell rounding.
pub fn unproject(screen_center: ScreenPoint, screen_radius_px: f64, point: ScreenPoint) -> (f64, f64) {
    let dx = f64::from(point.x) - f64::from(screen_center.x);
    let dy = f64::from(screen_center.y) - f64::from(point.y);

    let ratio = dx.hypot(dy) / screen_radius_px;
    let bearing = geo::normalize_bearing(90.0 - dy.atan2(dx).to_degrees());
    (ratio, bearing)
}

fn polar_to_screen(screen_center: ScreenPoint, distance_px: f64, bearing_deg: f64) -> ScreenPoint {
    let angle = (90.0 - bearing_deg).to_radians();
    // Far contacts pin to the grid edge instead of wrapping
    ScreenPoint {
        x: screen_center
            .x
            .saturating_add((distance_px * angle.cos()).round() as i32),
        y: screen_center
            .y
            .saturating_sub((distance_px * angle.sin()).round() as i32),
    }
}

/// Screen layout of the scope inside a drawing area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadarGeometry {
    pub center: ScreenPoint,
    pub radius: f64,
}

impl RadarGeometry {
    /// Centers the scope in a `width` x `height` area.
    pub fn fit(width: u16, height: u16) -> Self {
        let cx = i32::from(width / 2);
        let cy = i32::from(height / 2);
        let radius = (cx.min(cy) - RADAR_MARGIN).max(1);

        Self {
            center: ScreenPoint::new(cx, cy),
            radius: f64::from(radius),
        }
    }

    /// Projects a record using this geometry.
    pub fn project(
        &self,
        center: Option<GeoPoint>,
        record: &PositionRecord,
        radius_km: f64,
    ) -> Option<ScreenPoint> {
        project(center, record, radius_km, self.center, self.radius)
    }

    /// Cells on the ring at `fraction` of the outer radius, one per degree,
    /// without duplicates.
    pub fn ring_points(&self, fraction: f64) -> Vec<ScreenPoint> {
        let mut points: Vec<ScreenPoint> = Vec::with_capacity(360);
        for deg in 0..360 {
            let point = polar_to_screen(self.center, self.radius * fraction, f64::from(deg));
            if !points.contains(&point) {
                points.push(point);
            }
        }
        points
    }

    /// Label positions for N, E, S and W, in that order.
    pub fn cardinal_points(&self) -> [(char, ScreenPoint); 4] {
        let r = self.radius * CARDINAL_RADIUS_FACTOR;
        [
            ('N', polar_to_screen(self.center, r, 0.0)),
            ('E', polar_to_screen(self.center, r, 90.0)),
            ('S', polar_to_screen(self.center, r, 180.0)),
            ('W', polar_to_screen(self.center, r, 270.0)),
        ]
    }

    /// Where the distance label for the ring at `fraction` goes.
    pub fn ring_label_point(&self, fraction: f64) -> ScreenPoint {
        polar_to_screen(self.center, self.radius * fraction, RING_LABEL_BEARING_DEG)
    }
}
