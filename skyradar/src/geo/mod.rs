//! Geometry kernel
//!
//! Great-circle distance and bearing on a spherical Earth, plus the
//! flat-Earth local offset used for screen placement and simulated motion.
//!
//! The flat-Earth helpers are only valid for offsets that are small compared
//! to the Earth radius (a few hundred kilometres at most).

mod point;

pub use point::{BoundingBox, GeoPoint};

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Kilometres per degree of latitude.
pub const KM_PER_DEG_LAT: f64 = 110.574;

/// Kilometres per degree of longitude at the equator.
pub const KM_PER_DEG_LON_EQUATOR: f64 = 111.320;

/// Great-circle distance between two points in kilometres (haversine).
///
/// Commutative, and exactly zero for identical points.
pub fn distance_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let dlat = (b.lat - a.lat).to_radians();
    let dlon = (b.lon - a.lon).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    // Clamp guards against h creeping past 1.0 for antipodal points
    2.0 * EARTH_RADIUS_KM * h.sqrt().min(1.0).asin()
}

/// Initial bearing (forward azimuth) from `from` to `to` in degrees.
///
/// The result is normalized to `[0, 360)`, clockwise from true north.
pub fn initial_bearing_deg(from: GeoPoint, to: GeoPoint) -> f64 {
    let lat1 = from.lat.to_radians();
    let lat2 = to.lat.to_radians();
    let dlon = (to.lon - from.lon).to_radians();

    let y = dlon.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * dlon.cos();

    normalize_bearing(y.atan2(x).to_degrees())
}

/// Converts a local planar offset in kilometres to a `(dlat, dlon)` delta in degrees.
///
/// # Arguments
///
/// * `center_lat` - Latitude the offset is taken around, in degrees
/// * `d_north_km` - Northward offset (negative is south)
/// * `d_east_km` - Eastward offset (negative is west)
pub fn local_offset_km_to_degrees(center_lat: f64, d_north_km: f64, d_east_km: f64) -> (f64, f64) {
    let dlat = d_north_km / KM_PER_DEG_LAT;
    let dlon = d_east_km / km_per_deg_lon(center_lat);
    (dlat, dlon)
}

/// Moves `origin` by `distance_km` along `bearing_deg` using the local offset.
pub fn offset_point(origin: GeoPoint, bearing_deg: f64, distance_km: f64) -> GeoPoint {
    let bearing = bearing_deg.to_radians();
    let (dlat, dlon) = local_offset_km_to_degrees(
        origin.lat,
        distance_km * bearing.cos(),
        distance_km * bearing.sin(),
    );

    GeoPoint::new(origin.lat + dlat, normalize_longitude(origin.lon + dlon))
}

/// Normalizes a bearing into `[0, 360)`.
pub fn normalize_bearing(deg: f64) -> f64 {
    let b = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if b >= 360.0 {
        0.0
    } else {
        b
    }
}

/// Wraps a longitude into `[-180, 180)`.
pub fn normalize_longitude(lon: f64) -> f64 {
    let wrapped = (lon + 180.0).rem_euclid(360.0) - 180.0;
    if wrapped >= 180.0 {
        -180.0
    } else {
        wrapped
    }
}

/// Length of one degree of longitude at `lat`, never below 1 metre.
fn km_per_deg_lon(lat: f64) -> f64 {
    (KM_PER_DEG_LON_EQUATOR * lat.to_radians().cos()).max(0.001)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ZURICH: GeoPoint = GeoPoint {
        lat: 47.3769,
        lon: 8.5417,
    };
    const GENEVA: GeoPoint = GeoPoint {
        lat: 46.2044,
        lon: 6.1432,
    };

    #[test]
    fn test_distance_zurich_geneva() {
        // Reference geodesic distance is ~224 km
        let d = distance_km(ZURICH, GENEVA);
        assert!((d - 224.0).abs() < 2.0, "got {}", d);
    }

    #[test]
    fn test_distance_identical_points_is_zero() {
        assert_eq!(distance_km(ZURICH, ZURICH), 0.0);
    }

    #[test]
    fn test_distance_one_degree_latitude() {
        let a = GeoPoint::new(0.0, 0.0);
        let b = GeoPoint::new(1.0, 0.0);
        assert!((distance_km(a, b) - 111.195).abs() < 0.01);
    }

    #[test]
    fn test_bearing_cardinal_directions() {
        let origin = GeoPoint::new(0.0, 0.0);
        let north = initial_bearing_deg(origin, GeoPoint::new(1.0, 0.0));
        let east = initial_bearing_deg(origin, GeoPoint::new(0.0, 1.0));
        let south = initial_bearing_deg(origin, GeoPoint::new(-1.0, 0.0));
        let west = initial_bearing_deg(origin, GeoPoint::new(0.0, -1.0));

        assert!(north.abs() < 1e-9);
        assert!((east - 90.0).abs() < 1e-9);
        assert!((south - 180.0).abs() < 1e-9);
        assert!((west - 270.0).abs() < 1e-9);
    }

    #[test]
    fn test_bearing_zurich_to_geneva_is_southwest() {
        let b = initial_bearing_deg(ZURICH, GENEVA);
        assert!(b > 225.0 && b < 250.0, "got {}", b);
    }

    #[test]
    fn test_local_offset_constants() {
        let (dlat, dlon) = local_offset_km_to_degrees(0.0, 110.574, 111.320);
        assert!((dlat - 1.0).abs() < 1e-12);
        assert!((dlon - 1.0).abs() < 1e-12);

        // One degree of longitude is half as long at 60°
        let (_, dlon) = local_offset_km_to_degrees(60.0, 0.0, 55.66);
        assert!((dlon - 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_offset_point_matches_distance_for_short_hops() {
        for bearing in [0.0, 45.0, 90.0, 135.0, 180.0, 225.0, 270.0, 315.0] {
            let moved = offset_point(ZURICH, bearing, 10.0);
            let d = distance_km(ZURICH, moved);
            assert!((d - 10.0).abs() < 0.1, "bearing {}: {}", bearing, d);
            let b = initial_bearing_deg(ZURICH, moved);
            let diff = (b - bearing + 540.0).rem_euclid(360.0) - 180.0;
            assert!(diff.abs() < 1.0, "bearing {}: {}", bearing, b);
        }
    }

    #[test]
    fn test_normalize_bearing() {
        assert_eq!(normalize_bearing(360.0), 0.0);
        assert_eq!(normalize_bearing(-90.0), 270.0);
        assert_eq!(normalize_bearing(725.0), 5.0);
        assert!(normalize_bearing(-1e-15) < 360.0);
    }

    #[test]
    fn test_normalize_longitude() {
        assert_eq!(normalize_longitude(180.0), -180.0);
        assert_eq!(normalize_longitude(190.0), -170.0);
        assert_eq!(normalize_longitude(-190.0), 170.0);
        assert_eq!(normalize_longitude(8.5), 8.5);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        fn point() -> impl Strategy<Value = GeoPoint> {
            (-89.9..89.9_f64, -180.0..180.0_f64).prop_map(|(lat, lon)| GeoPoint::new(lat, lon))
        }

        proptest! {
            #[test]
            fn test_distance_is_symmetric(a in point(), b in point()) {
                let ab = distance_km(a, b);
                let ba = distance_km(b, a);
                prop_assert!((ab - ba).abs() < 1e-9, "{} vs {}", ab, ba);
                prop_assert!(ab >= 0.0);
            }

            #[test]
            fn test_distance_to_self_is_zero(a in point()) {
                prop_assert_eq!(distance_km(a, a), 0.0);
            }

            #[test]
            fn test_bearing_in_range(a in point(), b in point()) {
                prop_assume!(a != b);
                let bearing = initial_bearing_deg(a, b);
                prop_assert!((0.0..360.0).contains(&bearing), "bearing {}", bearing);
            }

            #[test]
            fn test_local_offset_roundtrip(
                lat in -70.0..70.0_f64,
                north in -300.0..300.0_f64,
                east in -300.0..300.0_f64,
            ) {
                let (dlat, dlon) = local_offset_km_to_degrees(lat, north, east);
                let back_north = dlat * KM_PER_DEG_LAT;
                let back_east = dlon * KM_PER_DEG_LON_EQUATOR * lat.to_radians().cos();
                prop_assert!((back_north - north).abs() < 1e-6);
                prop_assert!((back_east - east).abs() < 1e-6);
            }
        }
    }
}
