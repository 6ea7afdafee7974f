//! Formatting helpers shared by the dashboard widgets and the text reports.

use chrono::{DateTime, Local, Utc};
use skyradar::record::PositionRecord;
use skyradar::tracking::TrackingView;

/// Placeholder for unknown values.
pub const UNKNOWN: &str = "N/A";

/// Wall-clock time as `HH:MM:SS`.
pub fn format_clock(time: DateTime<Local>) -> String {
    time.format("%H:%M:%S").to_string()
}

/// UTC timestamp shown in local time.
pub fn format_utc_clock(time: DateTime<Utc>) -> String {
    format_clock(time.with_timezone(&Local))
}

/// Callsign, or "Unknown" when the aircraft has none.
pub fn callsign_or_unknown(record: &PositionRecord) -> &str {
    record.label.as_deref().unwrap_or("Unknown")
}

/// Info panel cells: callsign, altitude (m), heading, speed (km/h).
pub fn contact_columns(record: &PositionRecord) -> [String; 4] {
    [
        callsign_or_unknown(record).to_string(),
        record
            .altitude_m
            .map(|a| format!("{:.0}", a))
            .unwrap_or_else(|| UNKNOWN.to_string()),
        record
            .heading_deg
            .map(|h| format!("{:.0}°", h))
            .unwrap_or_else(|| UNKNOWN.to_string()),
        record
            .speed_kmh()
            .map(|s| format!("{:.0}", s))
            .unwrap_or_else(|| UNKNOWN.to_string()),
    ]
}

/// Status bar text without the error suffix.
///
/// `HH:MM:SS | Center: lat, lon | Aircraft: n | Updated: HH:MM:SS`
pub fn status_line(view: &TrackingView, now: DateTime<Local>) -> String {
    let updated = view
        .updated_at
        .map(format_utc_clock)
        .unwrap_or_else(|| "--:--:--".to_string());

    format!(
        "{} | Center: {:.4}, {:.4} | Aircraft: {} | Updated: {}",
        format_clock(now),
        view.center.lat,
        view.center.lon,
        view.contacts.len(),
        updated
    )
}

/// Multi-line summary of one aircraft, as printed for arrivals and lookups.
pub fn record_summary(record: &PositionRecord) -> Vec<String> {
    let mut lines = vec![format!(
        "Aircraft: {} (ICAO: {})",
        callsign_or_unknown(record),
        record.id
    )];

    if let Some(origin) = &record.origin {
        lines.push(format!("Origin: {}", origin));
    }
    if let Some(p) = record.position {
        lines.push(format!("Position: {:.6}, {:.6}", p.lat, p.lon));
    }
    if let Some(alt) = record.altitude_m {
        lines.push(format!("Altitude: {:.1} meters", alt));
    }
    if let Some(hdg) = record.heading_deg {
        lines.push(format!("Heading: {:.1}°", hdg));
    }
    if let Some(speed) = record.speed_kmh() {
        lines.push(format!("Speed: {:.1} km/h", speed));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use skyradar::geo::GeoPoint;

    fn record() -> PositionRecord {
        PositionRecord::new("4B1805", Utc::now())
            .with_label(Some("SWR12"))
            .with_origin(Some("Switzerland"))
            .with_position(Some(GeoPoint::new(47.45, 8.56)))
            .with_altitude_m(Some(3048.0))
            .with_heading_deg(Some(271.4))
            .with_speed_mps(Some(100.0))
    }

    fn view() -> TrackingView {
        TrackingView {
            source_name: "Simulated".to_string(),
            center: GeoPoint::new(47.3769, 8.5417),
            radius_km: 10.0,
            contacts: vec![record()],
            updated_at: None,
            last_error: None,
            show_info_panel: true,
            highlight: Vec::new(),
        }
    }

    #[test]
    fn test_contact_columns() {
        assert_eq!(
            contact_columns(&record()),
            ["SWR12".to_string(), "3048".to_string(), "271°".to_string(), "360".to_string()]
        );

        let bare = PositionRecord::new("abc", Utc::now());
        assert_eq!(
            contact_columns(&bare),
            ["Unknown".to_string(), "N/A".to_string(), "N/A".to_string(), "N/A".to_string()]
        );
    }

    #[test]
    fn test_status_line() {
        let now = Local.with_ymd_and_hms(2024, 5, 1, 13, 4, 5).unwrap();
        assert_eq!(
            status_line(&view(), now),
            "13:04:05 | Center: 47.3769, 8.5417 | Aircraft: 1 | Updated: --:--:--"
        );
    }

    #[test]
    fn test_record_summary() {
        let lines = record_summary(&record());
        assert_eq!(lines[0], "Aircraft: SWR12 (ICAO: 4b1805)");
        assert_eq!(lines[1], "Origin: Switzerland");
        assert_eq!(lines[2], "Position: 47.450000, 8.560000");
        assert_eq!(lines[3], "Altitude: 3048.0 meters");
        assert_eq!(lines[4], "Heading: 271.4°");
        assert_eq!(lines[5], "Speed: 360.0 km/h");
    }

    #[test]
    fn test_record_summary_skips_unknown_fields() {
        let lines = record_summary(&PositionRecord::new("abc123", Utc::now()));
        assert_eq!(lines, vec!["Aircraft: Unknown (ICAO: abc123)"]);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn summary_always_names_the_aircraft(
                id in "[0-9a-f]{6}",
                alt in proptest::option::of(-500.0f64..20000.0),
                hdg in proptest::option::of(0.0f64..360.0),
            ) {
                let record = PositionRecord::new(&id, Utc::now())
                    .with_altitude_m(alt)
                    .with_heading_deg(hdg);

                let lines = record_summary(&record);
                prop_assert_eq!(&lines[0], &format!("Aircraft: Unknown (ICAO: {})", id));
                prop_assert_eq!(lines.len(), 1 + alt.is_some() as usize + hdg.is_some() as usize);
            }
        }
    }
}
