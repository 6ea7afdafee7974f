//! Radar scope widget.
//!
//! Layout (north up):
//! ```text
//!               N
//!          ·  ·  ·  ·
//!       ·    ·  ·  3.3km
//!     ·    ·   ✈ SWR12  ·
//!   W ·    ·    +    ·    · E
//!     ·    ·        ·    ·
//!       ·    ·  ·  ·   ·
//!          ·  ·  ·  ·
//!               S
//! ```

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::Widget,
};
use skyradar::radar::{RadarGeometry, ScreenPoint};
use skyradar::tracking::TrackingView;

pub const RING_CHAR: &str = "·";
pub const CENTER_CHAR: &str = "+";
pub const AIRCRAFT_CHAR: &str = "✈";

/// Number of evenly spaced range rings.
pub const RING_COUNT: u32 = 3;

/// Widget drawing range rings, cardinal letters and contacts.
pub struct RadarScopeWidget<'a> {
    view: &'a TrackingView,
}

impl<'a> RadarScopeWidget<'a> {
    pub fn new(view: &'a TrackingView) -> Self {
        Self { view }
    }

    fn put(buf: &mut Buffer, area: Rect, point: ScreenPoint, text: &str, style: Style) {
        let (Ok(x), Ok(y)) = (u16::try_from(point.x), u16::try_from(point.y)) else {
            return;
        };
        if x >= area.width || y >= area.height {
            return;
        }
        buf.set_stringn(
            area.x + x,
            area.y + y,
            text,
            usize::from(area.width - x),
            style,
        );
    }

    fn ring_fraction(ring: u32) -> f64 {
        f64::from(ring) / f64::from(RING_COUNT)
    }
}

impl Widget for RadarScopeWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let geometry = RadarGeometry::fit(area.width, area.height);
        let ring_style = Style::default().fg(Color::Gray);
        let accent = Style::default().fg(Color::Cyan);

        for ring in 1..=RING_COUNT {
            let fraction = Self::ring_fraction(ring);
            for point in geometry.ring_points(fraction) {
                Self::put(buf, area, point, RING_CHAR, ring_style);
            }
        }

        for ring in 1..=RING_COUNT {
            let fraction = Self::ring_fraction(ring);
            let label = format!("{:.1}km", self.view.radius_km * fraction);
            Self::put(buf, area, geometry.ring_label_point(fraction), &label, accent);
        }

        Self::put(buf, area, geometry.center, CENTER_CHAR, accent);
        for (letter, point) in geometry.cardinal_points() {
            Self::put(buf, area, point, &letter.to_string(), accent.add_modifier(Modifier::BOLD));
        }

        for record in &self.view.contacts {
            let Some(point) = geometry.project(Some(self.view.center), record, self.view.radius_km)
            else {
                continue;
            };

            let style = if self.view.is_highlighted(record) {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };

            Self::put(buf, area, point, AIRCRAFT_CHAR, style);
            if self.view.show_info_panel {
                if let Some(label) = &record.label {
                    let label_point = ScreenPoint::new(point.x.saturating_add(1), point.y);
                    Self::put(buf, area, label_point, label, style);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use skyradar::geo::{offset_point, GeoPoint};
    use skyradar::record::PositionRecord;

    const CENTER: GeoPoint = GeoPoint::new(47.3769, 8.5417);

    fn view(contacts: Vec<PositionRecord>, show_info_panel: bool) -> TrackingView {
        TrackingView {
            source_name: "Simulated".to_string(),
            center: CENTER,
            radius_km: 10.0,
            contacts,
            updated_at: None,
            last_error: None,
            show_info_panel,
            highlight: vec!["SWR12".to_string()],
        }
    }

    fn render(view: &TrackingView) -> Buffer {
        let area = Rect::new(0, 0, 80, 30);
        let mut buf = Buffer::empty(area);
        RadarScopeWidget::new(view).render(area, &mut buf);
        buf
    }

    fn contact(label: &str, bearing: f64, km: f64) -> PositionRecord {
        PositionRecord::new(label.to_lowercase(), Utc::now())
            .with_label(Some(label))
            .with_position(Some(offset_point(CENTER, bearing, km)))
    }

    #[test]
    fn test_center_and_cardinals() {
        let buf = render(&view(vec![], true));

        // 80x30 area: center (40, 15), radius 10, cardinals at 11 cells
        assert_eq!(buf[(40, 15)].symbol(), "+");
        assert_eq!(buf[(40, 4)].symbol(), "N");
        assert_eq!(buf[(51, 15)].symbol(), "E");
        assert_eq!(buf[(40, 26)].symbol(), "S");
        assert_eq!(buf[(29, 15)].symbol(), "W");
    }

    #[test]
    fn test_outer_ring_label() {
        let buf = render(&view(vec![], true));

        // Outer ring label starts 45° north-east of center
        let row: String = (47..53).map(|x| buf[(x, 8)].symbol().to_string()).collect();
        assert_eq!(row, "10.0km");
    }

    #[test]
    fn test_contact_with_label_and_highlight() {
        let buf = render(&view(vec![contact("SWR12", 0.0, 5.0)], true));

        let plane = &buf[(40, 10)];
        assert_eq!(plane.symbol(), AIRCRAFT_CHAR);
        assert_eq!(plane.fg, Color::Yellow);

        let label: String = (41..46).map(|x| buf[(x, 10)].symbol().to_string()).collect();
        assert_eq!(label, "SWR12");
    }

    #[test]
    fn test_labels_hidden_without_info_panel() {
        let buf = render(&view(vec![contact("DLH4", 90.0, 5.0)], false));

        assert_eq!(buf[(45, 15)].symbol(), AIRCRAFT_CHAR);
        assert_eq!(buf[(45, 15)].fg, Color::White);
        assert_ne!(buf[(46, 15)].symbol(), "D");
    }

    #[test]
    fn test_far_contact_is_clipped() {
        let mut v = view(vec![contact("SWR12", 90.0, 1.0)], true);
        v.radius_km = 1e-6;
        let buf = render(&v);

        assert!(buf.content.iter().all(|cell| cell.symbol() != AIRCRAFT_CHAR));
    }

    #[test]
    fn test_tiny_area_does_not_panic() {
        let area = Rect::new(0, 0, 3, 2);
        let mut buf = Buffer::empty(area);
        let v = view(vec![contact("SWR12", 45.0, 9.0)], true);
        RadarScopeWidget::new(&v).render(area, &mut buf);
    }
}
