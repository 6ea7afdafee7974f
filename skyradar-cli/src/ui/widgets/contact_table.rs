//! Aircraft information panel.
//!
//! One row per visible aircraft, nearest first, as delivered by the
//! tracker snapshot.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};
use skyradar::tracking::TrackingView;

use crate::ui::dashboard::utils::contact_columns;

/// Width of the info panel including borders.
pub const PANEL_WIDTH: u16 = 40;

const HEADERS: [&str; 4] = ["Callsign", "Alt(m)", "Hdg", "Spd(km/h)"];
const COLUMN_WIDTHS: [usize; 4] = [10, 8, 6, 10];

/// Widget listing the visible aircraft.
pub struct ContactTableWidget<'a> {
    view: &'a TrackingView,
}

impl<'a> ContactTableWidget<'a> {
    pub fn new(view: &'a TrackingView) -> Self {
        Self { view }
    }

    fn row(cells: &[String; 4]) -> String {
        cells
            .iter()
            .zip(COLUMN_WIDTHS)
            .map(|(cell, width)| format!("{:<width$}", cell, width = width))
            .collect::<String>()
            .trim_end()
            .to_string()
    }
}

impl Widget for ContactTableWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let header_cells = HEADERS.map(str::to_string);
        let separator = "-".repeat(COLUMN_WIDTHS.iter().sum());

        let mut lines = vec![
            Line::from(Span::styled(
                Self::row(&header_cells),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(separator, Style::default().fg(Color::DarkGray))),
        ];

        for record in &self.view.contacts {
            let style = if self.view.is_highlighted(record) {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            lines.push(Line::from(Span::styled(
                Self::row(&contact_columns(record)),
                style,
            )));
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Aircraft Information ");

        Paragraph::new(lines).block(block).render(area, buf);
    }
}
