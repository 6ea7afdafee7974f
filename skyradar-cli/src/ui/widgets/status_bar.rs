//! Single-line status bar below the radar.

use chrono::{DateTime, Local};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use skyradar::tracking::TrackingView;

use crate::ui::dashboard::utils::status_line;

/// Widget showing the clock, center, aircraft count and last update.
///
/// A failed poll appends the error in red until the next success.
pub struct StatusBarWidget<'a> {
    view: &'a TrackingView,
    now: DateTime<Local>,
}

impl<'a> StatusBarWidget<'a> {
    pub fn new(view: &'a TrackingView, now: DateTime<Local>) -> Self {
        Self { view, now }
    }
}

impl Widget for StatusBarWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = vec![Span::styled(
            status_line(self.view, self.now),
            Style::default().fg(Color::White),
        )];

        if let Some(error) = &self.view.last_error {
            spans.push(Span::styled(
                format!(" | Error: {}", error),
                Style::default().fg(Color::Red),
            ));
        }

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}
