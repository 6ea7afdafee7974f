//! Main dashboard rendering.
//!
//! ```text
//! ┌ SkyRadar - OpenSky ─────────────────┐┌ Aircraft Information ──┐
//! │                 N                   ││ Callsign  Alt(m) ...   │
//! │            ·  ·  ·  ·               ││ ------------------     │
//! │        W ·    +    · E              ││ SWR12     3048   ...   │
//! │                 S                   ││                        │
//! └─────────────────────────────────────┘└────────────────────────┘
//! status line
//! help line
//! ```
//!
//! The info panel is only laid out when it is toggled on.

use chrono::{DateTime, Local};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use skyradar::tracking::TrackingView;

use crate::ui::widgets::{ContactTableWidget, RadarScopeWidget, StatusBarWidget, PANEL_WIDTH};

pub const HELP_TEXT: &str = "Press 'q' to quit, 'i' to toggle info panel, 'r' to refresh";

/// Render one dashboard frame.
pub fn render_ui(frame: &mut Frame, view: &TrackingView, now: DateTime<Local>) {
    let size = frame.area();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),    // Radar + info panel
            Constraint::Length(1), // Status
            Constraint::Length(1), // Help
        ])
        .split(size);

    let (radar_area, info_area) = if view.show_info_panel {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(10), Constraint::Length(PANEL_WIDTH)])
            .split(rows[0]);
        (columns[0], Some(columns[1]))
    } else {
        (rows[0], None)
    };

    let radar_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(Span::styled(
            format!(" SkyRadar - {} ", view.source_name),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ));
    let scope_area = radar_block.inner(radar_area);
    frame.render_widget(radar_block, radar_area);
    frame.render_widget(RadarScopeWidget::new(view), scope_area);

    if let Some(area) = info_area {
        frame.render_widget(ContactTableWidget::new(view), area);
    }

    frame.render_widget(StatusBarWidget::new(view, now), rows[1]);
    frame.render_widget(
        Paragraph::new(HELP_TEXT).style(Style::default().fg(Color::DarkGray)),
        rows[2],
    );
}
