//! Dashboard widgets for the TUI.

mod contact_table;
mod radar_scope;
mod status_bar;

pub use contact_table::{ContactTableWidget, PANEL_WIDTH};
pub use radar_scope::RadarScopeWidget;
pub use status_bar::StatusBarWidget;
