//! Terminal UI for SkyRadar.
//!
//! # Module Structure
//!
//! - `dashboard` - Full-screen radar dashboard
//! - `report` - Plain-text presenter for headless runs
//! - `widgets` - Reusable UI widget components

pub mod dashboard;
pub mod report;
pub mod widgets;

pub use dashboard::Dashboard;
pub use report::ReportPresenter;
