//! SkyRadar - aircraft tracking and terminal radar projection
//!
//! This library polls live or simulated aircraft feeds, keeps the set of
//! aircraft visible inside a circular region, detects arrivals and
//! departures between polls, and projects the result onto a radar scope.
//!
//! # Module Structure
//!
//! - [`geo`] - Great-circle distance, bearing and flat-Earth offsets
//! - [`record`] - Normalized position records and unit conversions
//! - [`region`] - Region filtering and arrival/departure detection
//! - [`simulator`] - Seeded dead-reckoning traffic simulator
//! - [`radar`] - Polar-to-screen projection and scope layout
//! - [`source`] - Data-source adapters (OpenSky, ADS-B Exchange, ...)
//! - [`tracking`] - The periodic poll/diff/alert/render loop
//! - [`alert`] - Fire-and-forget arrival alerts
//! - [`config`] - INI configuration file handling
//! - [`logging`] - Tracing subscriber setup

pub mod alert;
pub mod config;
pub mod geo;
pub mod logging;
pub mod radar;
pub mod record;
pub mod region;
pub mod simulator;
pub mod source;
pub mod tracking;

/// Library version, taken from the crate manifest.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
