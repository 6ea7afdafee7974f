//! Aircraft data-source abstraction
//!
//! This module provides the [`TrafficSource`] trait and one implementation
//! per upstream provider. Each adapter translates its provider's payload
//! into normalized [`PositionRecord`]s and filters radius queries by true
//! distance before returning them.
//!
//! | Source          | Auth              | Radius query            |
//! |-----------------|-------------------|-------------------------|
//! | OpenSky Network | optional basic    | bounding box + filter   |
//! | ADS-B Exchange  | RapidAPI key      | native radius + filter  |
//! | AirLabs         | API key           | native radius + filter  |
//! | AviationStack   | access key        | active flights + filter |
//! | FlightRadar24   | API key           | bounding box + filter   |
//! | FlightAware     | basic (user, key) | native radius + filter  |
//! | Simulated       | none              | simulator tick          |
//!
//! # Factory Pattern
//!
//! ```ignore
//! use skyradar::source::{SourceConfig, SourceFactory};
//!
//! let source = SourceFactory::default().create(&SourceConfig::opensky(None))?;
//! let nearby = source.fetch_in_radius(center, 10.0)?;
//! ```
//!
//! [`PositionRecord`]: crate::record::PositionRecord

mod adsbexchange;
mod airlabs;
mod aviationstack;
mod factory;
mod fields;
mod flightaware;
mod flightradar24;
mod http;
mod lookup;
mod opensky;
mod types;

pub use adsbexchange::AdsbExchangeSource;
pub use airlabs::AirLabsSource;
pub use aviationstack::AviationStackSource;
pub use factory::{SourceConfig, SourceFactory};
pub use flightaware::{FlightAwareCredentials, FlightAwareSource};
pub use flightradar24::FlightRadar24Source;
pub use http::{HttpClient, HttpRequest, ReqwestClient, DEFAULT_TIMEOUT};
pub use lookup::first_hit;
pub use opensky::{OpenSkyCredentials, OpenSkySource};
pub use types::{SourceError, TrafficSource};

pub use crate::simulator::SimulatedSource;

#[cfg(test)]
pub use http::tests::MockHttpClient;
