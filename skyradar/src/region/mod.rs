//! Region tracking
//!
//! Holds the set of aircraft currently visible inside one circular region and
//! detects which aircraft arrived or departed between successive polls.
//!
//! # Architecture
//!
//! ```text
//! source poll ──► Region::filter ──► RegionTracker::update ──► ArrivalDeparture
//!                                            │
//!                                            └──► snapshot() (sorted by distance)
//! ```
//!
//! The tracker is owned by the tracking loop and mutated once per poll.
//! Filtering uses true great-circle distance, so providers that answer
//! rectangular queries can hand their raw results straight to `update`.

use std::collections::{BTreeSet, HashMap};

use tracing::debug;

use crate::geo::{distance_km, GeoPoint};
use crate::record::PositionRecord;

/// A circular region of interest.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    pub center: GeoPoint,
    pub radius_km: f64,
}

impl Region {
    pub fn new(center: GeoPoint, radius_km: f64) -> Self {
        Self { center, radius_km }
    }

    /// Distance of the record from the center, if it has a position.
    pub fn distance_to(&self, record: &PositionRecord) -> Option<f64> {
        record.position.map(|p| distance_km(self.center, p))
    }

    /// Whether the record has an identifier and a position no further than
    /// the radius.
    pub fn contains(&self, record: &PositionRecord) -> bool {
        !record.id.is_empty()
            && self
                .distance_to(record)
                .is_some_and(|d| d <= self.radius_km)
    }

    /// Keep only the records inside the region.
    pub fn filter(&self, records: impl IntoIterator<Item = PositionRecord>) -> Vec<PositionRecord> {
        records.into_iter().filter(|r| self.contains(r)).collect()
    }
}

/// Membership changes produced by one [`RegionTracker::update`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArrivalDeparture {
    /// Ids present now but not in the previous poll.
    pub arrived: BTreeSet<String>,
    /// Ids present in the previous poll but not now.
    pub departed: BTreeSet<String>,
    /// Records for `arrived`, in id order.
    pub arrivals: Vec<PositionRecord>,
}

impl ArrivalDeparture {
    /// True when nothing arrived or departed.
    pub fn is_empty(&self) -> bool {
        self.arrived.is_empty() && self.departed.is_empty()
    }
}

/// Currently visible aircraft for one region.
#[derive(Debug, Clone)]
pub struct RegionTracker {
    region: Region,
    current: HashMap<String, PositionRecord>,
    previous_ids: BTreeSet<String>,
}

impl RegionTracker {
    pub fn new(region: Region) -> Self {
        Self {
            region,
            current: HashMap::new(),
            previous_ids: BTreeSet::new(),
        }
    }

    pub fn region(&self) -> &Region {
        &self.region
    }

    /// Replace the visible set with the records of a new poll.
    ///
    /// Records without a position or outside the radius are dropped first.
    /// When an id appears more than once the last record wins.
    pub fn update(&mut self, records: impl IntoIterator<Item = PositionRecord>) -> ArrivalDeparture {
        let mut current = HashMap::new();
        for record in self.region.filter(records) {
            current.insert(record.id.clone(), record);
        }

        let current_ids: BTreeSet<String> = current.keys().cloned().collect();
        let arrived: BTreeSet<String> = current_ids.difference(&self.previous_ids).cloned().collect();
        let departed: BTreeSet<String> = self.previous_ids.difference(&current_ids).cloned().collect();
        let arrivals = arrived
            .iter()
            .filter_map(|id| current.get(id).cloned())
            .collect();

        debug!(
            visible = current_ids.len(),
            arrived = arrived.len(),
            departed = departed.len(),
            "Region updated"
        );

        self.current = current;
        self.previous_ids = current_ids;

        ArrivalDeparture {
            arrived,
            departed,
            arrivals,
        }
    }

    /// Look up a visible aircraft by id.
    pub fn get(&self, id: &str) -> Option<&PositionRecord> {
        self.current.get(id)
    }

    pub fn len(&self) -> usize {
        self.current.len()
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }

    /// Visible aircraft, nearest first (ties broken by id).
    pub fn snapshot(&self) -> Vec<PositionRecord> {
        let mut records: Vec<(f64, &PositionRecord)> = self
            .current
            .values()
            .map(|r| (self.region.distance_to(r).unwrap_or(f64::INFINITY), r))
            .collect();

        records.sort_by(|(da, a), (db, b)| da.total_cmp(db).then_with(|| a.id.cmp(&b.id)));
        records.into_iter().map(|(_, r)| r.clone()).collect()
    }
}
