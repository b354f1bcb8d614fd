//! Destination-proximity ordering.
//!
//! When a freshly boarded route station offers several services, the order
//! in which they are offered decides which branches the search explores
//! first. Services heading towards a station near a destination go first.
//! The order never changes which edges are offered.

use std::collections::hash_map::DefaultHasher;
use std::collections::{BTreeSet, HashMap};
use std::hash::{Hash, Hasher};

use moka::sync::Cache;
use tracing::warn;

use crate::domain::{LatLong, StationId};
use crate::graph::Relationship;

const NEAREST_CACHE_CAPACITY: u64 = 10_000;

/// Orders candidate stations by closeness to a destination set.
///
/// Implementations must return a permutation of `0..candidates.len()`,
/// nearest first, and must be deterministic. Candidates with no station
/// (`None`) or no known position go last.
pub trait SortsPositions: Send + Sync {
    fn order(&self, destinations: &BTreeSet<StationId>, candidates: &[Option<StationId>]) -> Vec<usize>;
}

/// Keeps the input order.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSorting;

impl SortsPositions for NoSorting {
    fn order(&self, _destinations: &BTreeSet<StationId>, candidates: &[Option<StationId>]) -> Vec<usize> {
        (0..candidates.len()).collect()
    }
}

/// Orders by great-circle distance from each candidate to its nearest
/// destination.
pub struct StationPositions {
    positions: HashMap<StationId, LatLong>,
    /// (station, destination set fingerprint) -> metres to nearest destination.
    nearest: Cache<(StationId, u64), f64>,
}

impl StationPositions {
    pub fn new(positions: HashMap<StationId, LatLong>) -> Self {
        Self {
            positions,
            nearest: Cache::new(NEAREST_CACHE_CAPACITY),
        }
    }

    /// Distance in metres from `station` to the closest destination with a
    /// known position. `f64::INFINITY` when either side is unknown.
    fn nearest_distance(&self, station: &StationId, destinations: &BTreeSet<StationId>, fingerprint: u64) -> f64 {
        let Some(from) = self.positions.get(station) else {
            return f64::INFINITY;
        };

        self.nearest.get_with((station.clone(), fingerprint), || {
            destinations
                .iter()
                .filter_map(|dest| self.positions.get(dest))
                .map(|to| from.distance_metres(to))
                .fold(f64::INFINITY, f64::min)
        })
    }
}

impl std::fmt::Debug for StationPositions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StationPositions")
            .field("stations", &self.positions.len())
            .field("cached", &self.nearest.entry_count())
            .finish()
    }
}

impl SortsPositions for StationPositions {
    fn order(&self, destinations: &BTreeSet<StationId>, candidates: &[Option<StationId>]) -> Vec<usize> {
        let fingerprint = fingerprint(destinations);

        let mut keyed: Vec<(f64, usize)> = candidates
            .iter()
            .enumerate()
            .map(|(idx, station)| {
                let distance = station
                    .as_ref()
                    .map_or(f64::INFINITY, |s| self.nearest_distance(s, destinations, fingerprint));
                (distance, idx)
            })
            .collect();

        keyed.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        keyed.into_iter().map(|(_, idx)| idx).collect()
    }
}

fn fingerprint(destinations: &BTreeSet<StationId>) -> u64 {
    let mut hasher = DefaultHasher::new();
    destinations.hash(&mut hasher);
    hasher.finish()
}

/// Reorder relationships by the proximity of their towards-station to the
/// destinations.
///
/// A sorter that does not return a permutation is ignored and the input
/// order kept.
pub fn sort_by_towards_station(
    sorter: &dyn SortsPositions,
    destinations: &BTreeSet<StationId>,
    relationships: Vec<Relationship>,
) -> Vec<Relationship> {
    if relationships.len() < 2 {
        return relationships;
    }

    let candidates: Vec<Option<StationId>> = relationships
        .iter()
        .map(|r| r.towards_station_id.clone())
        .collect();
    let order = sorter.order(destinations, &candidates);

    if !is_permutation(&order, relationships.len()) {
        warn!(
            candidates = relationships.len(),
            returned = order.len(),
            "proximity sorter returned an invalid order, keeping input order"
        );
        return relationships;
    }

    let mut slots: Vec<Option<Relationship>> = relationships.into_iter().map(Some).collect();
    order.into_iter().filter_map(|idx| slots[idx].take()).collect()
}

fn is_permutation(order: &[usize], len: usize) -> bool {
    if order.len() != len {
        return false;
    }
    let mut seen = vec![false; len];
    for &idx in order {
        if idx >= len || seen[idx] {
            return false;
        }
        seen[idx] = true;
    }
    true
}
