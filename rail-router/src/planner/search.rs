//! Shortest-path search.
//!
//! Dijkstra's algorithm over the station graph with a binary min-heap keyed
//! by cumulative distance.
//!
//! The heap uses lazy deletion: when a shorter distance to a station is
//! found, a new entry is pushed and the old one is left in place. Entries
//! for already-visited stations are skipped when popped. Several entries per
//! station is expected and cheaper than an indexed decrease-key heap.
//!
//! Entries with equal distance pop in ascending [`StationId`] order, so
//! results are reproducible when several shortest paths exist.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use crate::domain::StationId;
use crate::graph::Graph;

/// Error from path search.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SearchError {
    /// The destination cannot be reached from the origin
    #[error("no route between {from} and {to}")]
    PathNotFound { from: StationId, to: StationId },

    /// Search was cancelled
    #[error("search cancelled")]
    Cancelled,
}

/// A route through the graph: stations from origin to destination inclusive.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Path {
    pub stations: Vec<StationId>,
    /// Sum of the traversed edge weights, in kilometres.
    pub distance_km: f64,
}

impl Path {
    /// The single-station path.
    pub fn trivial(station: StationId) -> Self {
        Self {
            stations: vec![station],
            distance_km: 0.0,
        }
    }
}

/// Heap entry. Ordered so that `BinaryHeap` pops the smallest distance first.
#[derive(Debug)]
struct QueueEntry {
    distance: f64,
    station: StationId,
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Flipped on both keys: shorter distance first, then smaller id.
        other
            .distance
            .total_cmp(&self.distance)
            .then_with(|| other.station.cmp(&self.station))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueueEntry {}

/// Find the shortest path between two stations.
///
/// Both stations must be nodes of `graph`; a station that is not (unknown,
/// or excluded for lack of coordinates) cannot be reached and yields
/// [`SearchError::PathNotFound`]. The token is checked before every heap pop.
pub fn search(
    graph: &Graph,
    origin: &StationId,
    destination: &StationId,
    cancel: &CancellationToken,
) -> Result<Path, SearchError> {
    let not_found = || SearchError::PathNotFound {
        from: origin.clone(),
        to: destination.clone(),
    };

    if !graph.contains(origin) || !graph.contains(destination) {
        return Err(not_found());
    }

    if origin == destination {
        return Ok(Path::trivial(origin.clone()));
    }

    let mut best: HashMap<StationId, f64> = HashMap::new();
    let mut previous: HashMap<StationId, StationId> = HashMap::new();
    let mut visited: HashSet<StationId> = HashSet::new();
    let mut heap = BinaryHeap::new();

    best.insert(origin.clone(), 0.0);
    heap.push(QueueEntry {
        distance: 0.0,
        station: origin.clone(),
    });

    while let Some(QueueEntry { distance, station }) = heap.pop() {
        if cancel.is_cancelled() {
            return Err(SearchError::Cancelled);
        }

        if !visited.insert(station.clone()) {
            trace!(station = %station, distance, "Skipping stale queue entry");
            continue;
        }

        if &station == destination {
            let stations = reconstruct(&previous, origin, station);
            debug!(
                hops = stations.len() - 1,
                distance_km = distance,
                visited = visited.len(),
                "Shortest path found"
            );
            return Ok(Path {
                stations,
                distance_km: distance,
            });
        }

        for edge in graph.neighbors(&station) {
            if visited.contains(&edge.to) {
                continue;
            }

            let candidate = distance + edge.distance_km;
            let improves = best
                .get(&edge.to)
                .is_none_or(|&known| candidate < known);

            if improves {
                best.insert(edge.to.clone(), candidate);
                previous.insert(edge.to.clone(), station.clone());
                heap.push(QueueEntry {
                    distance: candidate,
                    station: edge.to.clone(),
                });
            }
        }
    }

    debug!(
        from = %origin,
        to = %destination,
        visited = visited.len(),
        "Destination unreachable"
    );
    Err(not_found())
}

/// Walk the predecessor chain back from `end` to `origin`.
fn reconstruct(
    previous: &HashMap<StationId, StationId>,
    origin: &StationId,
    end: StationId,
) -> Vec<StationId> {
    let mut stations = vec![end];
    while let Some(last) = stations.last() {
        if last == origin {
            break;
        }
        match previous.get(last) {
            Some(prev) => stations.push(prev.clone()),
            None => break,
        }
    }
    stations.reverse();
    stations
}
