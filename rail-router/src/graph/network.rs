//! The weighted station graph.

use std::collections::HashMap;

use crate::domain::{Station, StationId};

/// A directed adjacency entry. Every connection produces two of these.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub to: StationId,
    /// Great-circle distance in kilometres.
    pub distance_km: f64,
}

/// Counts of what the builder kept and dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildStats {
    pub stations_kept: usize,
    pub stations_dropped: usize,
    pub connections_kept: usize,
    pub connections_dropped: usize,
}

/// Immutable, undirected, distance-weighted station graph.
///
/// Every node has a valid location. Nodes without edges are kept; they can
/// only be the trivial start and end of a route.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    pub(super) stations: HashMap<StationId, Station>,
    pub(super) adjacency: HashMap<StationId, Vec<Edge>>,
    pub(super) stats: BuildStats,
}

impl Graph {
    /// Look up a node.
    pub fn station(&self, id: &StationId) -> Option<&Station> {
        self.stations.get(id)
    }

    /// Returns true if the station is a node of this graph.
    pub fn contains(&self, id: &StationId) -> bool {
        self.stations.contains_key(id)
    }

    /// Adjacency entries of a station, in connection order.
    ///
    /// Returns an empty slice for isolated or unknown stations.
    pub fn neighbors(&self, id: &StationId) -> &[Edge] {
        self.adjacency.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Weight of the lightest direct edge between two stations, if any.
    pub fn edge_weight(&self, from: &StationId, to: &StationId) -> Option<f64> {
        self.neighbors(from)
            .iter()
            .filter(|e| &e.to == to)
            .map(|e| e.distance_km)
            .min_by(f64::total_cmp)
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.stations.len()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum::<usize>() / 2
    }

    /// What the builder kept and dropped.
    pub fn stats(&self) -> &BuildStats {
        &self.stats
    }
}
