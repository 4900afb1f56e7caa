//! Graph construction from data store records.
//!
//! The graph is rebuilt from the full record set for every query; there is
//! no incremental maintenance. Malformed rows are excluded, never defaulted:
//! a station without a usable location is not a node, and a connection
//! touching such a station is not an edge.

use std::collections::HashMap;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::domain::{ConnectionRecord, StationRecord, distance};
use crate::store::{StationStore, StoreError};

use super::network::{BuildStats, Edge, Graph};

/// Loads records from a data store and builds graphs from them.
#[derive(Debug)]
pub struct GraphBuilder<S> {
    store: Arc<S>,
}

impl<S> Clone for GraphBuilder<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: StationStore> GraphBuilder<S> {
    /// Create a builder reading from the given store.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Read all stations and connections and build a fresh graph.
    pub async fn load(&self, cancel: &CancellationToken) -> Result<Graph, StoreError> {
        let (stations, connections) = self.load_records(cancel).await?;
        Ok(build_graph(&stations, &connections))
    }

    /// Read all station and connection records.
    ///
    /// Both lists are read concurrently. Cancellation is honoured while the
    /// store read is in flight.
    pub async fn load_records(
        &self,
        cancel: &CancellationToken,
    ) -> Result<(Vec<StationRecord>, Vec<ConnectionRecord>), StoreError> {
        if cancel.is_cancelled() {
            return Err(StoreError::Cancelled);
        }

        let read = futures::future::try_join(
            self.store.list_stations(),
            self.store.list_connections(),
        );

        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(StoreError::Cancelled),
            records = read => records,
        }
    }

    /// Read only the station records.
    pub async fn load_stations(
        &self,
        cancel: &CancellationToken,
    ) -> Result<Vec<StationRecord>, StoreError> {
        if cancel.is_cancelled() {
            return Err(StoreError::Cancelled);
        }

        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(StoreError::Cancelled),
            stations = self.store.list_stations() => stations,
        }
    }
}

/// Build a graph from station and connection records.
pub fn build_graph(stations: &[StationRecord], connections: &[ConnectionRecord]) -> Graph {
    let mut nodes = HashMap::with_capacity(stations.len());
    let mut stats = BuildStats::default();

    for record in stations {
        match record.to_station() {
            Ok(station) => {
                if nodes.insert(station.id.clone(), station).is_some() {
                    debug!(station = %record.id, "Duplicate station record, keeping the last");
                }
            }
            Err(e) => {
                debug!(
                    station = %record.id,
                    name = %record.name,
                    error = %e,
                    "Excluding station without usable location"
                );
                stats.stations_dropped += 1;
            }
        }
    }
    stats.stations_kept = nodes.len();

    let mut adjacency: HashMap<_, Vec<Edge>> = HashMap::new();

    for conn in connections {
        if conn.is_self_loop() {
            stats.connections_dropped += 1;
            continue;
        }

        let (Some(a), Some(b)) = (nodes.get(&conn.origin), nodes.get(&conn.destination)) else {
            stats.connections_dropped += 1;
            continue;
        };

        let km = distance(a.location, b.location);

        adjacency.entry(a.id.clone()).or_default().push(Edge {
            to: b.id.clone(),
            distance_km: km,
        });
        adjacency.entry(b.id.clone()).or_default().push(Edge {
            to: a.id.clone(),
            distance_km: km,
        });
        stats.connections_kept += 1;
    }

    info!(
        stations = stats.stations_kept,
        stations_dropped = stats.stations_dropped,
        connections = stats.connections_kept,
        connections_dropped = stats.connections_dropped,
        "Built station graph"
    );

    Graph {
        stations: nodes,
        adjacency,
        stats,
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Strategy for small random networks: stations 0..n with valid or
    /// invalid geo points and arbitrary connections between ids 0..n+2.
    fn network() -> impl Strategy<Value = (Vec<StationRecord>, Vec<ConnectionRecord>)> {
        let station = (-90.0f64..=90.0, -180.0f64..=180.0, proptest::bool::weighted(0.8));
        (
            prop::collection::vec(station, 1..12),
            prop::collection::vec((0usize..14, 0usize..14), 0..30),
        )
            .prop_map(|(points, pairs)| {
                let stations = points
                    .iter()
                    .enumerate()
                    .map(|(i, (lat, lon, valid))| {
                        let geo = if *valid {
                            format!("{lat},{lon}")
                        } else {
                            "garbage".to_string()
                        };
                        StationRecord::new(i.to_string(), format!("Station {i}"), Some(geo.as_str()))
                    })
                    .collect();
                let connections = pairs
                    .iter()
                    .map(|(a, b)| ConnectionRecord::new(a.to_string(), b.to_string()))
                    .collect();
                (stations, connections)
            })
    }

    proptest! {
        /// Every adjacency entry has a mirror entry with the same weight
        #[test]
        fn edges_are_symmetric((stations, connections) in network()) {
            let graph = build_graph(&stations, &connections);
            for (from, edges) in &graph.adjacency {
                for edge in edges {
                    let mirrored = graph
                        .neighbors(&edge.to)
                        .iter()
                        .any(|e| &e.to == from && e.distance_km == edge.distance_km);
                    prop_assert!(mirrored);
                }
            }
        }

        /// Edges only join graph nodes, never loop, and are non-negative
        #[test]
        fn edges_join_distinct_nodes((stations, connections) in network()) {
            let graph = build_graph(&stations, &connections);
            for (from, edges) in &graph.adjacency {
                prop_assert!(graph.contains(from));
                for edge in edges {
                    prop_assert!(graph.contains(&edge.to));
                    prop_assert!(&edge.to != from);
                    prop_assert!(edge.distance_km >= 0.0);
                }
            }
        }

        /// Every connection is either kept or dropped
        #[test]
        fn stats_account_for_every_connection((stations, connections) in network()) {
            let graph = build_graph(&stations, &connections);
            let stats = graph.stats();
            prop_assert_eq!(stats.connections_kept + stats.connections_dropped, connections.len());
            prop_assert_eq!(graph.edge_count(), stats.connections_kept);
        }
    }
}
