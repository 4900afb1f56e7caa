//! In-memory data store.

use std::sync::Arc;

use crate::domain::{ConnectionRecord, StationRecord};

use super::StationStore;
use super::error::StoreError;

/// A data store holding its records in memory.
///
/// Cloning is cheap; clones share the same records.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    stations: Arc<Vec<StationRecord>>,
    connections: Arc<Vec<ConnectionRecord>>,
}

impl MemoryStore {
    /// Create a store from station and connection records.
    pub fn new(stations: Vec<StationRecord>, connections: Vec<ConnectionRecord>) -> Self {
        Self {
            stations: Arc::new(stations),
            connections: Arc::new(connections),
        }
    }
}

impl StationStore for MemoryStore {
    async fn list_stations(&self) -> Result<Vec<StationRecord>, StoreError> {
        Ok(self.stations.as_ref().clone())
    }

    async fn list_connections(&self) -> Result<Vec<ConnectionRecord>, StoreError> {
        Ok(self.connections.as_ref().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn preserves_record_order() {
        let store = MemoryStore::new(
            vec![
                StationRecord::new("B", "Paris Montparnasse", Some("48.8412,2.3203")),
                StationRecord::new("A", "Paris Gare de Lyon", Some("48.8443,2.3743")),
            ],
            vec![],
        );

        let stations = store.list_stations().await.unwrap();
        let ids: Vec<&str> = stations.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["B", "A"]);
        assert!(store.list_connections().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn empty_store() {
        let store = MemoryStore::default();
        assert!(store.list_stations().await.unwrap().is_empty());
        assert!(store.list_connections().await.unwrap().is_empty());
    }
}
