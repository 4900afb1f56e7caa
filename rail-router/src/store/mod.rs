//! Read-only access to station and connection records.
//!
//! The router never writes to the data store. Populating it (ETL, schema
//! management) is someone else's job; this module only defines the boundary
//! and a few concrete readers.

mod client;
mod error;
mod file;
mod memory;

use std::future::Future;

use crate::domain::{ConnectionRecord, StationRecord};

pub use client::{HttpStore, HttpStoreConfig};
pub use error::StoreError;
pub use file::FileStore;
pub use memory::MemoryStore;

/// Source of station and connection records.
///
/// Records are returned in the store's iteration order, which is the order
/// used for ambiguous name matches.
pub trait StationStore: Send + Sync {
    /// List every station, including those with unusable coordinates.
    fn list_stations(
        &self,
    ) -> impl Future<Output = Result<Vec<StationRecord>, StoreError>> + Send;

    /// List every direct connection.
    fn list_connections(
        &self,
    ) -> impl Future<Output = Result<Vec<ConnectionRecord>, StoreError>> + Send;
}

/// The store implementations selectable from configuration.
#[derive(Debug, Clone)]
pub enum StoreBackend {
    Memory(MemoryStore),
    File(FileStore),
    Http(HttpStore),
}

impl StationStore for StoreBackend {
    async fn list_stations(&self) -> Result<Vec<StationRecord>, StoreError> {
        match self {
            StoreBackend::Memory(store) => store.list_stations().await,
            StoreBackend::File(store) => store.list_stations().await,
            StoreBackend::Http(store) => store.list_stations().await,
        }
    }

    async fn list_connections(&self) -> Result<Vec<ConnectionRecord>, StoreError> {
        match self {
            StoreBackend::Memory(store) => store.list_connections().await,
            StoreBackend::File(store) => store.list_connections().await,
            StoreBackend::Http(store) => store.list_connections().await,
        }
    }
}

impl From<MemoryStore> for StoreBackend {
    fn from(store: MemoryStore) -> Self {
        StoreBackend::Memory(store)
    }
}

impl From<FileStore> for StoreBackend {
    fn from(store: FileStore) -> Self {
        StoreBackend::File(store)
    }
}

impl From<HttpStore> for StoreBackend {
    fn from(store: HttpStore) -> Self {
        StoreBackend::Http(store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn backend_dispatches_to_memory_store() {
        let store = MemoryStore::new(
            vec![StationRecord::new("A", "Paris", Some("48.8566,2.3522"))],
            vec![ConnectionRecord::new("A", "B")],
        );
        let backend = StoreBackend::from(store);

        let stations = backend.list_stations().await.unwrap();
        assert_eq!(stations.len(), 1);
        assert_eq!(stations[0].name, "Paris");

        let connections = backend.list_connections().await.unwrap();
        assert_eq!(connections, vec![ConnectionRecord::new("A", "B")]);
    }
}
