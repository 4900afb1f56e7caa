//! Data store backed by JSON files on disk.
//!
//! Expects a directory containing `stations.json` (an array of station
//! records) and `connections.json` (an array of connection records).

use std::path::PathBuf;

use serde::de::DeserializeOwned;

use crate::domain::{ConnectionRecord, StationRecord};

use super::StationStore;
use super::error::StoreError;

const STATIONS_FILE: &str = "stations.json";
const CONNECTIONS_FILE: &str = "connections.json";

/// Data store reading JSON exports from a directory.
///
/// Files are re-read on every call, so replacing them on disk takes effect
/// on the next query.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create a store reading from the given directory.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    async fn read_json<T: DeserializeOwned>(&self, file: &str) -> Result<Vec<T>, StoreError> {
        let path = self.dir.join(file);
        let contents = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| StoreError::Io {
                path: path.display().to_string(),
                source: e,
            })?;

        serde_json::from_str(&contents).map_err(|e| StoreError::Json {
            message: format!("{}: {}", path.display(), e),
        })
    }
}

impl StationStore for FileStore {
    async fn list_stations(&self) -> Result<Vec<StationRecord>, StoreError> {
        self.read_json(STATIONS_FILE).await
    }

    async fn list_connections(&self) -> Result<Vec<ConnectionRecord>, StoreError> {
        self.read_json(CONNECTIONS_FILE).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn reads_records_from_directory() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join(STATIONS_FILE),
            r#"[
                {"id": "A", "name": "Paris", "geo_point": "48.8566,2.3522"},
                {"id": "B", "name": "Lyon", "geo_point": "45.7640,4.8357"}
            ]"#,
        )
        .unwrap();
        std::fs::write(
            dir.path().join(CONNECTIONS_FILE),
            r#"[{"origin": "A", "destination": "B"}]"#,
        )
        .unwrap();

        let store = FileStore::new(dir.path());
        let stations = store.list_stations().await.unwrap();
        assert_eq!(stations.len(), 2);
        assert_eq!(stations[1].name, "Lyon");

        let connections = store.list_connections().await.unwrap();
        assert_eq!(connections, vec![ConnectionRecord::new("A", "B")]);
    }

    #[tokio::test]
    async fn missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path());

        let err = store.list_stations().await.unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));
    }

    #[tokio::test]
    async fn malformed_file_is_json_error() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join(CONNECTIONS_FILE), "{not json").unwrap();
        let store = FileStore::new(dir.path());

        let err = store.list_connections().await.unwrap_err();
        assert!(matches!(err, StoreError::Json { .. }));
        assert!(err.to_string().contains(CONNECTIONS_FILE));
    }
}
