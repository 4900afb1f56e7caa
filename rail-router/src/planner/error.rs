//! Route planning error types.
//!
//! `RouteError` is what callers of the planner see. Per-record problems in
//! the data (bad coordinates, dangling connections) never show up here:
//! those rows are excluded while the graph is built.

use crate::directory::DirectoryError;
use crate::domain::StationId;
use crate::store::StoreError;

use super::search::SearchError;

/// Errors from planning a route.
#[derive(Debug, thiserror::Error)]
pub enum RouteError {
    /// A station name query was empty
    #[error("station name query is empty")]
    EmptyQuery,

    /// A station name matched nothing
    #[error("no station found matching '{query}'")]
    StationNotFound { query: String },

    /// A disambiguation index was out of range
    #[error("invalid selection {index}: expected a number between 1 and {count}")]
    InvalidSelection { index: usize, count: usize },

    /// The stations are not connected
    #[error("no route between {from} and {to}")]
    PathNotFound { from: StationId, to: StationId },

    /// The data store could not supply records
    #[error("data store unavailable: {0}")]
    DataStoreUnavailable(#[source] StoreError),

    /// A path referenced a station missing from the graph's station table
    #[error("station {0} in path is missing from the station table")]
    UnknownStationInPath(StationId),

    /// The query was cancelled
    #[error("route query cancelled")]
    Cancelled,
}

impl From<StoreError> for RouteError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Cancelled => RouteError::Cancelled,
            other => RouteError::DataStoreUnavailable(other),
        }
    }
}

impl From<DirectoryError> for RouteError {
    fn from(e: DirectoryError) -> Self {
        match e {
            DirectoryError::EmptyQuery => RouteError::EmptyQuery,
            DirectoryError::StationNotFound { query } => RouteError::StationNotFound { query },
            DirectoryError::InvalidSelection { index, count } => {
                RouteError::InvalidSelection { index, count }
            }
            DirectoryError::Store(e) => RouteError::from(e),
        }
    }
}

impl From<SearchError> for RouteError {
    fn from(e: SearchError) -> Self {
        match e {
            SearchError::PathNotFound { from, to } => RouteError::PathNotFound { from, to },
            SearchError::Cancelled => RouteError::Cancelled,
        }
    }
}
