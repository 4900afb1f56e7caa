//! Station directory error types.

use crate::store::StoreError;

/// Errors from resolving a station name.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    /// The query was empty or whitespace
    #[error("station name query is empty")]
    EmptyQuery,

    /// No station name contains the query
    #[error("no station found matching '{query}'")]
    StationNotFound { query: String },

    /// A disambiguation index outside `1..=count`
    #[error("invalid selection {index}: expected a number between 1 and {count}")]
    InvalidSelection { index: usize, count: usize },

    /// The data store could not supply the station list
    #[error(transparent)]
    Store(#[from] StoreError),
}
