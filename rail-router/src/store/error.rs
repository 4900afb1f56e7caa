//! Data store error types.

/// Errors that can occur when reading records from the data store.
///
/// Any of these makes the data store unavailable for the current query.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Authentication failed
    #[error("unauthorized: check RAIL_ROUTER_API_KEY")]
    Unauthorized,

    /// Store returned an error status
    #[error("store error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse records
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// Failed to read a local data file
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The read was cancelled before completing
    #[error("data store read cancelled")]
    Cancelled,
}
