//! Application state for the web layer.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::planner::RoutePlanner;
use crate::store::StoreBackend;

/// Shared application state.
///
/// Holds no per-query data: every request builds (or borrows from the cache)
/// its own graph snapshot.
#[derive(Clone)]
pub struct AppState {
    /// Route planner over the configured data store
    pub planner: Arc<RoutePlanner<StoreBackend>>,

    /// Maximum number of station search results
    pub search_limit: usize,

    /// Cancelled on shutdown; each request works under a child token
    pub shutdown: CancellationToken,
}

impl AppState {
    /// Create a new app state.
    pub fn new(planner: RoutePlanner<StoreBackend>, search_limit: usize) -> Self {
        Self {
            planner: Arc::new(planner),
            search_limit,
            shutdown: CancellationToken::new(),
        }
    }

    /// Token for a single request, cancelled when the server shuts down.
    pub fn request_token(&self) -> CancellationToken {
        self.shutdown.child_token()
    }
}
