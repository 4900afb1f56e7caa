//! Optional caching of built graphs.
//!
//! By default every routing query rebuilds the graph from the data store.
//! A long-running server can instead keep the last built graph for a short
//! TTL. Cached graphs are immutable snapshots shared through `Arc`; a graph
//! is never patched in place. Call [`GraphCache::invalidate_all`] when the
//! data store changes.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;

use crate::graph::Graph;

/// There is a single graph per data store, so the key carries no data.
type GraphKey = ();

/// Configuration for the graph cache.
#[derive(Debug, Clone)]
pub struct GraphCacheConfig {
    /// How long a built graph is reused.
    pub ttl: Duration,
}

impl GraphCacheConfig {
    /// Create a config with the given TTL.
    pub fn new(ttl: Duration) -> Self {
        Self { ttl }
    }
}

impl Default for GraphCacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(300),
        }
    }
}

/// Cache holding the most recently built graph.
///
/// Name lookups always read the live station list, but routing uses the
/// cached graph. A station added to the store therefore resolves by name
/// straight away, yet has no route (`PathNotFound`) until the TTL expires or
/// [`invalidate_all`](Self::invalidate_all) is called.
#[derive(Clone)]
pub struct GraphCache {
    graphs: MokaCache<GraphKey, Arc<Graph>>,
    ttl: Duration,
}

impl GraphCache {
    /// Create a new cache with the given configuration.
    pub fn new(config: &GraphCacheConfig) -> Self {
        let graphs = MokaCache::builder()
            .time_to_live(config.ttl)
            .build();

        Self {
            graphs,
            ttl: config.ttl,
        }
    }

    /// Get the cached graph, if still fresh.
    pub async fn get(&self) -> Option<Arc<Graph>> {
        self.graphs.get(&()).await
    }

    /// Store a freshly built graph.
    pub async fn insert(&self, graph: Arc<Graph>) {
        self.graphs.insert((), graph).await;
    }

    /// Drop the cached graph so the next query rebuilds it.
    pub fn invalidate_all(&self) {
        self.graphs.invalidate_all();
    }
}

impl std::fmt::Debug for GraphCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphCache")
            .field("ttl", &self.ttl)
            .finish()
    }
}
