//! End-to-end route queries.
//!
//! A query reads the station list once, uses it both to resolve the two
//! names and to build the graph, then searches and renders. Nothing is
//! shared between queries except the optional graph cache, which only ever
//! hands out immutable snapshots.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::cache::GraphCache;
use crate::directory::{Resolution, StationDirectory, resolve_in};
use crate::domain::{StationId, StationRecord};
use crate::graph::{Graph, GraphBuilder, build_graph};
use crate::store::{StationStore, StoreError};

use super::error::RouteError;
use super::route::{Route, render};
use super::search::search;

/// A routing request between two free-text station names.
///
/// Choices are 1-based positions into the candidate lists returned by an
/// earlier ambiguous outcome.
#[derive(Debug, Clone, Default)]
pub struct RouteQuery {
    pub origin: String,
    pub destination: String,
    pub origin_choice: Option<usize>,
    pub destination_choice: Option<usize>,
}

impl RouteQuery {
    /// Create a query with no disambiguation choices.
    pub fn new(origin: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            origin_choice: None,
            destination_choice: None,
        }
    }

    /// Pick an origin candidate by 1-based position.
    pub fn with_origin_choice(mut self, choice: usize) -> Self {
        self.origin_choice = Some(choice);
        self
    }

    /// Pick a destination candidate by 1-based position.
    pub fn with_destination_choice(mut self, choice: usize) -> Self {
        self.destination_choice = Some(choice);
        self
    }
}

/// Result of a route query.
#[derive(Debug, Clone, PartialEq)]
pub enum PlanOutcome {
    /// Both names resolved and a route exists.
    Found(Route),
    /// At least one name matched several stations; the caller must choose
    /// and ask again. Both resolutions are returned so a resolved side need
    /// not be looked up twice by the caller.
    NeedsSelection {
        origin: Resolution,
        destination: Resolution,
    },
}

/// Plans routes over the stations of a data store.
#[derive(Debug)]
pub struct RoutePlanner<S> {
    directory: StationDirectory<S>,
    builder: GraphBuilder<S>,
    cache: Option<GraphCache>,
}

impl<S: StationStore> RoutePlanner<S> {
    /// Create a planner that rebuilds the graph for every query.
    pub fn new(store: Arc<S>) -> Self {
        Self {
            directory: StationDirectory::new(Arc::clone(&store)),
            builder: GraphBuilder::new(store),
            cache: None,
        }
    }

    /// Reuse built graphs through the given cache.
    pub fn with_cache(mut self, cache: GraphCache) -> Self {
        self.cache = Some(cache);
        self
    }

    /// The station directory used for name lookups.
    pub fn directory(&self) -> &StationDirectory<S> {
        &self.directory
    }

    /// The graph cache, if enabled.
    pub fn cache(&self) -> Option<&GraphCache> {
        self.cache.as_ref()
    }

    /// Get a graph, from the cache when enabled and fresh.
    pub async fn graph(&self, cancel: &CancellationToken) -> Result<Arc<Graph>, StoreError> {
        if let Some(graph) = self.cached_graph().await {
            return Ok(graph);
        }

        let graph = Arc::new(self.builder.load(cancel).await?);
        self.remember(&graph).await;
        Ok(graph)
    }

    /// Resolve both names, build the graph and find the shortest route.
    pub async fn plan(
        &self,
        query: &RouteQuery,
        cancel: &CancellationToken,
    ) -> Result<PlanOutcome, RouteError> {
        if query.origin.trim().is_empty() || query.destination.trim().is_empty() {
            return Err(RouteError::EmptyQuery);
        }

        let (stations, graph) = self.snapshot(cancel).await?;

        let origin = resolve_in(&stations, &query.origin)?.choose(query.origin_choice)?;
        let destination =
            resolve_in(&stations, &query.destination)?.choose(query.destination_choice)?;

        let (from, to) = match (origin.resolved(), destination.resolved()) {
            (Some(from), Some(to)) => (from.id.clone(), to.id.clone()),
            _ => {
                debug!(
                    origin_candidates = origin.candidates().len(),
                    destination_candidates = destination.candidates().len(),
                    "Route query needs disambiguation"
                );
                return Ok(PlanOutcome::NeedsSelection {
                    origin,
                    destination,
                });
            }
        };

        let route = route_on(graph, from, to, cancel.clone()).await?;
        Ok(PlanOutcome::Found(route))
    }

    /// Find the shortest route between two already-resolved stations.
    pub async fn route_between(
        &self,
        from: &StationId,
        to: &StationId,
        cancel: &CancellationToken,
    ) -> Result<Route, RouteError> {
        let graph = self.graph(cancel).await?;
        route_on(graph, from.clone(), to.clone(), cancel.clone()).await
    }

    /// The station list and a graph, from a single station read.
    async fn snapshot(
        &self,
        cancel: &CancellationToken,
    ) -> Result<(Vec<StationRecord>, Arc<Graph>), StoreError> {
        if let Some(graph) = self.cached_graph().await {
            let stations = self.builder.load_stations(cancel).await?;
            return Ok((stations, graph));
        }

        let (stations, connections) = self.builder.load_records(cancel).await?;
        let graph = Arc::new(build_graph(&stations, &connections));
        self.remember(&graph).await;
        Ok((stations, graph))
    }

    async fn cached_graph(&self) -> Option<Arc<Graph>> {
        let graph = self.cache.as_ref()?.get().await?;
        debug!("Using cached station graph");
        Some(graph)
    }

    async fn remember(&self, graph: &Arc<Graph>) {
        if let Some(cache) = &self.cache {
            cache.insert(Arc::clone(graph)).await;
        }
    }
}

/// Search and render on a blocking thread, off the async workers.
async fn route_on(
    graph: Arc<Graph>,
    from: StationId,
    to: StationId,
    cancel: CancellationToken,
) -> Result<Route, RouteError> {
    let searched = tokio::task::spawn_blocking(move || -> Result<Route, RouteError> {
        let path = search(&graph, &from, &to, &cancel)?;
        render(&path, &graph)
    })
    .await;

    let route = match searched {
        Ok(route) => route?,
        Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
        Err(_) => return Err(RouteError::Cancelled),
    };

    info!(
        from = route.origin().map_or("", |s| s.id.as_str()),
        to = route.destination().map_or("", |s| s.id.as_str()),
        stops = route.stops.len(),
        distance_km = route.distance_km,
        "Route found"
    );

    Ok(route)
}
