//! Turning a raw path into a displayable route.

use serde::Serialize;

use crate::domain::StationId;
use crate::graph::Graph;

use super::error::RouteError;
use super::search::Path;

/// A station along a route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteStop {
    pub id: StationId,
    pub name: String,
}

/// A route ready for display: stops in travel order plus total distance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    pub stops: Vec<RouteStop>,
    pub distance_km: f64,
}

impl Route {
    /// Display names in travel order.
    pub fn names(&self) -> Vec<&str> {
        self.stops.iter().map(|s| s.name.as_str()).collect()
    }

    /// The first stop.
    pub fn origin(&self) -> Option<&RouteStop> {
        self.stops.first()
    }

    /// The last stop.
    pub fn destination(&self) -> Option<&RouteStop> {
        self.stops.last()
    }
}

/// Map each station of `path` to its display name.
///
/// Fails only if the path names a station the graph does not know, which
/// means the path was not produced by a search over this graph.
pub fn render(path: &Path, graph: &Graph) -> Result<Route, RouteError> {
    let stops = path
        .stations
        .iter()
        .map(|id| {
            graph
                .station(id)
                .map(|station| RouteStop {
                    id: id.clone(),
                    name: station.name.clone(),
                })
                .ok_or_else(|| RouteError::UnknownStationInPath(id.clone()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Route {
        stops,
        distance_km: path.distance_km,
    })
}
