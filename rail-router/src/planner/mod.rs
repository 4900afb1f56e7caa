//! Route planning over the station graph.
//!
//! [`search`] runs Dijkstra's algorithm with great-circle distances as edge
//! weights, [`render`] turns the resulting path into display names, and
//! [`RoutePlanner`] ties name resolution, graph building and search together
//! for a single query.

mod error;
mod plan;
mod route;
mod search;

pub use error::RouteError;
pub use plan::{PlanOutcome, RoutePlanner, RouteQuery};
pub use route::{Route, RouteStop, render};
pub use search::{Path, SearchError, search};
