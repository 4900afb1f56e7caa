//! In-memory station graph.
//!
//! Turns raw station and connection records into an undirected graph whose
//! edge weights are great-circle distances in kilometres.

mod build;
mod network;

pub use build::{GraphBuilder, build_graph};
pub use network::{BuildStats, Edge, Graph};
