//! Rail route planning server.
//!
//! Resolves free-text station names, builds a distance-weighted graph of
//! direct connections and finds the shortest route between two stations.

pub mod cache;
pub mod config;
pub mod directory;
pub mod domain;
pub mod graph;
pub mod planner;
pub mod store;
pub mod web;
