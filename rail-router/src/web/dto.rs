//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::directory::{Candidate, Resolution};
use crate::planner::{PlanOutcome, Route};

/// Request to search stations by name.
#[derive(Debug, Deserialize)]
pub struct StationSearchRequest {
    /// Name fragment to look for
    pub q: String,

    /// Maximum number of results (capped by server configuration)
    pub limit: Option<usize>,
}

/// A station matching a name query.
#[derive(Debug, Serialize)]
pub struct CandidateResult {
    /// 1-based position, to send back as a `from_choice`/`to_choice`
    pub choice: usize,

    /// Station identifier
    pub id: String,

    /// Display name
    pub name: String,
}

impl CandidateResult {
    /// Number a candidate list from 1.
    pub fn from_candidates(candidates: &[Candidate]) -> Vec<Self> {
        candidates
            .iter()
            .enumerate()
            .map(|(i, c)| CandidateResult {
                choice: i + 1,
                id: c.id.to_string(),
                name: c.name.clone(),
            })
            .collect()
    }
}

/// Response to a station search.
#[derive(Debug, Serialize)]
pub struct StationSearchResponse {
    pub stations: Vec<CandidateResult>,
}

/// Request to plan a route between two station names.
#[derive(Debug, Deserialize)]
pub struct RouteRequest {
    /// Origin station name
    pub from: String,

    /// Destination station name
    pub to: String,

    /// 1-based choice among ambiguous origin candidates
    pub from_choice: Option<usize>,

    /// 1-based choice among ambiguous destination candidates
    pub to_choice: Option<usize>,
}

/// A stop along a route.
#[derive(Debug, Serialize)]
pub struct StopResult {
    pub id: String,
    pub name: String,
}

/// Response to a route request.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RouteResponse {
    /// A route was found
    Found {
        stations: Vec<StopResult>,
        distance_km: f64,
    },

    /// A name matched several stations; choose and ask again
    Ambiguous {
        #[serde(skip_serializing_if = "Option::is_none")]
        origin: Option<Vec<CandidateResult>>,
        #[serde(skip_serializing_if = "Option::is_none")]
        destination: Option<Vec<CandidateResult>>,
    },
}

impl RouteResponse {
    fn found(route: &Route) -> Self {
        RouteResponse::Found {
            stations: route
                .stops
                .iter()
                .map(|s| StopResult {
                    id: s.id.to_string(),
                    name: s.name.clone(),
                })
                .collect(),
            distance_km: route.distance_km,
        }
    }

    fn ambiguous(origin: &Resolution, destination: &Resolution) -> Self {
        let pending = |r: &Resolution| match r {
            Resolution::Resolved(_) => None,
            Resolution::Ambiguous(cs) => Some(CandidateResult::from_candidates(cs)),
        };
        RouteResponse::Ambiguous {
            origin: pending(origin),
            destination: pending(destination),
        }
    }
}

impl From<&PlanOutcome> for RouteResponse {
    fn from(outcome: &PlanOutcome) -> Self {
        match outcome {
            PlanOutcome::Found(route) => RouteResponse::found(route),
            PlanOutcome::NeedsSelection {
                origin,
                destination,
            } => RouteResponse::ambiguous(origin, destination),
        }
    }
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
