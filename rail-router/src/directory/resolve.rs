//! Name matching and disambiguation.

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::domain::{StationId, StationRecord};
use crate::store::StationStore;

use super::error::DirectoryError;

/// A station matching a name query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Candidate {
    pub id: StationId,
    pub name: String,
}

impl From<&StationRecord> for Candidate {
    fn from(record: &StationRecord) -> Self {
        Self {
            id: record.id.clone(),
            name: record.name.clone(),
        }
    }
}

/// Outcome of a successful name lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Exactly one station matched.
    Resolved(Candidate),
    /// Several stations matched, in data-store order.
    Ambiguous(Vec<Candidate>),
}

impl Resolution {
    /// All matching candidates; a single element when resolved.
    pub fn candidates(&self) -> &[Candidate] {
        match self {
            Resolution::Resolved(c) => std::slice::from_ref(c),
            Resolution::Ambiguous(cs) => cs,
        }
    }

    /// The unique candidate, if there is one.
    pub fn resolved(&self) -> Option<&Candidate> {
        match self {
            Resolution::Resolved(c) => Some(c),
            Resolution::Ambiguous(_) => None,
        }
    }

    /// Narrow to one candidate with a 1-based choice.
    ///
    /// With no choice, a resolved lookup yields its station and an ambiguous
    /// one stays ambiguous.
    pub fn choose(self, choice: Option<usize>) -> Result<Resolution, DirectoryError> {
        match choice {
            Some(index) => select(self.candidates(), index).map(Resolution::Resolved),
            None => Ok(self),
        }
    }
}

/// Stations whose name contains `query`, ignoring case, in record order.
///
/// The query is matched as given; surrounding spaces are part of it.
pub fn match_stations(records: &[StationRecord], query: &str) -> Vec<Candidate> {
    let needle = query.to_lowercase();
    records
        .iter()
        .filter(|r| r.name.to_lowercase().contains(&needle))
        .map(Candidate::from)
        .collect()
}

/// Resolve a name query against a list of station records.
pub fn resolve_in(records: &[StationRecord], query: &str) -> Result<Resolution, DirectoryError> {
    if query.trim().is_empty() {
        return Err(DirectoryError::EmptyQuery);
    }

    let mut matches = match_stations(records, query);
    debug!(query, matches = matches.len(), "Resolved station name");

    match matches.len() {
        0 => Err(DirectoryError::StationNotFound {
            query: query.to_string(),
        }),
        1 => Ok(Resolution::Resolved(matches.remove(0))),
        _ => Ok(Resolution::Ambiguous(matches)),
    }
}

/// Pick one candidate by its 1-based position.
///
/// # Examples
///
/// ```
/// use rail_router::directory::{Candidate, select};
/// use rail_router::domain::StationId;
///
/// let candidates = vec![
///     Candidate { id: StationId::new("1"), name: "Paris Gare de Lyon".into() },
///     Candidate { id: StationId::new("2"), name: "Paris Montparnasse".into() },
/// ];
/// assert_eq!(select(&candidates, 2).unwrap().name, "Paris Montparnasse");
/// assert!(select(&candidates, 0).is_err());
/// assert!(select(&candidates, 3).is_err());
/// ```
pub fn select(candidates: &[Candidate], index: usize) -> Result<Candidate, DirectoryError> {
    index
        .checked_sub(1)
        .and_then(|i| candidates.get(i))
        .cloned()
        .ok_or(DirectoryError::InvalidSelection {
            index,
            count: candidates.len(),
        })
}

/// Resolves station names against the data store.
#[derive(Debug)]
pub struct StationDirectory<S> {
    store: Arc<S>,
}

impl<S> Clone for StationDirectory<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: StationStore> StationDirectory<S> {
    /// Create a directory backed by the given store.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Resolve a name query to one station or a list of candidates.
    pub async fn resolve(&self, query: &str) -> Result<Resolution, DirectoryError> {
        if query.trim().is_empty() {
            return Err(DirectoryError::EmptyQuery);
        }
        let records = self.store.list_stations().await?;
        resolve_in(&records, query)
    }

    /// Up to `limit` stations matching `query`, for autocompletion.
    ///
    /// Unlike [`resolve`](Self::resolve), no match is not an error.
    pub async fn search(&self, query: &str, limit: usize) -> Result<Vec<Candidate>, DirectoryError> {
        if query.trim().is_empty() {
            return Err(DirectoryError::EmptyQuery);
        }
        let records = self.store.list_stations().await?;
        let mut matches = match_stations(&records, query);
        matches.truncate(limit);
        Ok(matches)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Every returned candidate contains the query, and none is missed
        #[test]
        fn matches_are_exactly_the_containing_names(
            names in prop::collection::vec("[A-Za-z ]{1,12}", 0..10),
            query in "[A-Za-z]{1,3}",
        ) {
            let records: Vec<StationRecord> = names
                .iter()
                .enumerate()
                .map(|(i, n)| StationRecord::new(i.to_string(), n.clone(), None))
                .collect();

            let matched = match_stations(&records, &query);
            let expected: Vec<&str> = names
                .iter()
                .filter(|n| n.to_lowercase().contains(&query.to_lowercase()))
                .map(String::as_str)
                .collect();
            let got: Vec<&str> = matched.iter().map(|c| c.name.as_str()).collect();
            prop_assert_eq!(got, expected);
        }
    }
}
