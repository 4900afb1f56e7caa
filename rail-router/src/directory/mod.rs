//! Station name resolution.
//!
//! Maps a free-text name to a single station. Matching is a plain
//! case-insensitive substring test; there is no scoring or ranking. When
//! several stations match, the caller picks one with [`select`] in a
//! second step, so no console or prompt is assumed here.

mod error;
mod resolve;

pub use error::DirectoryError;
pub use resolve::{Candidate, Resolution, StationDirectory, match_stations, resolve_in, select};
