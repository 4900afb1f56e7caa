//! Domain types for the rail router.
//!
//! Stations, connections and coordinates. Validated types enforce their
//! invariants at construction time; raw records from the data store are kept
//! separate so that malformed rows can be excluded rather than defaulted.

mod geo;
mod station;

pub use geo::{EARTH_RADIUS_KM, GeoPoint, InvalidGeoPoint, distance};
pub use station::{ConnectionRecord, Station, StationId, StationRecord};
