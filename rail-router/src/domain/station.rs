//! Station and connection types.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::geo::{GeoPoint, InvalidGeoPoint};

/// Identifier of a station in the source data set (e.g. a UIC code).
///
/// Identifiers are opaque: they are compared, hashed and ordered as strings.
/// The ordering is used to break ties between equal-distance search entries.
///
/// # Examples
///
/// ```
/// use rail_router::domain::StationId;
///
/// let id = StationId::new("87686006");
/// assert_eq!(id.as_str(), "87686006");
/// assert!(StationId::new("A") < StationId::new("B"));
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StationId(String);

impl StationId {
    /// Wrap a raw identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationId({})", self.0)
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StationId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// A station row as supplied by the data store.
///
/// The geo point is kept as the raw string; it is only validated when the
/// graph is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationRecord {
    pub id: StationId,
    pub name: String,
    #[serde(default)]
    pub geo_point: Option<String>,
}

impl StationRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>, geo_point: Option<&str>) -> Self {
        Self {
            id: StationId::new(id),
            name: name.into(),
            geo_point: geo_point.map(str::to_string),
        }
    }

    /// Parse the raw geo point into a validated [`Station`].
    pub fn to_station(&self) -> Result<Station, InvalidGeoPoint> {
        let raw = self.geo_point.as_deref().unwrap_or("");
        let location = GeoPoint::parse(raw)?;
        Ok(Station {
            id: self.id.clone(),
            name: self.name.clone(),
            location,
        })
    }
}

/// A direct, undirected link between two stations as supplied by the data store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionRecord {
    pub origin: StationId,
    pub destination: StationId,
}

impl ConnectionRecord {
    pub fn new(origin: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            origin: StationId::new(origin),
            destination: StationId::new(destination),
        }
    }

    /// Returns true if both ends are the same station.
    pub fn is_self_loop(&self) -> bool {
        self.origin == self.destination
    }
}

/// A station with a validated location, usable as a graph node.
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    pub id: StationId,
    pub name: String,
    pub location: GeoPoint,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn station_id_display_and_debug() {
        let id = StationId::new("87751008");
        assert_eq!(format!("{}", id), "87751008");
        assert_eq!(format!("{:?}", id), "StationId(87751008)");
    }

    #[test]
    fn station_id_ordering_is_lexicographic() {
        let mut ids = vec![
            StationId::new("B"),
            StationId::new("AA"),
            StationId::new("A"),
        ];
        ids.sort();
        assert_eq!(ids, vec!["A".into(), "AA".into(), "B".into()]);
    }

    #[test]
    fn record_to_station() {
        let record = StationRecord::new("A", "Paris", Some("48.8566, 2.3522"));
        let station = record.to_station().unwrap();
        assert_eq!(station.id, StationId::new("A"));
        assert_eq!(station.name, "Paris");
        assert_eq!(station.location.lat(), 48.8566);
    }

    #[test]
    fn record_without_geo_point_is_invalid() {
        let record = StationRecord::new("A", "Paris", None);
        assert!(record.to_station().is_err());

        let record = StationRecord::new("A", "Paris", Some("not-a-point"));
        assert!(record.to_station().is_err());
    }

    #[test]
    fn self_loop_detection() {
        assert!(ConnectionRecord::new("A", "A").is_self_loop());
        assert!(!ConnectionRecord::new("A", "B").is_self_loop());
    }

    #[test]
    fn records_deserialize_from_json() {
        let json = r#"[
            {"id": "A", "name": "Paris", "geo_point": "48.8566,2.3522"},
            {"id": "B", "name": "Nowhere"}
        ]"#;
        let records: Vec<StationRecord> = serde_json::from_str(json).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].geo_point.as_deref(), Some("48.8566,2.3522"));
        assert_eq!(records[1].geo_point, None);

        let json = r#"[{"origin": "A", "destination": "B"}]"#;
        let conns: Vec<ConnectionRecord> = serde_json::from_str(json).unwrap();
        assert_eq!(conns[0], ConnectionRecord::new("A", "B"));
    }
}
