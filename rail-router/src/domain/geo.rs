//! Geographic coordinates and great-circle distance.

use std::fmt;

/// Mean Earth radius used by the haversine formula, in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Error returned when a geo-point string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid geo point: {reason}")]
pub struct InvalidGeoPoint {
    reason: &'static str,
}

/// A latitude/longitude pair in decimal degrees.
///
/// Any `GeoPoint` built through [`GeoPoint::new`] or [`GeoPoint::parse`] has
/// finite coordinates within `[-90, 90]` and `[-180, 180]`.
///
/// # Examples
///
/// ```
/// use rail_router::domain::GeoPoint;
///
/// let paris = GeoPoint::parse("48.8566, 2.3522").unwrap();
/// assert_eq!(paris.lat(), 48.8566);
/// assert_eq!(paris.lon(), 2.3522);
///
/// assert!(GeoPoint::parse("not-a-point").is_err());
/// assert!(GeoPoint::parse("91.0,0.0").is_err());
/// ```
#[derive(Clone, Copy, PartialEq)]
pub struct GeoPoint {
    lat: f64,
    lon: f64,
}

impl GeoPoint {
    /// Create a point from decimal degrees, rejecting out-of-range values.
    pub fn new(lat: f64, lon: f64) -> Result<Self, InvalidGeoPoint> {
        if !lat.is_finite() || !lon.is_finite() {
            return Err(InvalidGeoPoint {
                reason: "coordinates must be finite numbers",
            });
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(InvalidGeoPoint {
                reason: "latitude must be within [-90, 90]",
            });
        }
        if !(-180.0..=180.0).contains(&lon) {
            return Err(InvalidGeoPoint {
                reason: "longitude must be within [-180, 180]",
            });
        }
        Ok(Self { lat, lon })
    }

    /// Parse a `"lat,lon"` string with optional surrounding whitespace.
    pub fn parse(s: &str) -> Result<Self, InvalidGeoPoint> {
        let s = s.trim();
        if s.is_empty() {
            return Err(InvalidGeoPoint {
                reason: "empty value",
            });
        }

        let (lat, lon) = s.split_once(',').ok_or(InvalidGeoPoint {
            reason: "expected two comma-separated numbers",
        })?;
        if lon.contains(',') {
            return Err(InvalidGeoPoint {
                reason: "expected two comma-separated numbers",
            });
        }

        let lat: f64 = lat.trim().parse().map_err(|_| InvalidGeoPoint {
            reason: "latitude is not a number",
        })?;
        let lon: f64 = lon.trim().parse().map_err(|_| InvalidGeoPoint {
            reason: "longitude is not a number",
        })?;

        Self::new(lat, lon)
    }

    /// Latitude in decimal degrees.
    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// Longitude in decimal degrees.
    pub fn lon(&self) -> f64 {
        self.lon
    }
}

impl fmt::Debug for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GeoPoint({}, {})", self.lat, self.lon)
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lon)
    }
}

/// Haversine great-circle distance between two points, in kilometres.
pub fn distance(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let d_lat = (b.lat - a.lat).abs().to_radians();
    let d_lon = (b.lon - a.lon).abs().to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    // Rounding can push h a hair above 1 for antipodal points.
    let c = 2.0 * h.sqrt().min(1.0).asin();

    EARTH_RADIUS_KM * c
}
