//! Geographic points.

use std::fmt;

/// Error returned when a coordinate pair is not a usable location.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid coordinate: {reason}")]
pub struct InvalidCoordinate {
    reason: String,
}

/// A latitude/longitude pair in decimal degrees.
///
/// Construction through [`Point::new`] or [`Point::parse`] guarantees both
/// values are finite and within the WGS84 ranges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub lat: f64,
    pub lng: f64,
}

impl Point {
    /// Fallback location used when a coordinate cannot be recovered
    /// (central Singapore).
    pub const DEFAULT: Point = Point {
        lat: 1.3521,
        lng: 103.8198,
    };

    /// Create a point, validating both axes.
    pub fn new(lat: f64, lng: f64) -> Result<Self, InvalidCoordinate> {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(InvalidCoordinate {
                reason: format!("latitude {lat} out of range"),
            });
        }
        if !lng.is_finite() || !(-180.0..=180.0).contains(&lng) {
            return Err(InvalidCoordinate {
                reason: format!("longitude {lng} out of range"),
            });
        }
        Ok(Point { lat, lng })
    }

    /// Parse a point from string-encoded decimals, as found in the
    /// location dataset and in navigation parameters.
    pub fn parse(lat: &str, lng: &str) -> Result<Self, InvalidCoordinate> {
        let parse_axis = |axis: &str, value: &str| {
            value.trim().parse::<f64>().map_err(|_| InvalidCoordinate {
                reason: format!("{axis} {value:?} is not a number"),
            })
        };
        Self::new(parse_axis("latitude", lat)?, parse_axis("longitude", lng)?)
    }

    /// Shift the point by the given deltas, clamping to the valid ranges.
    pub fn offset(self, dlat: f64, dlng: f64) -> Point {
        Point {
            lat: (self.lat + dlat).clamp(-90.0, 90.0),
            lng: (self.lng + dlng).clamp(-180.0, 180.0),
        }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.lat, self.lng)
    }
}
