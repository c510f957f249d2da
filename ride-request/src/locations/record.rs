//! Location dataset records.

use serde::Deserialize;

use crate::domain::{InvalidCoordinate, Point};

/// A record as it appears in a partition file.
///
/// Partition files use the upper-case column names of the public address
/// dataset; camel-case names are accepted as well. Coordinates are
/// string-encoded decimals. Any other columns are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LocationDto {
    #[serde(rename = "SEARCHVAL", alias = "displayName")]
    pub display_name: String,
    #[serde(rename = "ADDRESS", alias = "address")]
    pub address: String,
    #[serde(rename = "LATITUDE", alias = "latitude")]
    pub latitude: String,
    #[serde(rename = "LONGITUDE", alias = "longitude")]
    pub longitude: String,
}

impl LocationDto {
    /// Convenience constructor, mostly for tests and inline partitions.
    pub fn new(display_name: &str, address: &str, latitude: &str, longitude: &str) -> Self {
        Self {
            display_name: display_name.to_string(),
            address: address.to_string(),
            latitude: latitude.to_string(),
            longitude: longitude.to_string(),
        }
    }
}

/// A searchable location with parsed coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationRecord {
    pub display_name: String,
    pub address: String,
    pub point: Point,
}

impl TryFrom<LocationDto> for LocationRecord {
    type Error = InvalidCoordinate;

    fn try_from(dto: LocationDto) -> Result<Self, Self::Error> {
        let point = Point::parse(&dto.latitude, &dto.longitude)?;
        Ok(Self {
            display_name: dto.display_name,
            address: dto.address,
            point,
        })
    }
}
