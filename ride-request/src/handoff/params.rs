//! Flat key-value parameters passed between views.

use std::collections::BTreeMap;

use crate::domain::{Point, Price};
use crate::offers::DriverId;

pub const START_LAT: &str = "startLat";
pub const START_LNG: &str = "startLng";
pub const DEST_LAT: &str = "destLat";
pub const DEST_LNG: &str = "destLng";
pub const PRICES: &str = "prices";
pub const DRIVER: &str = "driver";
pub const ETA: &str = "eta";

/// Errors from reading hand-off parameters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HandoffError {
    /// Parameter absent
    #[error("missing parameter {0}")]
    Missing(&'static str),

    /// Parameter present but unusable
    #[error("malformed parameter {key}: {message}")]
    Malformed { key: &'static str, message: String },
}

/// An unordered set of string parameters, like a URL query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HandoffParams(BTreeMap<String, String>);

impl HandoffParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a parameter, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn required(&self, key: &'static str) -> Result<&str, HandoffError> {
        self.get(key).ok_or(HandoffError::Missing(key))
    }

    /// Read a point from a latitude/longitude parameter pair.
    pub fn point(&self, lat_key: &'static str, lng_key: &'static str) -> Result<Point, HandoffError> {
        let lat = self.required(lat_key)?;
        let lng = self.required(lng_key)?;
        Point::parse(lat, lng).map_err(|e| HandoffError::Malformed {
            key: lat_key,
            message: e.to_string(),
        })
    }

    /// Store a point as a latitude/longitude parameter pair.
    pub fn set_point(&mut self, lat_key: &'static str, lng_key: &'static str, point: Point) {
        self.insert(lat_key, point.lat.to_string());
        self.insert(lng_key, point.lng.to_string());
    }

    /// Read the price list: a JSON array of decimal strings.
    ///
    /// Bare JSON numbers are accepted too. An empty list is malformed, since
    /// it leaves nothing to offer.
    pub fn prices(&self) -> Result<Vec<Price>, HandoffError> {
        let raw = self.required(PRICES)?;
        let malformed = |message: String| HandoffError::Malformed {
            key: PRICES,
            message,
        };

        let values: Vec<serde_json::Value> =
            serde_json::from_str(raw).map_err(|e| malformed(e.to_string()))?;
        if values.is_empty() {
            return Err(malformed("empty price list".to_string()));
        }

        values
            .iter()
            .map(|value| match value {
                serde_json::Value::String(s) => Price::parse(s),
                serde_json::Value::Number(n) => Price::parse(&n.to_string()),
                other => Price::parse(&other.to_string()),
            })
            .collect::<Result<_, _>>()
            .map_err(|e| malformed(e.to_string()))
    }

    /// Store the price list as a JSON array of decimal strings.
    pub fn set_prices(&mut self, prices: &[Price]) {
        let strings: Vec<String> = prices.iter().map(Price::to_string).collect();
        let json = serde_json::Value::from(strings).to_string();
        self.insert(PRICES, json);
    }

    /// Read the chosen driver id.
    pub fn driver(&self) -> Result<DriverId, HandoffError> {
        let raw = self.required(DRIVER)?;
        raw.trim()
            .parse::<u32>()
            .ok()
            .and_then(DriverId::new)
            .ok_or_else(|| HandoffError::Malformed {
                key: DRIVER,
                message: format!("{raw:?} is not a driver number"),
            })
    }

    /// Read the chosen ETA in whole minutes; must be positive.
    pub fn eta_minutes(&self) -> Result<u32, HandoffError> {
        let raw = self.required(ETA)?;
        raw.trim()
            .parse::<u32>()
            .ok()
            .filter(|&m| m > 0)
            .ok_or_else(|| HandoffError::Malformed {
                key: ETA,
                message: format!("{raw:?} is not a positive number of minutes"),
            })
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for HandoffParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
