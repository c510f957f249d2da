//! Typed hand-offs into the offer list and assignment views.

use tracing::warn;

use crate::domain::{Point, Price};
use crate::offers::DriverId;

use super::params::{
    DEST_LAT, DEST_LNG, DRIVER, ETA, HandoffError, HandoffParams, START_LAT, START_LNG,
};

/// Recover a parameter, logging what went wrong.
fn recover<T>(result: Result<T, HandoffError>, fallback: impl FnOnce() -> T) -> T {
    result.unwrap_or_else(|e| {
        warn!(error = %e, "falling back for hand-off parameter");
        fallback()
    })
}

/// Trip state carried into the offer list view.
#[derive(Debug, Clone, PartialEq)]
pub struct RideParams {
    pub start: Point,
    pub destination: Point,
    /// The opened tier's prices, in driver order.
    pub prices: Vec<Price>,
}

impl RideParams {
    pub fn new(start: Point, destination: Point, prices: Vec<Price>) -> Self {
        Self {
            start,
            destination,
            prices,
        }
    }

    /// Write as flat parameters.
    pub fn to_params(&self) -> HandoffParams {
        let mut params = HandoffParams::new();
        params.set_point(START_LAT, START_LNG, self.start);
        params.set_point(DEST_LAT, DEST_LNG, self.destination);
        params.set_prices(&self.prices);
        params
    }

    /// Read from flat parameters, failing on the first problem.
    pub fn parse(params: &HandoffParams) -> Result<Self, HandoffError> {
        Ok(Self {
            start: params.point(START_LAT, START_LNG)?,
            destination: params.point(DEST_LAT, DEST_LNG)?,
            prices: params.prices()?,
        })
    }

    /// Read from flat parameters, recovering every field independently.
    ///
    /// Unusable coordinates become [`Point::DEFAULT`]; an unusable price
    /// list becomes `fallback_prices`.
    pub fn parse_lenient(params: &HandoffParams, fallback_prices: &[Price]) -> Self {
        Self {
            start: recover(params.point(START_LAT, START_LNG), || Point::DEFAULT),
            destination: recover(params.point(DEST_LAT, DEST_LNG), || Point::DEFAULT),
            prices: recover(params.prices(), || fallback_prices.to_vec()),
        }
    }
}

/// Trip state and the chosen driver, carried into the assignment view.
#[derive(Debug, Clone, PartialEq)]
pub struct AcceptedParams {
    pub ride: RideParams,
    pub driver: Option<DriverId>,
    pub eta_minutes: Option<u32>,
}

impl AcceptedParams {
    pub fn new(ride: RideParams, driver: DriverId, eta_minutes: u32) -> Self {
        Self {
            ride,
            driver: Some(driver),
            eta_minutes: Some(eta_minutes),
        }
    }

    /// Write as flat parameters.
    pub fn to_params(&self) -> HandoffParams {
        let mut params = self.ride.to_params();
        if let Some(driver) = self.driver {
            params.insert(DRIVER, driver.to_string());
        }
        if let Some(eta) = self.eta_minutes {
            params.insert(ETA, eta.to_string());
        }
        params
    }

    /// Read from flat parameters, failing on the first problem.
    pub fn parse(params: &HandoffParams) -> Result<Self, HandoffError> {
        Ok(Self {
            ride: RideParams::parse(params)?,
            driver: Some(params.driver()?),
            eta_minutes: Some(params.eta_minutes()?),
        })
    }

    /// Read from flat parameters, recovering every field independently.
    ///
    /// A missing driver or ETA is left as `None`; the assignment view picks
    /// the first driver and the fallback countdown.
    pub fn parse_lenient(params: &HandoffParams, fallback_prices: &[Price]) -> Self {
        Self {
            ride: RideParams::parse_lenient(params, fallback_prices),
            driver: recover(params.driver().map(Some), || None),
            eta_minutes: recover(params.eta_minutes().map(Some), || None),
        }
    }

    /// The chosen driver, or the first driver when none was handed over or
    /// the id is beyond the price list.
    pub fn chosen_driver(&self) -> DriverId {
        self.driver
            .filter(|d| d.position() < self.ride.prices.len())
            .unwrap_or_else(|| DriverId::from_position(0))
    }

    /// Price of the chosen driver.
    pub fn chosen_price(&self) -> Option<Price> {
        self.ride.prices.get(self.chosen_driver().position()).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handoff::PRICES;

    fn p(lat: f64, lng: f64) -> Point {
        Point::new(lat, lng).unwrap()
    }

    fn fallback() -> Vec<Price> {
        vec![
            Price::from_dollars(15),
            Price::from_dollars(20),
            Price::from_dollars(25),
        ]
    }

    #[test]
    fn ride_params_roundtrip() {
        let ride = RideParams::new(
            p(1.30, 103.80),
            p(1.35, 103.85),
            vec![Price::from_cents(1250), Price::from_cents(2530)],
        );
        let params = ride.to_params();
        assert_eq!(params.len(), 5);
        assert_eq!(RideParams::parse(&params), Ok(ride.clone()));
        assert_eq!(RideParams::parse_lenient(&params, &fallback()), ride);
    }

    #[test]
    fn missing_prices_use_fallback_offers() {
        let ride = RideParams::new(p(1.30, 103.80), p(1.35, 103.85), vec![]);
        let mut params = ride.to_params();
        params.insert(PRICES, "garbage");

        let parsed = RideParams::parse_lenient(&params, &fallback());
        assert_eq!(parsed.prices.len(), 3);
        assert_eq!(parsed.start, p(1.30, 103.80));
    }

    #[test]
    fn malformed_coordinates_use_default_location() {
        let params: HandoffParams = [
            (START_LAT, "north"),
            (START_LNG, "103.8"),
            (DEST_LAT, "1.35"),
            (DEST_LNG, "103.85"),
        ]
        .into_iter()
        .collect();

        let parsed = RideParams::parse_lenient(&params, &fallback());
        assert_eq!(parsed.start, Point::DEFAULT);
        assert_eq!(parsed.destination, p(1.35, 103.85));
        assert!(RideParams::parse(&params).is_err());
    }

    #[test]
    fn accepted_params_roundtrip() {
        let ride = RideParams::new(
            p(1.30, 103.80),
            p(1.35, 103.85),
            vec![Price::from_cents(1250), Price::from_cents(2530)],
        );
        let accepted = AcceptedParams::new(ride, DriverId::new(2).unwrap(), 6);
        let params = accepted.to_params();

        assert_eq!(params.get(DRIVER), Some("2"));
        assert_eq!(params.get(ETA), Some("6"));
        assert_eq!(AcceptedParams::parse(&params), Ok(accepted.clone()));
        assert_eq!(accepted.chosen_price(), Some(Price::from_cents(2530)));
    }

    #[test]
    fn empty_accepted_params_recover_everything() {
        let accepted = AcceptedParams::parse_lenient(&HandoffParams::new(), &fallback());

        assert_eq!(accepted.ride.start, Point::DEFAULT);
        assert_eq!(accepted.ride.destination, Point::DEFAULT);
        assert_eq!(accepted.ride.prices, fallback());
        assert_eq!(accepted.driver, None);
        assert_eq!(accepted.eta_minutes, None);
        assert_eq!(accepted.chosen_driver().get(), 1);
        assert_eq!(accepted.chosen_price(), Some(Price::from_dollars(15)));
    }

    #[test]
    fn driver_beyond_price_list_picks_first() {
        let ride = RideParams::new(p(1.3, 103.8), p(1.4, 103.9), vec![Price::from_dollars(11)]);
        let accepted = AcceptedParams::new(ride, DriverId::new(4).unwrap(), 3);
        assert_eq!(accepted.chosen_driver().get(), 1);
        assert_eq!(accepted.chosen_price(), Some(Price::from_dollars(11)));
    }
}
