//! Driver offer expansion and ordering.
//!
//! Opening a tier turns its price list into individual driver offers, each
//! with a freshly drawn arrival estimate. The offer list can then be
//! re-sorted any number of times without touching the drawn values.

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use rand::Rng;

use crate::domain::Price;

/// Arrival estimates drawn for each driver, in minutes.
pub const ETA_RANGE_MINS: RangeInclusive<u32> = 2..=12;

/// Identifies a driver within one expanded offer list.
///
/// Drivers are numbered from 1 in expansion order, which is also the
/// order of the tier's price list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DriverId(u32);

impl DriverId {
    /// Create a driver id. Returns `None` for zero.
    pub fn new(id: u32) -> Option<Self> {
        (id > 0).then_some(DriverId(id))
    }

    /// Id of the driver at a zero-based expansion position.
    pub fn from_position(position: usize) -> Self {
        DriverId(u32::try_from(position).map_or(u32::MAX, |p| p.saturating_add(1)))
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// Zero-based position in the expansion order.
    pub fn position(self) -> usize {
        (self.0 - 1) as usize
    }
}

impl fmt::Display for DriverId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One priced driver option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RideOffer {
    pub driver_id: DriverId,
    pub price: Price,
    pub eta_minutes: u32,
}

impl RideOffer {
    /// Card text for the offer at a one-based display position.
    pub fn label(&self, display_position: usize) -> String {
        format!(
            "Driver {display_position} - ${} - ETA: {} mins",
            self.price, self.eta_minutes
        )
    }
}

/// Sort key for the offer list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OfferSort {
    Price,
    #[default]
    Eta,
}

/// Error returned when parsing an unknown sort key.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sort key {0:?}, expected \"price\" or \"eta\"")]
pub struct InvalidSortKey(String);

impl FromStr for OfferSort {
    type Err = InvalidSortKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "price" => Ok(OfferSort::Price),
            // The rider-facing selector calls this "time"
            "eta" | "time" => Ok(OfferSort::Eta),
            _ => Err(InvalidSortKey(s.to_string())),
        }
    }
}

/// Expand a price list into offers with fresh arrival estimates.
pub fn expand_offers<R: Rng>(prices: &[Price], rng: &mut R) -> Vec<RideOffer> {
    prices
        .iter()
        .enumerate()
        .map(|(i, &price)| RideOffer {
            driver_id: DriverId::from_position(i),
            price,
            eta_minutes: rng.gen_range(ETA_RANGE_MINS),
        })
        .collect()
}

/// Sort offers ascending by `key`.
///
/// Ties fall back to expansion order, so the result does not depend on
/// how the list was previously sorted. Offer values are never changed.
pub fn sort_offers(offers: &mut [RideOffer], key: OfferSort) {
    match key {
        OfferSort::Price => offers.sort_by_key(|o| (o.price, o.driver_id)),
        OfferSort::Eta => offers.sort_by_key(|o| (o.eta_minutes, o.driver_id)),
    }
}

/// The driver list of an opened tier.
///
/// ETAs are drawn once when the list is opened; sorting only reorders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfferList {
    offers: Vec<RideOffer>,
    sort: OfferSort,
}

impl OfferList {
    /// Expand `prices` and present them sorted by arrival estimate.
    pub fn open<R: Rng>(prices: &[Price], rng: &mut R) -> Self {
        let mut list = Self {
            offers: expand_offers(prices, rng),
            sort: OfferSort::default(),
        };
        sort_offers(&mut list.offers, list.sort);
        list
    }

    /// Re-sort the list.
    pub fn sort_by(&mut self, key: OfferSort) {
        self.sort = key;
        sort_offers(&mut self.offers, key);
    }

    /// Offers in presentation order.
    pub fn offers(&self) -> &[RideOffer] {
        &self.offers
    }

    /// Current sort key.
    pub fn sort(&self) -> OfferSort {
        self.sort
    }

    /// Offer at a zero-based presentation position.
    pub fn get(&self, position: usize) -> Option<&RideOffer> {
        self.offers.get(position)
    }

    /// Prices in presentation order, so the card at display position `n`
    /// (counting from 1) has price `prices()[n - 1]`.
    pub fn prices(&self) -> Vec<Price> {
        self.offers.iter().map(|o| o.price).collect()
    }

    /// Card labels in presentation order.
    pub fn labels(&self) -> Vec<String> {
        self.offers
            .iter()
            .enumerate()
            .map(|(i, o)| o.label(i + 1))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.offers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offers.is_empty()
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn offers_strategy() -> impl Strategy<Value = Vec<RideOffer>> {
        prop::collection::vec((1000u32..=3000, 2u32..=12), 0..8).prop_map(|raw| {
            raw.into_iter()
                .enumerate()
                .map(|(i, (cents, eta))| RideOffer {
                    driver_id: DriverId::from_position(i),
                    price: Price::from_cents(cents),
                    eta_minutes: eta,
                })
                .collect()
        })
    }

    proptest! {
        /// Price sort is non-decreasing and keeps every offer
        #[test]
        fn price_sort_ordered_and_permutation(offers in offers_strategy()) {
            let mut sorted = offers.clone();
            sort_offers(&mut sorted, OfferSort::Price);

            prop_assert!(sorted.windows(2).all(|w| w[0].price <= w[1].price));
            let mut a = offers.clone();
            let mut b = sorted.clone();
            a.sort_by_key(|o| o.driver_id);
            b.sort_by_key(|o| o.driver_id);
            prop_assert_eq!(a, b);
        }

        /// ETA sort is non-decreasing and keeps every offer
        #[test]
        fn eta_sort_ordered_and_permutation(offers in offers_strategy()) {
            let mut sorted = offers.clone();
            sort_offers(&mut sorted, OfferSort::Eta);

            prop_assert!(sorted.windows(2).all(|w| w[0].eta_minutes <= w[1].eta_minutes));
            let mut a = offers.clone();
            let mut b = sorted.clone();
            a.sort_by_key(|o| o.driver_id);
            b.sort_by_key(|o| o.driver_id);
            prop_assert_eq!(a, b);
        }

        /// Sorting twice with the same key changes nothing
        #[test]
        fn sort_is_idempotent(offers in offers_strategy()) {
            let mut once = offers.clone();
            sort_offers(&mut once, OfferSort::Price);
            let mut twice = once.clone();
            sort_offers(&mut twice, OfferSort::Price);
            prop_assert_eq!(once, twice);
        }
    }
}
