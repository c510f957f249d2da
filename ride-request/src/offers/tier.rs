//! Ride tiers and their rates.

use std::fmt;
use std::ops::RangeInclusive;

use crate::domain::Price;

/// Drivers available in a tier.
pub const DRIVER_RANGE: RangeInclusive<usize> = 1..=5;

/// Lowest generated price.
pub const MIN_PRICE: Price = Price::from_dollars(10);

/// Highest generated price.
pub const MAX_PRICE: Price = Price::from_dollars(30);

/// Error returned when tier data breaks the tier invariants.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TierError {
    /// Driver count outside 1–5
    #[error("tier must have 1 to 5 drivers, got {0}")]
    DriverCount(usize),

    /// Price outside 10.00–30.00
    #[error("price {0} outside 10.00..=30.00")]
    PriceOutOfRange(Price),
}

/// Position of a tier in the generated list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TierId(pub usize);

/// A ride product with its own randomized driver pool.
///
/// Each driver in the pool has one price; the driver count is the number
/// of prices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RideTier {
    id: TierId,
    name: String,
    prices: Vec<Price>,
}

impl RideTier {
    /// Create a tier, checking the driver count and price range.
    pub fn new(id: TierId, name: impl Into<String>, prices: Vec<Price>) -> Result<Self, TierError> {
        if !DRIVER_RANGE.contains(&prices.len()) {
            return Err(TierError::DriverCount(prices.len()));
        }
        if let Some(&bad) = prices
            .iter()
            .find(|p| !(MIN_PRICE..=MAX_PRICE).contains(*p))
        {
            return Err(TierError::PriceOutOfRange(bad));
        }

        Ok(Self {
            id,
            name: name.into(),
            prices,
        })
    }

    /// Build a tier from values drawn inside the invariant ranges.
    pub(super) fn drawn(id: TierId, name: &str, prices: Vec<Price>) -> Self {
        debug_assert!(DRIVER_RANGE.contains(&prices.len()));
        debug_assert!(prices.iter().all(|p| (MIN_PRICE..=MAX_PRICE).contains(p)));
        Self {
            id,
            name: name.to_string(),
            prices,
        }
    }

    pub fn id(&self) -> TierId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Prices in draw order, one per driver.
    pub fn prices(&self) -> &[Price] {
        &self.prices
    }

    pub fn driver_count(&self) -> usize {
        self.prices.len()
    }

    /// The rate shown on the tier card.
    pub fn rate(&self) -> TierRate {
        // Non-empty by construction
        let first = self.prices[0];
        if self.prices.len() == 1 {
            return TierRate::Single(first);
        }
        let (min, max) = self
            .prices
            .iter()
            .fold((first, first), |(lo, hi), &p| (lo.min(p), hi.max(p)));
        TierRate::Range { min, max }
    }
}

/// Displayed rate of a tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TierRate {
    /// Exactly one driver.
    Single(Price),
    /// Cheapest and dearest driver.
    Range { min: Price, max: Price },
}

impl fmt::Display for TierRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TierRate::Single(p) => write!(f, "${p}"),
            TierRate::Range { min, max } => write!(f, "${min} - ${max}"),
        }
    }
}
