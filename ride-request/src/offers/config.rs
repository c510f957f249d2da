//! Configuration for offer generation.

use crate::domain::Price;

/// Ride tiers shown when no other set is configured.
const DEFAULT_TIERS: [&str; 4] = ["Economy", "Standard", "Comfort", "XL"];

/// Configuration parameters for ride offers.
#[derive(Debug, Clone)]
pub struct OfferConfig {
    /// Names of the ride tiers, in display order. One tier is generated
    /// per name.
    pub tier_names: Vec<String>,

    /// Prices used for the offer list when a hand-off carries no usable
    /// price list.
    pub fallback_prices: Vec<Price>,
}

impl OfferConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(tier_names: Vec<String>, fallback_prices: Vec<Price>) -> Self {
        Self {
            tier_names,
            fallback_prices,
        }
    }

    /// Replace the tier names.
    pub fn with_tier_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tier_names = names.into_iter().map(Into::into).collect();
        self
    }

    /// Number of tiers generated per request.
    pub fn tier_count(&self) -> usize {
        self.tier_names.len()
    }
}

impl Default for OfferConfig {
    fn default() -> Self {
        Self {
            tier_names: DEFAULT_TIERS.iter().map(|s| (*s).to_string()).collect(),
            fallback_prices: vec![
                Price::from_dollars(15),
                Price::from_dollars(20),
                Price::from_dollars(25),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = OfferConfig::default();

        assert_eq!(config.tier_count(), 4);
        assert_eq!(config.tier_names[0], "Economy");
        assert_eq!(config.fallback_prices.len(), 3);
        assert_eq!(config.fallback_prices[1], Price::from_dollars(20));
    }

    #[test]
    fn custom_tiers() {
        let config = OfferConfig::default().with_tier_names(["Bike", "Car", "Van", "Bus", "Limo"]);
        assert_eq!(config.tier_count(), 5);
        assert_eq!(config.tier_names[4], "Limo");
    }
}
