//! Ride offers: tier generation and driver ranking.
//!
//! Setting a destination produces a fresh set of ride tiers, each with a
//! random pool of priced drivers. Opening a tier expands it into individual
//! offers with arrival estimates, which the rider can sort.

mod config;
mod generator;
mod rank;
mod tier;

pub use config::OfferConfig;
pub use generator::OfferGenerator;
pub use rank::{
    DriverId, ETA_RANGE_MINS, InvalidSortKey, OfferList, OfferSort, RideOffer, expand_offers,
    sort_offers,
};
pub use tier::{DRIVER_RANGE, MAX_PRICE, MIN_PRICE, RideTier, TierError, TierId, TierRate};
