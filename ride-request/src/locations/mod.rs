//! Location dataset loading and search.
//!
//! The dataset is split into partitions (one per region) that are fetched
//! concurrently, merged in a fixed order, and searched by substring.

mod client;
mod debounce;
mod error;
mod index;
mod record;
mod source;

pub use client::{LocationClient, LocationClientConfig};
pub use debounce::{DEFAULT_DEBOUNCE, Debouncer};
pub use error::LocationError;
pub use index::{DEFAULT_MAX_RESULTS, LoadState, LocationIndex};
pub use record::{LocationDto, LocationRecord};
pub use source::{DEFAULT_REGIONS, PartitionSource};
