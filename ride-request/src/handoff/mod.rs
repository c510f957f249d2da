//! Navigation hand-off between views.
//!
//! Trip state crosses from the search view to the offer list, and from the
//! offer list to the assignment view, as a flat set of string parameters.
//! Readers on the receiving side never fail: anything missing or malformed
//! is replaced by a fallback so the view still works.

mod params;
mod views;

pub use params::{
    DEST_LAT, DEST_LNG, DRIVER, ETA, HandoffError, HandoffParams, PRICES, START_LAT, START_LNG,
};
pub use views::{AcceptedParams, RideParams};
