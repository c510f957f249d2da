//! Driver assignment simulation.
//!
//! Choosing an offer starts an assignment: a synthetic driver profile and a
//! countdown to arrival that the rider may cancel for a fee.

mod config;
mod profile;
mod tracker;

pub use config::AssignmentConfig;
pub use profile::DriverProfile;
pub use tracker::{
    ARRIVED_TEXT, AssignmentState, AssignmentTracker, CANCELLED_TEXT, Cancellation, TickOutcome,
    countdown_seconds, countdown_text,
};
