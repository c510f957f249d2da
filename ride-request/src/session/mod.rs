//! The rider's trip request.

mod error;
mod trip;

pub use error::SessionError;
pub use trip::{SearchField, SessionEvent, SessionState, TripSession};
