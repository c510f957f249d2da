//! Domain types for the ride request simulator.
//!
//! These are small value types that enforce their invariants at
//! construction time, so code receiving them can trust their validity.

mod plate;
mod point;
mod price;
mod rating;

pub use plate::{CarPlate, InvalidPlate};
pub use point::{InvalidCoordinate, Point};
pub use price::{InvalidPrice, Price};
pub use rating::Rating;
