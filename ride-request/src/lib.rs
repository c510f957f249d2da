//! Ride request simulator.
//!
//! Simulates the rider side of booking a ride: pick a start and destination
//! from a searchable location dataset, browse synthetic ride offers, choose
//! a driver and watch the countdown to their arrival.
//!
//! Rendering is left to the caller through the [`view::View`] trait;
//! [`app::RideApp`] drives everything else from a single event loop.

pub mod app;
pub mod assignment;
pub mod config;
pub mod domain;
pub mod handoff;
pub mod locations;
pub mod offers;
pub mod session;
pub mod view;
