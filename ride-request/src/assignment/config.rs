//! Configuration for driver assignments.

use std::time::Duration;

use crate::domain::Price;

const DRIVER_NAMES: [&str; 7] = [
    "John", "Marvin", "Bautista", "Llamas", "Naufal", "Shukran", "Omar",
];

const CAR_MODELS: [&str; 6] = [
    "Lamborghini Sesto Elemento",
    "Nissan Skyline GT-R R34",
    "Lamborghini Countach",
    "Pagani Zonda",
    "Ferrari Enzo",
    "Porsche Carrera GT",
];

/// Configuration parameters for the driver approach simulation.
#[derive(Debug, Clone)]
pub struct AssignmentConfig {
    /// Time between countdown ticks. Each tick is one simulated second.
    pub tick: Duration,

    /// Fee charged when the rider cancels an active assignment.
    pub cancellation_penalty: Price,

    /// Countdown length when no usable ETA is available (seconds).
    pub fallback_countdown_secs: u32,

    /// Pool of synthetic driver names.
    pub driver_names: Vec<String>,

    /// Pool of synthetic car models.
    pub car_models: Vec<String>,
}

impl AssignmentConfig {
    /// Set the tick period.
    pub fn with_tick(mut self, tick: Duration) -> Self {
        self.tick = tick;
        self
    }

    /// Set the cancellation penalty.
    pub fn with_penalty(mut self, penalty: Price) -> Self {
        self.cancellation_penalty = penalty;
        self
    }
}

impl Default for AssignmentConfig {
    fn default() -> Self {
        Self {
            tick: Duration::from_secs(1),
            cancellation_penalty: Price::from_dollars(5),
            fallback_countdown_secs: 300, // 5 minutes
            driver_names: DRIVER_NAMES.iter().map(|s| (*s).to_string()).collect(),
            car_models: CAR_MODELS.iter().map(|s| (*s).to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = AssignmentConfig::default();

        assert_eq!(config.tick, Duration::from_secs(1));
        assert_eq!(config.cancellation_penalty, Price::from_dollars(5));
        assert_eq!(config.fallback_countdown_secs, 300);
        assert_eq!(config.driver_names.len(), 7);
        assert_eq!(config.car_models.len(), 6);
    }

    #[test]
    fn builders() {
        let config = AssignmentConfig::default()
            .with_tick(Duration::from_millis(10))
            .with_penalty(Price::from_cents(250));

        assert_eq!(config.tick, Duration::from_millis(10));
        assert_eq!(config.cancellation_penalty.to_string(), "2.50");
    }
}
