//! Driver approach countdown.

use rand::Rng;
use tracing::{debug, info};

use crate::domain::Price;
use crate::offers::DriverId;

use super::config::AssignmentConfig;
use super::profile::DriverProfile;

/// Lifecycle of an assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignmentState {
    /// Driver on the way; the countdown is running.
    Active,
    /// Countdown reached zero.
    Arrived,
    /// Rider cancelled before arrival.
    Cancelled,
}

/// What a single tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Countdown decremented; this many seconds remain.
    Remaining(u32),
    /// Countdown just reached zero. Reported exactly once.
    Arrived,
    /// Assignment is no longer active; nothing changed.
    Idle,
}

/// Result of a successful cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cancellation {
    /// Fee charged to the rider.
    pub penalty: Price,
    /// Countdown value frozen at the moment of cancellation.
    pub remaining_seconds: u32,
}

/// Countdown length for an ETA, falling back when the ETA is missing or
/// not positive.
pub fn countdown_seconds(eta_minutes: Option<u32>, fallback_secs: u32) -> u32 {
    eta_minutes
        .filter(|&m| m > 0)
        .and_then(|m| m.checked_mul(60))
        .unwrap_or(fallback_secs)
}

/// Format a countdown as `m:ss remaining`.
pub fn countdown_text(remaining_seconds: u32) -> String {
    format!(
        "{}:{:02} remaining",
        remaining_seconds / 60,
        remaining_seconds % 60
    )
}

/// Shown once the driver has arrived.
pub const ARRIVED_TEXT: &str = "Driver has arrived!";

/// Shown after the rider cancels.
pub const CANCELLED_TEXT: &str = "Booking cancelled";

/// Simulates a chosen driver's approach.
///
/// The driver profile is drawn once at creation and never changes. The
/// countdown only moves through [`AssignmentTracker::tick`] and never goes
/// below zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentTracker {
    driver_id: DriverId,
    price: Price,
    eta_minutes: Option<u32>,
    profile: DriverProfile,
    remaining_seconds: u32,
    state: AssignmentState,
    penalty: Option<Price>,
}

impl AssignmentTracker {
    /// Start an assignment for the chosen driver.
    pub fn new<R: Rng>(
        driver_id: DriverId,
        price: Price,
        eta_minutes: Option<u32>,
        config: &AssignmentConfig,
        rng: &mut R,
    ) -> Self {
        let remaining_seconds = countdown_seconds(eta_minutes, config.fallback_countdown_secs);
        let profile = DriverProfile::generate(config, rng);
        info!(
            driver = %driver_id,
            %price,
            remaining_seconds,
            name = %profile.name,
            plate = %profile.plate,
            "driver assigned"
        );

        Self {
            driver_id,
            price,
            eta_minutes,
            profile,
            remaining_seconds,
            state: AssignmentState::Active,
            penalty: None,
        }
    }

    pub fn driver_id(&self) -> DriverId {
        self.driver_id
    }

    pub fn price(&self) -> Price {
        self.price
    }

    /// ETA as handed over, if there was a usable one.
    pub fn eta_minutes(&self) -> Option<u32> {
        self.eta_minutes
    }

    pub fn profile(&self) -> &DriverProfile {
        &self.profile
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    pub fn state(&self) -> AssignmentState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == AssignmentState::Active
    }

    /// Penalty charged, if the rider cancelled.
    pub fn penalty(&self) -> Option<Price> {
        self.penalty
    }

    /// Advance the countdown by one second.
    pub fn tick(&mut self) -> TickOutcome {
        if self.state != AssignmentState::Active {
            return TickOutcome::Idle;
        }

        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        if self.remaining_seconds == 0 {
            self.state = AssignmentState::Arrived;
            info!(driver = %self.driver_id, "driver arrived");
            return TickOutcome::Arrived;
        }

        TickOutcome::Remaining(self.remaining_seconds)
    }

    /// Cancel the assignment, charging `penalty`.
    ///
    /// Returns `None` without changing anything unless the assignment is
    /// active.
    pub fn cancel(&mut self, penalty: Price) -> Option<Cancellation> {
        if self.state != AssignmentState::Active {
            debug!(state = ?self.state, "cancel ignored");
            return None;
        }

        self.state = AssignmentState::Cancelled;
        self.penalty = Some(penalty);
        info!(
            driver = %self.driver_id,
            %penalty,
            remaining_seconds = self.remaining_seconds,
            "assignment cancelled"
        );

        Some(Cancellation {
            penalty,
            remaining_seconds: self.remaining_seconds,
        })
    }

    /// Text for the countdown display.
    pub fn status_text(&self) -> String {
        match self.state {
            AssignmentState::Active => countdown_text(self.remaining_seconds),
            AssignmentState::Arrived => ARRIVED_TEXT.to_string(),
            AssignmentState::Cancelled => CANCELLED_TEXT.to_string(),
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    proptest! {
        /// Remaining time never increases, never underflows, and arrival is
        /// reported exactly once
        #[test]
        fn countdown_monotonic(eta in 0u32..=3, seed in any::<u64>(), extra in 0usize..50) {
            let mut t = AssignmentTracker::new(
                DriverId::new(1).unwrap(),
                Price::from_dollars(12),
                Some(eta),
                &AssignmentConfig::default(),
                &mut StdRng::seed_from_u64(seed),
            );
            let total = t.remaining_seconds() as usize;
            let mut prev = t.remaining_seconds();
            let mut arrivals = 0;

            for _ in 0..total + extra {
                if t.tick() == TickOutcome::Arrived {
                    arrivals += 1;
                }
                prop_assert!(t.remaining_seconds() <= prev);
                prev = t.remaining_seconds();
            }
            prop_assert_eq!(arrivals, 1);
            prop_assert_eq!(t.remaining_seconds(), 0);
        }

        /// Cancelling at any point freezes the countdown
        #[test]
        fn cancel_freezes(ticks in 0usize..180, seed in any::<u64>()) {
            let mut t = AssignmentTracker::new(
                DriverId::new(1).unwrap(),
                Price::from_dollars(12),
                Some(3),
                &AssignmentConfig::default(),
                &mut StdRng::seed_from_u64(seed),
            );
            for _ in 0..ticks {
                t.tick();
            }
            let frozen = t.remaining_seconds();
            prop_assert!(t.cancel(Price::from_dollars(5)).is_some());
            for _ in 0..10 {
                prop_assert_eq!(t.tick(), TickOutcome::Idle);
            }
            prop_assert_eq!(t.remaining_seconds(), frozen);
        }
    }
}
