//! Simulator configuration.

use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::assignment::AssignmentConfig;
use crate::locations::{DEFAULT_DEBOUNCE, DEFAULT_MAX_RESULTS};
use crate::offers::OfferConfig;

/// Configuration for location search.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Maximum number of suggestions per query.
    pub max_results: usize,

    /// Quiet period after the last keystroke before a search runs.
    pub debounce: Duration,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_results: DEFAULT_MAX_RESULTS,
            debounce: DEFAULT_DEBOUNCE,
        }
    }
}

/// Everything needed to build a [`crate::app::RideApp`].
#[derive(Debug, Clone, Default)]
pub struct SimConfig {
    pub search: SearchConfig,
    pub offers: OfferConfig,
    pub assignment: AssignmentConfig,

    /// Seed for every random draw. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl SimConfig {
    /// Fix the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Build the random source for a run.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}
