//! Synthetic driver profiles.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::domain::{CarPlate, Rating};

use super::config::AssignmentConfig;

/// Shown when a configured pool is empty.
const UNKNOWN: &str = "Unknown";

/// The driver and car shown once a ride is accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverProfile {
    pub name: String,
    pub car_model: String,
    pub plate: CarPlate,
    pub rating: Rating,
}

impl DriverProfile {
    /// Draw a profile from the configured pools.
    pub fn generate<R: Rng>(config: &AssignmentConfig, rng: &mut R) -> Self {
        let name = pick(&config.driver_names, rng);
        let car_model = pick(&config.car_models, rng);
        Self {
            name,
            car_model,
            plate: CarPlate::generate(rng),
            rating: Rating::generate(rng),
        }
    }
}

fn pick<R: Rng>(pool: &[String], rng: &mut R) -> String {
    pool.choose(rng)
        .cloned()
        .unwrap_or_else(|| UNKNOWN.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn profile_drawn_from_pools() {
        let config = AssignmentConfig::default();
        let mut rng = StdRng::seed_from_u64(21);

        for _ in 0..50 {
            let profile = DriverProfile::generate(&config, &mut rng);
            assert!(config.driver_names.contains(&profile.name));
            assert!(config.car_models.contains(&profile.car_model));
            assert!(CarPlate::parse(profile.plate.as_str()).is_ok());
            assert!((35..=50).contains(&profile.rating.tenths()));
        }
    }

    #[test]
    fn seeded_profiles_repeat() {
        let config = AssignmentConfig::default();
        let a = DriverProfile::generate(&config, &mut StdRng::seed_from_u64(4));
        let b = DriverProfile::generate(&config, &mut StdRng::seed_from_u64(4));
        assert_eq!(a, b);
    }

    #[test]
    fn empty_pools_fall_back() {
        let config = AssignmentConfig {
            driver_names: Vec::new(),
            car_models: Vec::new(),
            ..AssignmentConfig::default()
        };
        let profile = DriverProfile::generate(&config, &mut StdRng::seed_from_u64(0));
        assert_eq!(profile.name, "Unknown");
        assert_eq!(profile.car_model, "Unknown");
    }
}
