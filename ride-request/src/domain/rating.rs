//! Driver ratings.

use std::fmt;

use rand::Rng;

/// Lowest rating a synthetic driver can have, in tenths.
const MIN_TENTHS: u8 = 35;

/// Highest rating, in tenths.
const MAX_TENTHS: u8 = 50;

/// A driver rating between 3.5 and 5.0 at one decimal place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rating(u8);

impl Rating {
    /// Create a rating from tenths of a star (35 = 3.5).
    ///
    /// Returns `None` outside the 3.5–5.0 range.
    pub fn from_tenths(tenths: u8) -> Option<Self> {
        (MIN_TENTHS..=MAX_TENTHS)
            .contains(&tenths)
            .then_some(Rating(tenths))
    }

    /// Draw a star value uniformly from 3.5–5.0 and round it to one
    /// decimal place. The two end values each get half the weight of the
    /// values between them.
    pub fn generate<R: Rng>(rng: &mut R) -> Self {
        let stars: f64 = rng.gen_range(3.5..=5.0);
        let tenths = (stars * 10.0).round() as u8;
        Rating(tenths.clamp(MIN_TENTHS, MAX_TENTHS))
    }

    /// The rating in tenths of a star.
    pub fn tenths(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.0 / 10, self.0 % 10)
    }
}
