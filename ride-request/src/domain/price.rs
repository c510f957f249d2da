//! Fare amounts.

use std::fmt;

/// Error returned when parsing an invalid price string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid price {input:?}: {reason}")]
pub struct InvalidPrice {
    input: String,
    reason: &'static str,
}

impl InvalidPrice {
    fn new(input: &str, reason: &'static str) -> Self {
        Self {
            input: input.to_string(),
            reason,
        }
    }
}

/// A fare amount held as whole cents.
///
/// Storing cents keeps two-decimal rounding exact and gives prices a total
/// order, so offers can be sorted without float comparisons.
///
/// # Examples
///
/// ```
/// use ride_request::domain::Price;
///
/// let p = Price::parse("12.50").unwrap();
/// assert_eq!(p.cents(), 1250);
/// assert_eq!(p.to_string(), "12.50");
///
/// // Single-digit fractions are accepted
/// assert_eq!(Price::parse("7.5").unwrap().cents(), 750);
///
/// // More than two decimal places is rejected
/// assert!(Price::parse("7.505").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price(u32);

impl Price {
    /// Create a price from a whole number of cents.
    pub const fn from_cents(cents: u32) -> Self {
        Price(cents)
    }

    /// Create a price from whole dollars.
    pub const fn from_dollars(dollars: u32) -> Self {
        Price(dollars * 100)
    }

    /// The amount in cents.
    pub const fn cents(self) -> u32 {
        self.0
    }

    /// Parse a decimal string such as `"12.50"`.
    ///
    /// Accepts an integer part and an optional fraction of one or two
    /// digits. Surrounding whitespace is ignored.
    pub fn parse(s: &str) -> Result<Self, InvalidPrice> {
        let trimmed = s.trim();
        let (whole, fraction) = match trimmed.split_once('.') {
            Some((whole, fraction)) => (whole, Some(fraction)),
            None => (trimmed, None),
        };

        if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
            return Err(InvalidPrice::new(s, "integer part must be ASCII digits"));
        }

        let whole: u32 = whole
            .parse()
            .map_err(|_| InvalidPrice::new(s, "amount too large"))?;

        let fraction_cents = match fraction {
            None => 0,
            Some(f) if f.is_empty() || f.len() > 2 => {
                return Err(InvalidPrice::new(s, "fraction must be one or two digits"));
            }
            Some(f) if !f.bytes().all(|b| b.is_ascii_digit()) => {
                return Err(InvalidPrice::new(s, "fraction must be ASCII digits"));
            }
            // "5" means fifty cents, "05" means five
            Some(f) if f.len() == 1 => u32::from(f.as_bytes()[0] - b'0') * 10,
            Some(f) => u32::from(f.as_bytes()[0] - b'0') * 10 + u32::from(f.as_bytes()[1] - b'0'),
        };

        whole
            .checked_mul(100)
            .and_then(|c| c.checked_add(fraction_cents))
            .map(Price)
            .ok_or_else(|| InvalidPrice::new(s, "amount too large"))
    }
}

impl fmt::Debug for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Price({self})")
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Display then parse returns the same amount
        #[test]
        fn display_parse_roundtrip(cents in 0u32..10_000_000) {
            let price = Price::from_cents(cents);
            prop_assert_eq!(Price::parse(&price.to_string()).unwrap(), price);
        }

        /// Strings with a sign or exponent never parse
        #[test]
        fn signed_rejected(s in "[+-][0-9]{1,4}(\\.[0-9]{2})?") {
            prop_assert!(Price::parse(&s).is_err());
        }
    }
}
