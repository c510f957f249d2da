//! Vehicle registration plates.

use std::fmt;

use rand::Rng;

/// Error returned when parsing an invalid plate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid car plate: {reason}")]
pub struct InvalidPlate {
    reason: &'static str,
}

/// A validated car plate.
///
/// The format is `S`, two uppercase letters, a four-digit number from 1000
/// to 9999, and a trailing uppercase letter (e.g. "SKB4821Z").
///
/// # Examples
///
/// ```
/// use ride_request::domain::CarPlate;
///
/// let plate = CarPlate::parse("SKB4821Z").unwrap();
/// assert_eq!(plate.as_str(), "SKB4821Z");
/// assert_eq!(plate.number(), 4821);
///
/// // Leading zero means the number is below 1000
/// assert!(CarPlate::parse("SKB0821Z").is_err());
/// // Must start with S
/// assert!(CarPlate::parse("TKB4821Z").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct CarPlate([u8; 8]);

impl CarPlate {
    /// Parse a plate from a string.
    pub fn parse(s: &str) -> Result<Self, InvalidPlate> {
        let bytes = s.as_bytes();

        if bytes.len() != 8 {
            return Err(InvalidPlate {
                reason: "must be exactly 8 characters",
            });
        }

        if bytes[0] != b'S' {
            return Err(InvalidPlate {
                reason: "must start with 'S'",
            });
        }

        if !bytes[1].is_ascii_uppercase() || !bytes[2].is_ascii_uppercase() {
            return Err(InvalidPlate {
                reason: "prefix letters must be uppercase A-Z",
            });
        }

        if !bytes[3..7].iter().all(u8::is_ascii_digit) {
            return Err(InvalidPlate {
                reason: "number must be four digits",
            });
        }

        if bytes[3] == b'0' {
            return Err(InvalidPlate {
                reason: "number must be between 1000 and 9999",
            });
        }

        if !bytes[7].is_ascii_uppercase() {
            return Err(InvalidPlate {
                reason: "suffix must be an uppercase letter",
            });
        }

        let mut plate = [0u8; 8];
        plate.copy_from_slice(bytes);
        Ok(CarPlate(plate))
    }

    /// Draw a random plate.
    pub fn generate<R: Rng>(rng: &mut R) -> Self {
        let mut letter = || b'A' + rng.gen_range(0..26u8);
        let first = letter();
        let second = letter();
        let suffix = letter();
        let number: u16 = rng.gen_range(1000..=9999);

        let digits = number.to_string();
        let d = digits.as_bytes();
        CarPlate([b'S', first, second, d[0], d[1], d[2], d[3], suffix])
    }

    /// Returns the plate as a string slice.
    pub fn as_str(&self) -> &str {
        // Only ASCII is ever stored
        std::str::from_utf8(&self.0).unwrap_or_default()
    }

    /// The numeric part of the plate.
    pub fn number(&self) -> u16 {
        self.0[3..7]
            .iter()
            .fold(0u16, |acc, b| acc * 10 + u16::from(b - b'0'))
    }
}

impl fmt::Debug for CarPlate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CarPlate({})", self.as_str())
    }
}

impl fmt::Display for CarPlate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
