use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::NoiseError;

/// Seed for the permutation shuffle.
///
/// Integer and float inputs are both accepted. Integral floats collapse onto
/// the matching integer so `2023` and `2023.0` produce the same table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Seed(pub u64);

impl Seed {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn value(self) -> u64 {
        self.0
    }

    /// Map a float seed onto the integer seed space.
    ///
    /// Finite integral values inside `i64` range become that integer
    /// (negatives reinterpret as two's complement, matching `from_i64`).
    /// Everything else, fractional values and non-finite ones included,
    /// uses the IEEE-754 bit pattern.
    pub fn from_f64(value: f64) -> Self {
        const I64_BOUND: f64 = 9_223_372_036_854_775_808.0; // 2^63

        if value.is_finite() && value.fract() == 0.0 && value >= -I64_BOUND && value < I64_BOUND {
            Self::from_i64(value as i64)
        } else {
            Self(value.to_bits())
        }
    }

    pub const fn from_i64(value: i64) -> Self {
        Self(value as u64)
    }
}

impl From<u64> for Seed {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<u32> for Seed {
    fn from(value: u32) -> Self {
        Self(u64::from(value))
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Seed {
    type Err = NoiseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(value) = s.parse::<u64>() {
            return Ok(Self(value));
        }
        if let Ok(value) = s.parse::<i64>() {
            return Ok(Self::from_i64(value));
        }
        s.parse::<f64>()
            .map(Self::from_f64)
            .map_err(|_| NoiseError::invalid("seed", format!("`{s}` is not a number")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integral_floats_match_integers() {
        assert_eq!(Seed::from_f64(2023.0), Seed::new(2023));
        assert_eq!(Seed::from_f64(-1.0), Seed::from_i64(-1));
        assert_eq!(Seed::from_f64(-0.0), Seed::new(0));
    }

    #[test]
    fn fractional_floats_use_bit_pattern() {
        assert_eq!(Seed::from_f64(0.5), Seed::new(0.5f64.to_bits()));
        assert_ne!(Seed::from_f64(2023.5), Seed::from_f64(2023.0));
    }

    #[test]
    fn parses_integers_and_floats() {
        assert_eq!("2023".parse::<Seed>(), Ok(Seed::new(2023)));
        assert_eq!("2023.0".parse::<Seed>(), Ok(Seed::new(2023)));
        assert_eq!(" -7 ".parse::<Seed>(), Ok(Seed::from_i64(-7)));
        assert_eq!("1.25".parse::<Seed>(), Ok(Seed::from_f64(1.25)));
    }

    #[test]
    fn rejects_garbage() {
        let err = "twenty".parse::<Seed>().unwrap_err();
        assert!(matches!(err, NoiseError::InvalidParameter { name: "seed", .. }));
    }
}
