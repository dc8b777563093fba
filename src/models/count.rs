//! Counter values of unbounded magnitude.

use std::fmt;
use std::str::FromStr;

use num_bigint::BigUint;
use serde::{Deserialize, Deserializer, Serialize, Serializer, de, ser};
use serde_json::Number;

use crate::error::AppError;

/// A non-negative integer count with no upper bound.
///
/// Serialized as a bare JSON number, e.g. `{"views": 18446744073709551616}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Count(BigUint);

impl Count {
    /// This count plus one.
    pub fn incremented(&self) -> Self {
        Count(self.0.clone() + 1u32)
    }
}

impl From<u64> for Count {
    fn from(n: u64) -> Self {
        Count(BigUint::from(n))
    }
}

impl From<BigUint> for Count {
    fn from(n: BigUint) -> Self {
        Count(n)
    }
}

impl FromStr for Count {
    type Err = AppError;

    /// Parse plain ASCII digits; signs, fractions and exponents are rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(AppError::validation(format!(
                "'{s}' is not a non-negative integer"
            )));
        }
        s.parse::<BigUint>()
            .map(Count)
            .map_err(|e| AppError::validation(format!("'{s}': {e}")))
    }
}

impl fmt::Display for Count {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl Serialize for Count {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let number: Number = self.0.to_string().parse().map_err(ser::Error::custom)?;
        number.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Count {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let number = Number::deserialize(deserializer)?;
        number.to_string().parse().map_err(de::Error::custom)
    }
}
