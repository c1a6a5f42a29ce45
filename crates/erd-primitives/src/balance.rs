//! Token amounts.
//!
//! Amounts are non-negative integers of the smallest unit. One eGLD is
//! 10^18 units.

use std::fmt;
use std::str::FromStr;

use num_bigint::BigUint;
use num_traits::Zero;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::PrimitivesError;

/// Number of decimals of the native token.
pub const DENOMINATION: u32 = 18;

/// Ticker of the native token.
pub const TICKER: &str = "eGLD";

/// A non-negative amount of the native token, in its smallest unit.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Balance {
    value: BigUint,
}

impl Balance {
    /// Wrap an integer amount of the smallest unit.
    pub fn new(value: BigUint) -> Self {
        Balance { value }
    }

    /// The zero amount.
    pub fn zero() -> Self {
        Balance {
            value: BigUint::zero(),
        }
    }

    /// Parse a denominated amount such as `"1.5"` into units.
    ///
    /// Decimals beyond the 18th are truncated.
    ///
    /// # Arguments
    /// * `amount` - Decimal string with an optional fractional part.
    ///
    /// # Returns
    /// The amount in smallest units, or `InvalidBalance`.
    pub fn egld(amount: &str) -> Result<Self, PrimitivesError> {
        let amount = amount.trim();
        let (whole, fraction) = match amount.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (amount, ""),
        };

        let valid = |s: &str| s.chars().all(|c| c.is_ascii_digit());
        if (whole.is_empty() && fraction.is_empty()) || !valid(whole) || !valid(fraction) {
            return Err(PrimitivesError::InvalidBalance(amount.to_string()));
        }

        let mut digits = String::with_capacity(whole.len() + DENOMINATION as usize);
        digits.push_str(whole);
        let kept: String = fraction.chars().take(DENOMINATION as usize).collect();
        digits.push_str(&kept);
        for _ in kept.len()..DENOMINATION as usize {
            digits.push('0');
        }

        let value = BigUint::parse_bytes(digits.as_bytes(), 10)
            .ok_or_else(|| PrimitivesError::InvalidBalance(amount.to_string()))?;
        Ok(Balance { value })
    }

    /// Whether the amount is zero.
    pub fn is_zero(&self) -> bool {
        self.value.is_zero()
    }

    /// The amount in smallest units.
    pub fn value(&self) -> &BigUint {
        &self.value
    }

    /// The amount with exactly 18 decimals, e.g. `"1.500000000000000000"`.
    pub fn to_denominated(&self) -> String {
        let unit = BigUint::from(10u32).pow(DENOMINATION);
        let whole = &self.value / &unit;
        let fraction = &self.value % &unit;
        format!(
            "{}.{:0>width$}",
            whole,
            fraction.to_string(),
            width = DENOMINATION as usize
        )
    }

    /// The denominated amount followed by the ticker, e.g. `"1.5 eGLD"`.
    ///
    /// Trailing fractional zeros are dropped.
    pub fn to_currency_string(&self) -> String {
        let denominated = self.to_denominated();
        let trimmed = denominated.trim_end_matches('0').trim_end_matches('.');
        format!("{trimmed} {TICKER}")
    }
}

impl From<u64> for Balance {
    fn from(value: u64) -> Self {
        Balance {
            value: BigUint::from(value),
        }
    }
}

impl From<BigUint> for Balance {
    fn from(value: BigUint) -> Self {
        Balance { value }
    }
}

impl FromStr for Balance {
    type Err = PrimitivesError;

    /// Parse an integer amount of smallest units.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || !s.chars().all(|c| c.is_ascii_digit()) {
            return Err(PrimitivesError::InvalidBalance(s.to_string()));
        }
        BigUint::parse_bytes(s.as_bytes(), 10)
            .map(Balance::new)
            .ok_or_else(|| PrimitivesError::InvalidBalance(s.to_string()))
    }
}

impl fmt::Display for Balance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl Serialize for Balance {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.value.to_string())
    }
}

impl<'de> Deserialize<'de> for Balance {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}
