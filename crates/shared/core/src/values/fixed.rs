//! Fixed-point decimal with 5 fractional digits
//!
//! Every value is held at scale 5 and every arithmetic step rounds half away
//! from zero back to scale 5. Indicator fixtures depend on this per-step
//! rounding, so results are not computed at higher precision and rounded once.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul, Neg, Sub};
use std::str::FromStr;

/// Number of fractional digits kept after every operation
pub const SCALE: u32 = 5;

/// Round a raw decimal to scale 5, half away from zero
#[inline]
fn round(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Scale-5, round-half-up decimal used for every price and indicator value
///
/// Equality and ordering are numeric: `1.23386` equals `1.2338600`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Decimal", into = "Decimal")]
pub struct FixedDecimal(Decimal);

impl FixedDecimal {
    pub const ZERO: FixedDecimal = FixedDecimal(Decimal::ZERO);
    pub const ONE: FixedDecimal = FixedDecimal(Decimal::ONE);
    pub const TWO: FixedDecimal = FixedDecimal(Decimal::TWO);
    pub const ONE_HUNDRED: FixedDecimal = FixedDecimal(Decimal::ONE_HUNDRED);

    /// Create from any decimal, rounding to scale 5
    #[inline]
    pub fn new(value: Decimal) -> Self {
        Self(round(value))
    }

    /// Create from a whole number
    #[inline]
    pub fn from_int(value: i64) -> Self {
        Self(Decimal::from(value))
    }

    /// Get the underlying decimal
    #[inline]
    pub fn value(self) -> Decimal {
        self.0
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    #[inline]
    pub fn is_sign_negative(self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    #[inline]
    pub fn abs(self) -> Self {
        Self(self.0.abs())
    }

    /// Divide, rounding the quotient to scale 5
    ///
    /// Returns `None` when the divisor is zero; callers decide whether that
    /// is an error or a documented fallback.
    #[inline]
    pub fn checked_div(self, rhs: Self) -> Option<Self> {
        if rhs.is_zero() {
            return None;
        }
        self.0.checked_div(rhs.0).map(Self::new)
    }

    /// Convert to f64 (for logging and external systems only)
    pub fn to_f64(self) -> f64 {
        self.0.to_f64().unwrap_or(f64::NAN)
    }
}

impl From<Decimal> for FixedDecimal {
    fn from(value: Decimal) -> Self {
        Self::new(value)
    }
}

impl From<FixedDecimal> for Decimal {
    fn from(value: FixedDecimal) -> Self {
        value.0
    }
}

impl From<i64> for FixedDecimal {
    fn from(value: i64) -> Self {
        Self::from_int(value)
    }
}

impl From<u32> for FixedDecimal {
    fn from(value: u32) -> Self {
        Self(Decimal::from(value))
    }
}

impl From<usize> for FixedDecimal {
    fn from(value: usize) -> Self {
        Self(Decimal::from(value))
    }
}

impl FromStr for FixedDecimal {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s.trim()).map(Self::new)
    }
}

impl fmt::Display for FixedDecimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut value = self.0;
        value.rescale(SCALE);
        write!(f, "{}", value)
    }
}

impl Add for FixedDecimal {
    type Output = FixedDecimal;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.0 + rhs.0)
    }
}

impl Sub for FixedDecimal {
    type Output = FixedDecimal;

    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.0 - rhs.0)
    }
}

impl Mul for FixedDecimal {
    type Output = FixedDecimal;

    #[inline]
    fn mul(self, rhs: Self) -> Self::Output {
        Self::new(self.0 * rhs.0)
    }
}

impl Neg for FixedDecimal {
    type Output = FixedDecimal;

    #[inline]
    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl Sum for FixedDecimal {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, value| acc + value)
    }
}

impl<'a> Sum<&'a FixedDecimal> for FixedDecimal {
    fn sum<I: Iterator<Item = &'a FixedDecimal>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, value| acc + *value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn fx(value: Decimal) -> FixedDecimal {
        FixedDecimal::new(value)
    }

    #[test]
    fn test_construction_rounds_half_up() {
        assert_eq!(fx(dec!(1.234565)), fx(dec!(1.23457)));
        assert_eq!(fx(dec!(1.234564)), fx(dec!(1.23456)));
        // Half away from zero for negatives
        assert_eq!(fx(dec!(-1.234565)), fx(dec!(-1.23457)));
    }

    #[test]
    fn test_numeric_equality_ignores_trailing_zeros() {
        assert_eq!(fx(dec!(1.23386)), fx(dec!(1.2338600)));
    }

    #[test]
    fn test_multiply_rounds_each_step() {
        // 0.0045 * 1.61662 = 0.00727479 -> 0.00727
        assert_eq!(fx(dec!(0.0045)) * fx(dec!(1.61662)), fx(dec!(0.00727)));
        // 0.33333 * 3 = 0.99999, no hidden precision
        assert_eq!(fx(dec!(0.33333)) * FixedDecimal::from_int(3), fx(dec!(0.99999)));
    }

    #[test]
    fn test_divide() {
        let q = FixedDecimal::from_int(14).checked_div(FixedDecimal::from_int(6));
        assert_eq!(q, Some(fx(dec!(2.33333))));

        let q = FixedDecimal::from_int(2).checked_div(FixedDecimal::from_int(3));
        assert_eq!(q, Some(fx(dec!(0.66667))));
    }

    #[test]
    fn test_divide_by_zero_is_none() {
        assert_eq!(FixedDecimal::ONE.checked_div(FixedDecimal::ZERO), None);
        // A divisor that cancels to zero is still zero
        let divisor = fx(dec!(0.00077)) - fx(dec!(0.00077));
        assert_eq!(FixedDecimal::ONE.checked_div(divisor), None);
    }

    #[test]
    fn test_display_uses_five_digits() {
        assert_eq!(fx(dec!(1.2)).to_string(), "1.20000");
        assert_eq!(fx(dec!(-0.000015)).to_string(), "-0.00002");
    }

    #[test]
    fn test_parse_and_sum() {
        let values: Vec<FixedDecimal> = ["1.0", "2.0", "3.0"]
            .iter()
            .map(|s| s.parse().unwrap())
            .collect();
        let total: FixedDecimal = values.iter().sum();
        assert_eq!(total, FixedDecimal::from_int(6));
    }

    #[test]
    fn test_serde_rounds_on_deserialize() {
        let value: FixedDecimal = serde_json::from_str("\"1.234565\"").unwrap();
        assert_eq!(value, fx(dec!(1.23457)));
    }
}
