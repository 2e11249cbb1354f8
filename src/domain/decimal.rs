//! Exact decimal arithmetic for fees and costs.
//!
//! Provides canonical parsing from strings, conversion between on-chain
//! smallest units and human-denominated amounts, and fixed-precision
//! formatting for display.

use rust_decimal::{Decimal as RustDecimal, RoundingStrategy};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Largest scale rust_decimal can represent.
const MAX_SCALE: u32 = 28;

/// Lossless decimal numeric type for fee and cost calculations.
///
/// Wraps rust_decimal; no value ever passes through `f64`.
/// Serializes to a normalized JSON string so no precision is lost on the wire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
pub struct Decimal(#[serde(with = "rust_decimal::serde::str")] RustDecimal);

impl Serialize for Decimal {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_canonical_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    #[error("scaling by 10^-{decimals} exceeds the maximum precision")]
    ScaleOverflow { decimals: u32 },
    #[error("arithmetic overflow in {0}")]
    Overflow(&'static str),
}

impl Decimal {
    pub fn new(value: RustDecimal) -> Self {
        Decimal(value)
    }

    /// Parses plain decimal text such as `"0.0005"` or `"10000000000000000000"`.
    pub fn from_str_canonical(s: &str) -> Result<Self, rust_decimal::Error> {
        RustDecimal::from_str(s).map(Decimal)
    }

    /// Shortest exact text form: trailing zeros dropped, no exponent.
    pub fn to_canonical_string(&self) -> String {
        let normalized = self.0.normalize();
        format!("{}", normalized)
    }

    /// Convert an amount in smallest on-chain units to human units by
    /// scaling with 10^-decimals.
    ///
    /// When the result fits in 28 fractional digits only the scale moves, so
    /// the value is exact. Otherwise it is divided out and rounded at the
    /// 28th digit.
    pub fn from_base_units(amount: Decimal, decimals: u32) -> Result<Self, AmountError> {
        let mut value = amount.0;
        if value.scale() + decimals > MAX_SCALE {
            value = value.normalize();
        }
        let scale = value.scale() + decimals;
        if scale <= MAX_SCALE {
            value
                .set_scale(scale)
                .map_err(|_| AmountError::ScaleOverflow { decimals })?;
            return Ok(Decimal(value));
        }
        value
            .checked_div(pow10(decimals)?)
            .map(Decimal)
            .ok_or(AmountError::Overflow("from_base_units"))
    }

    /// Convert a human-denominated amount to smallest on-chain units.
    pub fn to_base_units(&self, decimals: u32) -> Result<Self, AmountError> {
        self.0
            .checked_mul(pow10(decimals)?)
            .map(Decimal)
            .ok_or(AmountError::Overflow("to_base_units"))
    }

    /// Checked addition.
    pub fn checked_add(self, rhs: Decimal) -> Result<Self, AmountError> {
        self.0
            .checked_add(rhs.0)
            .map(Decimal)
            .ok_or(AmountError::Overflow("add"))
    }

    pub fn checked_sub(self, rhs: Decimal) -> Result<Self, AmountError> {
        self.0
            .checked_sub(rhs.0)
            .map(Decimal)
            .ok_or(AmountError::Overflow("sub"))
    }

    /// Sum `values`, failing instead of panicking on overflow.
    pub fn checked_sum(values: impl IntoIterator<Item = Decimal>) -> Result<Self, AmountError> {
        values
            .into_iter()
            .try_fold(Decimal::zero(), |acc, value| acc.checked_add(value))
    }

    /// Checked multiplication.
    pub fn checked_mul(self, rhs: Decimal) -> Result<Self, AmountError> {
        self.0
            .checked_mul(rhs.0)
            .map(Decimal)
            .ok_or(AmountError::Overflow("mul"))
    }

    /// Format with exactly `dp` fractional digits, rounding half away from zero.
    pub fn to_fixed(&self, dp: u32) -> String {
        let mut rounded = self
            .0
            .round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
        rounded.rescale(dp);
        rounded.to_string()
    }

    pub fn inner(&self) -> RustDecimal {
        self.0
    }

    pub fn zero() -> Self {
        Decimal(RustDecimal::ZERO)
    }

    /// The multiplicative identity (1).
    pub fn one() -> Self {
        Decimal(RustDecimal::ONE)
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_positive(&self) -> bool {
        !self.is_zero() && self.0.is_sign_positive()
    }

    pub fn is_negative(&self) -> bool {
        !self.is_zero() && self.0.is_sign_negative()
    }
}

fn pow10(decimals: u32) -> Result<RustDecimal, AmountError> {
    10i128
        .checked_pow(decimals)
        .and_then(|f| RustDecimal::try_from_i128_with_scale(f, 0).ok())
        .ok_or(AmountError::ScaleOverflow { decimals })
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_canonical_string())
    }
}

impl FromStr for Decimal {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_str_canonical(s)
    }
}

impl From<RustDecimal> for Decimal {
    fn from(value: RustDecimal) -> Self {
        Decimal(value)
    }
}

impl From<Decimal> for RustDecimal {
    fn from(value: Decimal) -> Self {
        value.0
    }
}

impl From<u64> for Decimal {
    fn from(value: u64) -> Self {
        Decimal(RustDecimal::from(value))
    }
}

impl std::ops::Add for Decimal {
    type Output = Decimal;

    fn add(self, rhs: Decimal) -> Decimal {
        Decimal(self.0 + rhs.0)
    }
}

impl std::ops::Sub for Decimal {
    type Output = Decimal;

    fn sub(self, rhs: Decimal) -> Decimal {
        Decimal(self.0 - rhs.0)
    }
}

impl std::ops::Mul for Decimal {
    type Output = Decimal;

    fn mul(self, rhs: Decimal) -> Decimal {
        Decimal(self.0 * rhs.0)
    }
}

impl std::ops::Neg for Decimal {
    type Output = Decimal;

    fn neg(self) -> Decimal {
        Decimal(-self.0)
    }
}
