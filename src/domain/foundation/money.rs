//! Monetary amount value object.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// Scale used for every stored amount.
const SCALE: u32 = 2;

/// Non-negative fixed-point amount in major currency units, two decimal places.
///
/// Gateways exchange amounts in minor units (kobo, cents); conversion
/// happens only at adapter boundaries through `to_minor_units` and
/// `from_minor_units`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(Decimal);

impl Amount {
    /// Zero amount.
    pub const ZERO: Amount = Amount(Decimal::ZERO);

    /// Creates an amount, rounding half away from zero to two places.
    pub fn new(value: Decimal) -> Result<Self, ValidationError> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(ValidationError::negative("amount"));
        }
        Ok(Self(
            value.round_dp_with_strategy(SCALE, RoundingStrategy::MidpointAwayFromZero),
        ))
    }

    /// Builds an amount from an integer count of minor units.
    pub fn from_minor_units(minor: i64) -> Result<Self, ValidationError> {
        Self::new(Decimal::new(minor, SCALE))
    }

    /// Converts to an integer count of minor units.
    pub fn to_minor_units(&self) -> i64 {
        (self.0 * Decimal::ONE_HUNDRED).trunc().to_i64().unwrap_or(i64::MAX)
    }

    /// Returns the inner decimal.
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}
