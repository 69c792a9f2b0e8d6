//! West African CFA franc amounts.
//!
//! The backend reports every amount as a plain JSON number in XOF. XOF has
//! no minor unit in everyday use, so amounts are displayed rounded to whole
//! francs.

use core::fmt;
use core::ops::{Add, Mul};

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::format::group_thousands;

/// Display suffix for XOF amounts.
pub const CURRENCY_SUFFIX: &str = "FCFA";

/// An amount in XOF.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Zero francs.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create an amount from a decimal.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create an amount from whole francs.
    #[must_use]
    pub fn from_francs(francs: i64) -> Self {
        Self(Decimal::from(francs))
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// The amount rounded to whole francs (half away from zero).
    #[must_use]
    pub fn rounded(&self) -> Decimal {
        self.0
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
    }

    /// This amount as a whole percentage of `total`, clamped to `0..=100`.
    /// Used for bar heights; a zero total gives 0.
    #[must_use]
    pub fn percent_of(&self, total: Self) -> u8 {
        if total.0 <= Decimal::ZERO {
            return 0;
        }
        let pct = (self.0 / total.0 * Decimal::ONE_HUNDRED)
            .round()
            .clamp(Decimal::ZERO, Decimal::ONE_HUNDRED);
        pct.to_u8().unwrap_or(0)
    }
}

impl fmt::Display for Money {
    /// Formats as `1 500 000 FCFA`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = self.rounded();
        let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
            "-"
        } else {
            ""
        };
        let digits = rounded.abs().trunc().to_string();
        write!(f, "{sign}{} {CURRENCY_SUFFIX}", group_thousands(&digits))
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Mul<Decimal> for Money {
    type Output = Self;

    fn mul(self, rhs: Decimal) -> Self {
        Self(self.0 * rhs)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn test_display_groups_and_rounds() {
        assert_eq!(Money::from_francs(0).to_string(), "0 FCFA");
        assert_eq!(Money::from_francs(950).to_string(), "950 FCFA");
        assert_eq!(Money::from_francs(1_500_000).to_string(), "1 500 000 FCFA");
        assert_eq!(Money::new(dec!(42857.5)).to_string(), "42 858 FCFA");
        assert_eq!(Money::new(dec!(-2500.4)).to_string(), "-2 500 FCFA");
    }

    #[test]
    fn test_deserializes_from_json_number() {
        let money: Money = serde_json::from_str("125000.0").unwrap();
        assert_eq!(money, Money::from_francs(125_000));
    }

    #[test]
    fn test_percent_of() {
        let peak = Money::from_francs(2_000_000);
        assert_eq!(Money::from_francs(500_000).percent_of(peak), 25);
        assert_eq!(peak.percent_of(peak), 100);
        assert_eq!(Money::from_francs(3_000_000).percent_of(peak), 100);
        assert_eq!(peak.percent_of(Money::ZERO), 0);
    }

    #[test]
    fn test_sum() {
        let total: Money = [Money::from_francs(1000), Money::from_francs(250)]
            .into_iter()
            .sum();
        assert_eq!(total, Money::from_francs(1250));
    }
}
