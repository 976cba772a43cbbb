//! Money amounts in minor currency units.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value_object::ValueObject;

/// A non-negative amount of money in pence.
///
/// Stored as an integer so that rental totals are exact; `Display` renders the
/// amount as pounds (`£12.50`).
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(u64);

impl ValueObject for Money {}

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn from_pence(pence: u64) -> Self {
        Self(pence)
    }

    pub const fn from_pounds(pounds: u64) -> Self {
        Self(pounds * 100)
    }

    pub fn pence(&self) -> u64 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Multiply by a count (units, days). `None` on overflow.
    pub fn checked_times(self, factor: u64) -> Option<Self> {
        self.0.checked_mul(factor).map(Self)
    }

    pub fn checked_add(self, rhs: Money) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    /// Total of `amounts`, or `None` if it does not fit.
    pub fn checked_sum(amounts: impl IntoIterator<Item = Money>) -> Option<Self> {
        amounts
            .into_iter()
            .try_fold(Money::ZERO, |acc, amount| acc.checked_add(amount))
    }
}

impl core::fmt::Display for Money {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "£{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

/// Parses `"12"`, `"12.5"`, `"12.50"` and an optional leading `£`.
impl FromStr for Money {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        let raw = raw.strip_prefix('£').unwrap_or(raw);
        let invalid = || DomainError::validation(format!("invalid amount: {s:?}"));

        let (whole, frac) = match raw.split_once('.') {
            Some((w, f)) => (w, f),
            None => (raw, ""),
        };
        if whole.is_empty() || frac.len() > 2 {
            return Err(invalid());
        }
        if !whole.chars().all(|c| c.is_ascii_digit()) || !frac.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }

        let pounds: u64 = whole.parse().map_err(|_| invalid())?;
        let pence: u64 = match frac.len() {
            0 => 0,
            1 => frac.parse::<u64>().map_err(|_| invalid())? * 10,
            _ => frac.parse().map_err(|_| invalid())?,
        };

        pounds
            .checked_mul(100)
            .and_then(|p| p.checked_add(pence))
            .map(Money)
            .ok_or_else(invalid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_as_pounds_and_pence() {
        assert_eq!(Money::from_pence(6000).to_string(), "£60.00");
        assert_eq!(Money::from_pence(1205).to_string(), "£12.05");
    }

    #[test]
    fn parses_common_price_inputs() {
        assert_eq!("10".parse::<Money>().unwrap(), Money::from_pounds(10));
        assert_eq!("10.5".parse::<Money>().unwrap(), Money::from_pence(1050));
        assert_eq!("£0.99".parse::<Money>().unwrap(), Money::from_pence(99));
    }

    #[test]
    fn rejects_malformed_amounts() {
        for bad in ["", "-1", "1.234", "abc", ".5", "1.x"] {
            assert!(bad.parse::<Money>().is_err(), "{bad:?} should not parse");
        }
    }

    #[test]
    fn sums_and_multiplies() {
        let doubled = Money::from_pounds(10).checked_times(2).unwrap();
        let total = Money::checked_sum([doubled, Money::from_pounds(20)]).unwrap();
        assert_eq!(total.checked_times(3), Some(Money::from_pounds(120)));
    }

    #[test]
    fn overflow_is_reported_not_clamped() {
        let huge = "184467440737095516.15".parse::<Money>().unwrap();
        assert_eq!(huge.pence(), u64::MAX);
        assert_eq!(huge.checked_times(2), None);
        assert_eq!(huge.checked_add(Money::from_pence(1)), None);
        assert_eq!(Money::checked_sum([huge, Money::from_pence(1)]), None);
        assert_eq!(huge.checked_times(1), Some(huge));
    }
}
