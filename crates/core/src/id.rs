//! Strongly-typed sequential identifiers used across the domain.
//!
//! Every collection numbers its records from `1`. The next identifier is always
//! `max(existing) + 1`, so removing the highest record frees its number for the
//! next insert.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Identifier of a customer record.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomerId(u64);

/// Identifier of a stock item.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(u64);

/// Identifier of a rental.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RentalId(u64);

/// Identifiers assigned by "highest existing + 1".
pub trait SequentialId: Copy + Ord {
    /// Identifier handed out when a collection is empty.
    fn first() -> Self;

    /// Identifier directly after `self`.
    fn successor(self) -> Self;
}

/// Next free identifier for a collection: `1` when empty, otherwise `max + 1`.
pub fn next_id<I, It>(existing: It) -> I
where
    I: SequentialId,
    It: IntoIterator<Item = I>,
{
    existing
        .into_iter()
        .max()
        .map(SequentialId::successor)
        .unwrap_or_else(I::first)
}

macro_rules! impl_sequential_newtype {
    ($t:ty, $name:literal) => {
        impl $t {
            pub const fn new(value: u64) -> Self {
                Self(value)
            }

            pub fn value(&self) -> u64 {
                self.0
            }
        }

        impl SequentialId for $t {
            fn first() -> Self {
                Self(1)
            }

            fn successor(self) -> Self {
                Self(self.0 + 1)
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<u64> for $t {
            fn from(value: u64) -> Self {
                Self(value)
            }
        }

        impl From<$t> for u64 {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let value = u64::from_str(s.trim())
                    .map_err(|e| DomainError::invalid_id(format!("{}: {}", $name, e)))?;
                Ok(Self(value))
            }
        }
    };
}

impl_sequential_newtype!(CustomerId, "CustomerId");
impl_sequential_newtype!(ItemId, "ItemId");
impl_sequential_newtype!(RentalId, "RentalId");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_collection_starts_at_one() {
        let none: Vec<RentalId> = Vec::new();
        assert_eq!(next_id(none), RentalId::new(1));
    }

    #[test]
    fn next_id_follows_the_highest_existing() {
        let ids = [ItemId::new(4), ItemId::new(1), ItemId::new(9)];
        assert_eq!(next_id(ids), ItemId::new(10));
    }

    #[test]
    fn deleting_the_highest_frees_it_for_reuse() {
        let mut ids = vec![RentalId::new(1), RentalId::new(2), RentalId::new(3)];
        ids.retain(|id| *id != RentalId::new(3));
        assert_eq!(next_id(ids), RentalId::new(3));
    }

    #[test]
    fn parse_rejects_non_numeric_input() {
        assert!(matches!(
            "abc".parse::<CustomerId>(),
            Err(DomainError::InvalidId(_))
        ));
        assert_eq!(" 7 ".parse::<CustomerId>().unwrap(), CustomerId::new(7));
    }
}
