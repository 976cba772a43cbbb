//! Value object trait: equality by value, not identity.
//!
//! Value objects are domain objects that have **no identity**. They are defined
//! entirely by their attribute values: two rental date ranges covering the same
//! days are the same range.

/// Marker trait for value objects.
///
/// Value objects are immutable and compared by value. To "modify" one, build a
/// new one.
///
/// ## Value Object vs Entity
///
/// - **Value Object**: `Money`, `DateRange`, `CustomerDetails`
/// - **Entity**: `Customer`, `Item`, `Rental` (identified by their sequential id)
///
/// ```ignore
/// let a = Money::from_pence(1000);
/// let b = Money::from_pounds(10);
/// assert_eq!(a, b);
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
