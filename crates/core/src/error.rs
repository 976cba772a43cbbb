//! Domain error model.

use thiserror::Error;

use crate::id::ItemId;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures (validation,
/// stock availability, missing records). Storage failures belong to the
/// infrastructure layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. empty name, end date before start date).
    #[error("validation failed: {0}")]
    Validation(String),

    /// Requested quantity exceeds what is on the shelf.
    #[error("insufficient stock for {name} (item {item_id}): requested {requested}, only {available} available")]
    InsufficientStock {
        item_id: ItemId,
        name: String,
        requested: u32,
        available: u32,
    },

    /// A referenced record does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// A record cannot be removed while rentals still reference it.
    #[error("in use: {0}")]
    InUse(String),

    /// A record with the same identity already exists.
    #[error("conflict: {0}")]
    Conflict(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn in_use(msg: impl Into<String>) -> Self {
        Self::InUse(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn insufficient_stock(
        item_id: ItemId,
        name: impl Into<String>,
        requested: u32,
        available: u32,
    ) -> Self {
        Self::InsufficientStock {
            item_id,
            name: name.into(),
            requested,
            available,
        }
    }

    /// Units missing to satisfy the request (zero for other error kinds).
    pub fn shortfall(&self) -> u32 {
        match self {
            Self::InsufficientStock {
                requested,
                available,
                ..
            } => requested.saturating_sub(*available),
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insufficient_stock_reports_shortfall_and_item() {
        let err = DomainError::insufficient_stock(ItemId::new(3), "Microphone", 6, 5);
        assert_eq!(err.shortfall(), 1);
        let msg = err.to_string();
        assert!(msg.contains("Microphone"));
        assert!(msg.contains("item 3"));
    }

    #[test]
    fn shortfall_is_zero_for_other_kinds() {
        assert_eq!(DomainError::not_found("rental 1").shortfall(), 0);
    }
}
