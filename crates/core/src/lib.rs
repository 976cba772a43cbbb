//! `spotlight-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod entity;
pub mod error;
pub mod id;
pub mod money;
pub mod value_object;

pub use entity::{Entity, find_by_id, find_by_id_mut, next_entity_id};
pub use error::{DomainError, DomainResult};
pub use id::{CustomerId, ItemId, RentalId, SequentialId, next_id};
pub use money::Money;
pub use value_object::ValueObject;
