//! Entity trait: identity + continuity across state changes.

use crate::id::{SequentialId, next_id};

/// Entity marker + minimal interface.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: SequentialId + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> Self::Id;
}

/// Next free identifier for a collection of entities.
pub fn next_entity_id<E: Entity>(records: &[E]) -> E::Id {
    next_id(records.iter().map(|r| r.id()))
}

/// Find a record by id.
pub fn find_by_id<E: Entity>(records: &[E], id: E::Id) -> Option<&E> {
    records.iter().find(|r| r.id() == id)
}

/// Find a record by id (mutable).
pub fn find_by_id_mut<E: Entity>(records: &mut [E], id: E::Id) -> Option<&mut E> {
    records.iter_mut().find(|r| r.id() == id)
}
