//! Stock ledger: keeps `Item::quantity` consistent with outstanding reservations.
//!
//! All multi-item operations are all-or-nothing: availability is checked for
//! every line before any quantity is touched.

use std::collections::BTreeMap;

use spotlight_core::{DomainError, DomainResult, ItemId, find_by_id, find_by_id_mut};

use crate::item::Item;

/// Reserved quantities per item.
pub type Reservations = BTreeMap<ItemId, u32>;

/// Take `qty` units off the shelf.
pub fn reserve(item: &mut Item, qty: u32) -> DomainResult<()> {
    if qty > item.quantity {
        return Err(DomainError::insufficient_stock(
            item.id_typed(),
            item.name(),
            qty,
            item.quantity,
        ));
    }
    item.quantity -= qty;
    Ok(())
}

/// Put `qty` units back on the shelf.
pub fn release(item: &mut Item, qty: u32) -> DomainResult<()> {
    item.quantity = returned_quantity(item, qty)?;
    Ok(())
}

fn returned_quantity(item: &Item, qty: u32) -> DomainResult<u32> {
    item.quantity.checked_add(qty).ok_or_else(|| {
        DomainError::validation(format!(
            "stock count for {} (item {}) would overflow",
            item.name(),
            item.id_typed()
        ))
    })
}

/// Mutable view over the in-memory item collection.
#[derive(Debug)]
pub struct StockLedger<'a> {
    items: &'a mut [Item],
}

impl<'a> StockLedger<'a> {
    pub fn new(items: &'a mut [Item]) -> Self {
        Self { items }
    }

    pub fn available(&self, item_id: ItemId) -> Option<u32> {
        find_by_id(&*self.items, item_id).map(Item::quantity)
    }

    /// Check that every line can be satisfied without touching any quantity.
    pub fn check(&self, reservations: &Reservations) -> DomainResult<()> {
        for (&item_id, &qty) in reservations {
            let item = find_by_id(&*self.items, item_id)
                .ok_or_else(|| DomainError::not_found(format!("item {item_id}")))?;
            if qty > item.quantity() {
                return Err(DomainError::insufficient_stock(
                    item_id,
                    item.name(),
                    qty,
                    item.quantity(),
                ));
            }
        }
        Ok(())
    }

    /// Reserve every line, or nothing if any line cannot be satisfied.
    pub fn reserve_all(&mut self, reservations: &Reservations) -> DomainResult<()> {
        self.check(reservations)?;
        for (&item_id, &qty) in reservations {
            if let Some(item) = find_by_id_mut(&mut *self.items, item_id) {
                reserve(item, qty)?;
            }
        }
        Ok(())
    }

    /// Release every line back to stock, or nothing if any count would overflow.
    ///
    /// Lines whose item no longer exists are skipped and returned so the caller
    /// can report them.
    pub fn release_all(&mut self, reservations: &Reservations) -> DomainResult<Vec<ItemId>> {
        let mut missing = Vec::new();
        for (&item_id, &qty) in reservations {
            match find_by_id(&*self.items, item_id) {
                Some(item) => {
                    returned_quantity(item, qty)?;
                }
                None => missing.push(item_id),
            }
        }
        for (&item_id, &qty) in reservations {
            if let Some(item) = find_by_id_mut(&mut *self.items, item_id) {
                release(item, qty)?;
            }
        }
        Ok(missing)
    }

    /// Swap a rental's reservations from `original` to `requested`.
    ///
    /// Releases `original` first so the rental's own holdings count as
    /// available. If `requested` cannot be satisfied, the released units are
    /// taken back and the quantities end exactly where they started.
    pub fn rebook(&mut self, original: &Reservations, requested: &Reservations) -> DomainResult<()> {
        let missing = self.release_all(original)?;
        match self.reserve_all(requested) {
            Ok(()) => Ok(()),
            Err(err) => {
                for (&item_id, &qty) in original {
                    if missing.contains(&item_id) {
                        continue;
                    }
                    if let Some(item) = find_by_id_mut(&mut *self.items, item_id) {
                        reserve(item, qty)?;
                    }
                }
                Err(err)
            }
        }
    }
}
