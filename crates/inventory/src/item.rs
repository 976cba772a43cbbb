use serde::{Deserialize, Serialize};

use spotlight_core::{DomainError, DomainResult, Entity, ItemId, Money};

/// Stock item: a rentable unit type with a per-day price and an available quantity.
///
/// `quantity` is the only field that changes during rental operations, and only
/// through the [`crate::ledger`] functions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    item_id: ItemId,
    name: String,
    #[serde(rename = "type")]
    item_type: String,
    pub(crate) quantity: u32,
    price: Money,
}

impl Item {
    /// Build an item from validated registration input.
    pub fn new(item_id: ItemId, draft: NewItem) -> Self {
        Self {
            item_id,
            name: draft.name,
            item_type: draft.item_type,
            quantity: draft.quantity,
            price: draft.price,
        }
    }

    pub fn id_typed(&self) -> ItemId {
        self.item_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn item_type(&self) -> &str {
        &self.item_type
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Per-day rental rate.
    pub fn price(&self) -> Money {
        self.price
    }

    /// Case-insensitive name comparison (used to reject duplicate registrations).
    pub fn has_name(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.trim().to_lowercase()
    }

    /// Put more units on the shelf.
    pub fn restock(&mut self, amount: u32) -> DomainResult<()> {
        if amount == 0 {
            return Err(DomainError::validation("restock amount must be positive"));
        }
        crate::ledger::release(self, amount)
    }
}

impl Entity for Item {
    type Id = ItemId;

    fn id(&self) -> ItemId {
        self.item_id
    }
}

/// Validated input for registering a new stock item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItem {
    name: String,
    item_type: String,
    quantity: u32,
    price: Money,
}

impl NewItem {
    pub fn new(
        name: impl Into<String>,
        item_type: impl Into<String>,
        quantity: u32,
        price: Money,
    ) -> DomainResult<Self> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(DomainError::validation("item name is required"));
        }
        if price.is_zero() {
            return Err(DomainError::validation("rent price must be positive"));
        }
        Ok(Self {
            name,
            item_type: item_type.into().trim().to_string(),
            quantity,
            price,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}
