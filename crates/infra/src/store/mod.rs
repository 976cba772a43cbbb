//! Record store: whole-collection persistence for customers, items and rentals.
//!
//! Every operation loads full collections, mutates them in memory and writes
//! them back whole. There is no merge and no locking; the last save wins.
//!
//! Reads never fail: a missing, unreadable or corrupt collection loads as
//! empty. Writes return [`StoreError`] so callers can surface the failure.

mod in_memory;
mod json_file;

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

use spotlight_core::{CustomerId, ItemId, RentalId, next_entity_id};
use spotlight_inventory::Item;
use spotlight_parties::Customer;
use spotlight_rentals::Rental;

pub use in_memory::InMemoryRecordStore;
pub use json_file::JsonFileStore;

/// The three persisted collections.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Collection {
    Customers,
    Items,
    Rentals,
}

impl core::fmt::Display for Collection {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            Collection::Customers => "customers",
            Collection::Items => "items",
            Collection::Rentals => "rentals",
        })
    }
}

/// A write to the backing storage failed.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to write {collection} to {}: {source}", path.display())]
    Io {
        collection: Collection,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize {collection}: {source}")]
    Serialize {
        collection: Collection,
        #[source]
        source: serde_json::Error,
    },

    #[error("{0} storage is unavailable")]
    Unavailable(Collection),
}

impl StoreError {
    pub fn collection(&self) -> Collection {
        match self {
            StoreError::Io { collection, .. } => *collection,
            StoreError::Serialize { collection, .. } => *collection,
            StoreError::Unavailable(collection) => *collection,
        }
    }
}

/// Bulk load/save of the three collections plus id helpers.
pub trait RecordStore {
    fn load_customers(&self) -> Vec<Customer>;
    fn load_items(&self) -> Vec<Item>;
    fn load_rentals(&self) -> Vec<Rental>;

    /// Replace the whole customers collection.
    fn save_customers(&self, customers: &[Customer]) -> Result<(), StoreError>;
    /// Replace the whole items collection.
    fn save_items(&self, items: &[Item]) -> Result<(), StoreError>;
    /// Replace the whole rentals collection.
    fn save_rentals(&self, rentals: &[Rental]) -> Result<(), StoreError>;

    fn next_customer_id(&self) -> CustomerId {
        next_entity_id(&self.load_customers())
    }

    fn next_item_id(&self) -> ItemId {
        next_entity_id(&self.load_items())
    }

    fn next_rental_id(&self) -> RentalId {
        next_entity_id(&self.load_rentals())
    }
}

impl<S> RecordStore for Arc<S>
where
    S: RecordStore + ?Sized,
{
    fn load_customers(&self) -> Vec<Customer> {
        (**self).load_customers()
    }

    fn load_items(&self) -> Vec<Item> {
        (**self).load_items()
    }

    fn load_rentals(&self) -> Vec<Rental> {
        (**self).load_rentals()
    }

    fn save_customers(&self, customers: &[Customer]) -> Result<(), StoreError> {
        (**self).save_customers(customers)
    }

    fn save_items(&self, items: &[Item]) -> Result<(), StoreError> {
        (**self).save_items(items)
    }

    fn save_rentals(&self, rentals: &[Rental]) -> Result<(), StoreError> {
        (**self).save_rentals(rentals)
    }
}
