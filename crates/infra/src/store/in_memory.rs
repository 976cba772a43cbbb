use std::collections::HashSet;
use std::sync::RwLock;

use spotlight_inventory::Item;
use spotlight_parties::Customer;
use spotlight_rentals::Rental;

use super::{Collection, RecordStore, StoreError};

/// In-memory record store for tests/dev.
///
/// Individual collections can be marked unavailable to simulate a failing
/// disk.
#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    customers: RwLock<Vec<Customer>>,
    items: RwLock<Vec<Item>>,
    rentals: RwLock<Vec<Rental>>,
    unavailable: RwLock<HashSet<Collection>>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make saves of `collection` fail (or succeed again).
    pub fn set_unavailable(&self, collection: Collection, unavailable: bool) {
        if let Ok(mut set) = self.unavailable.write() {
            if unavailable {
                set.insert(collection);
            } else {
                set.remove(&collection);
            }
        }
    }

    fn ensure_available(&self, collection: Collection) -> Result<(), StoreError> {
        match self.unavailable.read() {
            Ok(set) if set.contains(&collection) => Err(StoreError::Unavailable(collection)),
            Ok(_) => Ok(()),
            Err(_) => Err(StoreError::Unavailable(collection)),
        }
    }
}

fn snapshot<T: Clone>(lock: &RwLock<Vec<T>>) -> Vec<T> {
    lock.read().map(|v| v.clone()).unwrap_or_default()
}

fn replace<T: Clone>(lock: &RwLock<Vec<T>>, collection: Collection, records: &[T]) -> Result<(), StoreError> {
    let mut guard = lock.write().map_err(|_| StoreError::Unavailable(collection))?;
    *guard = records.to_vec();
    Ok(())
}

impl RecordStore for InMemoryRecordStore {
    fn load_customers(&self) -> Vec<Customer> {
        snapshot(&self.customers)
    }

    fn load_items(&self) -> Vec<Item> {
        snapshot(&self.items)
    }

    fn load_rentals(&self) -> Vec<Rental> {
        snapshot(&self.rentals)
    }

    fn save_customers(&self, customers: &[Customer]) -> Result<(), StoreError> {
        self.ensure_available(Collection::Customers)?;
        replace(&self.customers, Collection::Customers, customers)
    }

    fn save_items(&self, items: &[Item]) -> Result<(), StoreError> {
        self.ensure_available(Collection::Items)?;
        replace(&self.items, Collection::Items, items)
    }

    fn save_rentals(&self, rentals: &[Rental]) -> Result<(), StoreError> {
        self.ensure_available(Collection::Rentals)?;
        replace(&self.rentals, Collection::Rentals, rentals)
    }
}
