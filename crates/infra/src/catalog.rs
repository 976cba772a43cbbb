//! Stock and customer maintenance outside the rental lifecycle.
//!
//! Deletion policy is the same for both record kinds: a stock item or a
//! customer referenced by any rental cannot be deleted. Delete or edit the
//! rentals first.

use spotlight_core::{CustomerId, DomainError, ItemId, find_by_id_mut, next_entity_id};
use spotlight_inventory::{Item, NewItem};
use spotlight_parties::{Customer, CustomerDetails};
use spotlight_rentals::Rental;

use crate::error::ServiceResult;
use crate::store::RecordStore;

#[derive(Debug)]
pub struct CatalogService<S> {
    store: S,
}

impl<S> CatalogService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<S: RecordStore> CatalogService<S> {
    pub fn items(&self) -> Vec<Item> {
        self.store.load_items()
    }

    pub fn customers(&self) -> Vec<Customer> {
        self.store.load_customers()
    }

    /// Add a new stock item. Names are unique ignoring case.
    pub fn register_item(&self, spec: NewItem) -> ServiceResult<Item> {
        let mut items = self.store.load_items();
        if let Some(existing) = items.iter().find(|i| i.has_name(spec.name())) {
            return Err(DomainError::conflict(format!(
                "an item named '{}' already exists (item {}); restock it instead",
                existing.name(),
                existing.id_typed()
            ))
            .into());
        }

        let item = Item::new(next_entity_id(&items), spec);
        items.push(item.clone());
        self.store.save_items(&items)?;

        tracing::info!(item_id = %item.id_typed(), name = %item.name(), quantity = item.quantity(), price = %item.price(), "stock item registered");
        Ok(item)
    }

    pub fn restock(&self, item_id: ItemId, amount: u32) -> ServiceResult<Item> {
        let mut items = self.store.load_items();
        let item = find_by_id_mut(&mut items, item_id)
            .ok_or_else(|| DomainError::not_found(format!("item {item_id}")))?;
        let old_quantity = item.quantity();
        item.restock(amount)?;
        let updated = item.clone();
        self.store.save_items(&items)?;

        tracing::info!(%item_id, old_quantity, new_quantity = updated.quantity(), "stock item restocked");
        Ok(updated)
    }

    pub fn delete_item(&self, item_id: ItemId) -> ServiceResult<Item> {
        let mut items = self.store.load_items();
        let position = items
            .iter()
            .position(|i| i.id_typed() == item_id)
            .ok_or_else(|| DomainError::not_found(format!("item {item_id}")))?;

        let in_use = self
            .store
            .load_rentals()
            .iter()
            .filter(|r| r.references_item(item_id))
            .count();
        if in_use > 0 {
            return Err(DomainError::in_use(format!(
                "'{}' appears in {in_use} rental(s); reduce its quantity to 0 instead",
                items[position].name()
            ))
            .into());
        }

        let removed = items.remove(position);
        self.store.save_items(&items)?;
        tracing::info!(%item_id, name = %removed.name(), "stock item deleted");
        Ok(removed)
    }

    pub fn update_customer(&self, customer_id: CustomerId, details: CustomerDetails) -> ServiceResult<Customer> {
        let mut customers = self.store.load_customers();
        let customer = find_by_id_mut(&mut customers, customer_id)
            .ok_or_else(|| DomainError::not_found(format!("customer {customer_id}")))?;
        let changed = customer.update_details(details);
        let updated = customer.clone();

        if changed {
            self.store.save_customers(&customers)?;
            tracing::info!(%customer_id, "customer details updated");
        }
        Ok(updated)
    }

    pub fn delete_customer(&self, customer_id: CustomerId) -> ServiceResult<Customer> {
        let mut customers = self.store.load_customers();
        let position = customers
            .iter()
            .position(|c| c.id_typed() == customer_id)
            .ok_or_else(|| DomainError::not_found(format!("customer {customer_id}")))?;

        let history = self.rentals_for_customer(customer_id);
        if !history.is_empty() {
            return Err(DomainError::in_use(format!(
                "{} has {} rental(s) on file",
                customers[position].fullname(),
                history.len()
            ))
            .into());
        }

        let removed = customers.remove(position);
        self.store.save_customers(&customers)?;
        tracing::info!(%customer_id, "customer deleted");
        Ok(removed)
    }

    pub fn rentals_for_customer(&self, customer_id: CustomerId) -> Vec<Rental> {
        self.store
            .load_rentals()
            .into_iter()
            .filter(|r| r.is_for_customer(customer_id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::NaiveDate;
    use spotlight_core::Money;
    use spotlight_rentals::{DateRange, RentalRequest};

    use super::*;
    use crate::error::ServiceError;
    use crate::rental_manager::RentalManager;
    use crate::store::InMemoryRecordStore;

    fn setup() -> (CatalogService<Arc<InMemoryRecordStore>>, RentalManager<Arc<InMemoryRecordStore>>) {
        let store = Arc::new(InMemoryRecordStore::new());
        (CatalogService::new(store.clone()), RentalManager::new(store))
    }

    fn amplifier() -> NewItem {
        NewItem::new("Amplifier", "Audio", 4, Money::from_pounds(50)).unwrap()
    }

    fn rent(manager: &RentalManager<Arc<InMemoryRecordStore>>, item_id: ItemId) -> Rental {
        let day = NaiveDate::from_ymd_opt(2026, 5, 1).unwrap();
        let req = RentalRequest::new(
            CustomerDetails::new("Robert", "Brown", "555-0104").unwrap(),
            DateRange::new(day, day).unwrap(),
        )
        .with_item(item_id, 1)
        .unwrap();
        manager.create(&req, "emp").unwrap()
    }

    #[test]
    fn register_assigns_ids_and_rejects_duplicate_names() {
        let (catalog, _) = setup();
        let first = catalog.register_item(amplifier()).unwrap();
        assert_eq!(first.id_typed(), ItemId::new(1));

        let dup = NewItem::new("AMPLIFIER", "Audio", 1, Money::from_pounds(5)).unwrap();
        let err = catalog.register_item(dup).unwrap_err();
        assert!(matches!(err, ServiceError::Domain(DomainError::Conflict(_))));
        assert_eq!(catalog.items().len(), 1);
    }

    #[test]
    fn restock_increments_persisted_quantity() {
        let (catalog, _) = setup();
        let item = catalog.register_item(amplifier()).unwrap();

        let restocked = catalog.restock(item.id_typed(), 6).unwrap();
        assert_eq!(restocked.quantity(), 10);
        assert_eq!(catalog.items()[0].quantity(), 10);

        assert!(matches!(
            catalog.restock(item.id_typed(), 0).unwrap_err(),
            ServiceError::Domain(DomainError::Validation(_))
        ));
        assert!(matches!(
            catalog.restock(ItemId::new(99), 1).unwrap_err(),
            ServiceError::Domain(DomainError::NotFound(_))
        ));
    }

    #[test]
    fn item_in_use_cannot_be_deleted() {
        let (catalog, manager) = setup();
        let item = catalog.register_item(amplifier()).unwrap();
        let rental = rent(&manager, item.id_typed());

        let err = catalog.delete_item(item.id_typed()).unwrap_err();
        assert!(matches!(err, ServiceError::Domain(DomainError::InUse(_))));

        manager.delete(rental.id_typed()).unwrap();
        catalog.delete_item(item.id_typed()).unwrap();
        assert!(catalog.items().is_empty());
    }

    #[test]
    fn customer_with_rentals_cannot_be_deleted() {
        let (catalog, manager) = setup();
        let item = catalog.register_item(amplifier()).unwrap();
        let rental = rent(&manager, item.id_typed());
        let customer_id = rental.customer_id();

        assert_eq!(catalog.rentals_for_customer(customer_id).len(), 1);
        let err = catalog.delete_customer(customer_id).unwrap_err();
        assert!(matches!(err, ServiceError::Domain(DomainError::InUse(_))));
        assert_eq!(manager.rentals().len(), 1);

        manager.delete(rental.id_typed()).unwrap();
        let removed = catalog.delete_customer(customer_id).unwrap();
        assert_eq!(removed.surname(), "Brown");
        assert!(catalog.customers().is_empty());
    }

    #[test]
    fn update_customer_keeps_id() {
        let (catalog, manager) = setup();
        let item = catalog.register_item(amplifier()).unwrap();
        let customer_id = rent(&manager, item.id_typed()).customer_id();

        let details = CustomerDetails::new("Bob", "Brown", "555-0104").unwrap();
        let updated = catalog.update_customer(customer_id, details).unwrap();
        assert_eq!(updated.id_typed(), customer_id);
        assert_eq!(catalog.customers()[0].firstname(), "Bob");

        let err = catalog
            .update_customer(CustomerId::new(42), CustomerDetails::new("A", "B", "C").unwrap())
            .unwrap_err();
        assert!(matches!(err, ServiceError::Domain(DomainError::NotFound(_))));
    }
}
