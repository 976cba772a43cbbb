//! Rental lifecycle: create, edit and delete rentals while keeping stock and
//! customer records consistent.
//!
//! ```text
//! request
//!   ↓
//! 1. Validate input (customer details, dates, non-empty positive lines)
//!   ↓
//! 2. Load customers, items and rentals from the store
//!   ↓
//! 3. Reserve / rebook / release stock in memory (all-or-nothing)
//!   ↓
//! 4. Price the rental, assign ids
//!   ↓
//! 5. Save customers (if changed), then items and rentals as one bundle
//! ```
//!
//! Nothing is written until every domain check has passed, so a domain error
//! never leaves a partial change behind. If the rentals save fails after the
//! items save succeeded, the previous items collection is written back before
//! the error is returned. A customer saved in step 5 is rolled back the same
//! way when the bundle fails.

use chrono::Utc;

use spotlight_core::{DomainError, RentalId, find_by_id, find_by_id_mut, next_entity_id};
use spotlight_inventory::{Item, StockLedger};
use spotlight_parties::{Customer, find_matching};
use spotlight_rentals::{Rental, RentalRequest, quote};

use crate::error::{ServiceError, ServiceResult};
use crate::store::RecordStore;

/// Orchestrates the rental lifecycle over a [`RecordStore`].
#[derive(Debug)]
pub struct RentalManager<S> {
    store: S,
}

impl<S> RentalManager<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}

impl<S: RecordStore> RentalManager<S> {
    pub fn rentals(&self) -> Vec<Rental> {
        self.store.load_rentals()
    }

    pub fn rental(&self, rental_id: RentalId) -> ServiceResult<Rental> {
        let rentals = self.store.load_rentals();
        find_by_id(&rentals, rental_id)
            .cloned()
            .ok_or_else(|| DomainError::not_found(format!("rental {rental_id}")).into())
    }

    /// Create a rental for `request`, attributed to `employee`.
    ///
    /// Reuses the customer matching the request's details (case-insensitive) or
    /// registers a new one.
    pub fn create(&self, request: &RentalRequest, employee: &str) -> ServiceResult<Rental> {
        request.validate()?;

        let customers_before = self.store.load_customers();
        let mut customers = customers_before.clone();
        let items_before = self.store.load_items();
        let mut rentals = self.store.load_rentals();

        let mut items = items_before.clone();
        let total_price = quote(&items, &request.items, &request.dates)?;
        if let Err(err) = StockLedger::new(&mut items).reserve_all(&request.items) {
            tracing::warn!(error = %err, "rental rejected");
            return Err(err.into());
        }

        let (customer_id, registered) = match find_matching(&customers, &request.customer) {
            Some(existing) => (existing.id_typed(), false),
            None => {
                let customer_id = next_entity_id(&customers);
                customers.push(Customer::new(customer_id, request.customer.clone()));
                self.store.save_customers(&customers)?;
                tracing::info!(%customer_id, name = %request.customer.fullname(), "customer registered");
                (customer_id, true)
            }
        };

        let rental = Rental::new(
            next_entity_id(&rentals),
            customer_id,
            employee,
            request.dates,
            request.items.clone(),
            total_price,
            Utc::now(),
        );
        rentals.push(rental.clone());
        if let Err(err) = save_stock_and_rentals(&self.store, &items_before, &items, &rentals) {
            if registered {
                restore_customers(&self.store, &customers_before);
            }
            return Err(err);
        }

        tracing::info!(
            rental_id = %rental.id_typed(),
            %customer_id,
            %employee,
            total = %total_price,
            days = request.dates.duration_days(),
            "rental created"
        );
        Ok(rental)
    }

    /// Replace the customer details, dates and items of an existing rental.
    ///
    /// The rental's current holdings are released before the new lines are
    /// reserved, so they count as available. On a shortage every quantity is
    /// put back and nothing is saved.
    pub fn edit(&self, rental_id: RentalId, request: &RentalRequest) -> ServiceResult<Rental> {
        request.validate()?;

        let customers_before = self.store.load_customers();
        let mut customers = customers_before.clone();
        let items_before = self.store.load_items();
        let mut rentals = self.store.load_rentals();

        let rental = find_by_id_mut(&mut rentals, rental_id)
            .ok_or_else(|| DomainError::not_found(format!("rental {rental_id}")))?;
        let customer_id = rental.customer_id();
        let customer = find_by_id_mut(&mut customers, customer_id)
            .ok_or_else(|| DomainError::not_found(format!("customer {customer_id}")))?;

        let mut items = items_before.clone();
        let total_price = quote(&items, &request.items, &request.dates)?;
        if let Err(err) = StockLedger::new(&mut items).rebook(rental.items(), &request.items) {
            tracing::warn!(%rental_id, error = %err, "rental edit rejected");
            return Err(err.into());
        }

        let customer_changed = customer.update_details(request.customer.clone());
        rental.revise(request.dates, request.items.clone(), total_price);
        let updated = rental.clone();

        if customer_changed {
            self.store.save_customers(&customers)?;
            tracing::info!(%customer_id, "customer details updated");
        }
        if let Err(err) = save_stock_and_rentals(&self.store, &items_before, &items, &rentals) {
            if customer_changed {
                restore_customers(&self.store, &customers_before);
            }
            return Err(err);
        }

        tracing::info!(%rental_id, total = %total_price, "rental edited");
        Ok(updated)
    }

    /// Remove a rental and put its reserved units back on the shelf.
    pub fn delete(&self, rental_id: RentalId) -> ServiceResult<Rental> {
        let items_before = self.store.load_items();
        let mut rentals = self.store.load_rentals();

        let position = rentals
            .iter()
            .position(|r| r.id_typed() == rental_id)
            .ok_or_else(|| DomainError::not_found(format!("rental {rental_id}")))?;
        let removed = rentals.remove(position);

        let mut items = items_before.clone();
        let missing = StockLedger::new(&mut items).release_all(removed.items())?;
        if !missing.is_empty() {
            tracing::warn!(%rental_id, ?missing, "released lines reference items no longer in stock");
        }

        save_stock_and_rentals(&self.store, &items_before, &items, &rentals)?;
        tracing::info!(%rental_id, "rental deleted");
        Ok(removed)
    }
}

/// Save items then rentals; if rentals fail, put the previous items back.
fn save_stock_and_rentals<S: RecordStore>(
    store: &S,
    items_before: &[Item],
    items: &[Item],
    rentals: &[Rental],
) -> Result<(), ServiceError> {
    store.save_items(items)?;
    if let Err(err) = store.save_rentals(rentals) {
        tracing::error!(error = %err, "rentals save failed; restoring previous stock levels");
        if let Err(undo) = store.save_items(items_before) {
            tracing::error!(error = %undo, "failed to restore stock levels; items and rentals may disagree");
        }
        return Err(ServiceError::Persistence(err));
    }
    Ok(())
}

fn restore_customers<S: RecordStore>(store: &S, customers_before: &[Customer]) {
    tracing::error!("restoring previous customer records");
    if let Err(undo) = store.save_customers(customers_before) {
        tracing::error!(error = %undo, "failed to restore customer records");
    }
}
