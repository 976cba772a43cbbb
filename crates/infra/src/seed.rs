//! Sample data for a fresh install.

use chrono::{NaiveDate, Utc};

use spotlight_core::{CustomerId, DomainError, DomainResult, ItemId, Money, RentalId};
use spotlight_inventory::{Item, NewItem, Reservations};
use spotlight_parties::{Customer, CustomerDetails};
use spotlight_rentals::{DateRange, Rental, quote};

use crate::error::ServiceResult;
use crate::store::RecordStore;

/// Write the sample customers, items and rentals if the store is completely
/// empty. Returns whether anything was written.
///
/// Item quantities are what remains on the shelf with the sample rentals out.
pub fn seed_sample_data<S: RecordStore>(store: &S) -> ServiceResult<bool> {
    if !store.load_customers().is_empty()
        || !store.load_items().is_empty()
        || !store.load_rentals().is_empty()
    {
        return Ok(false);
    }

    let customers = sample_customers()?;
    let items = sample_items()?;
    let rentals = sample_rentals(&items)?;

    store.save_customers(&customers)?;
    store.save_items(&items)?;
    store.save_rentals(&rentals)?;

    tracing::info!(
        customers = customers.len(),
        items = items.len(),
        rentals = rentals.len(),
        "seeded sample data"
    );
    Ok(true)
}

fn sample_customers() -> DomainResult<Vec<Customer>> {
    [
        ("John", "Tucker", "555-0101"),
        ("Mike", "Howell", "555-0102"),
        ("Jane", "Smith", "555-0103"),
        ("Robert", "Brown", "555-0104"),
        ("Sarah", "Wilson", "555-0105"),
    ]
    .into_iter()
    .zip(1u64..)
    .map(|((first, last, phone), id)| -> DomainResult<Customer> {
        Ok(Customer::new(CustomerId::new(id), CustomerDetails::new(first, last, phone)?))
    })
    .collect()
}

fn sample_items() -> DomainResult<Vec<Item>> {
    [
        ("Stage (size 1)", "Stage", 5, 100),
        ("Stage (size 2)", "Stage", 3, 150),
        ("Microphone", "Audio", 10, 20),
        ("Microphone + stand", "Audio", 8, 25),
        ("Amplifier", "Audio", 4, 50),
        ("Spot Lights", "Lighting", 15, 35),
        ("Speaker", "Audio", 6, 40),
        ("Mixer", "Audio", 3, 60),
    ]
    .into_iter()
    .zip(1u64..)
    .map(|((name, kind, quantity, pounds), id)| -> DomainResult<Item> {
        let spec = NewItem::new(name, kind, quantity, Money::from_pounds(pounds))?;
        Ok(Item::new(ItemId::new(id), spec))
    })
    .collect()
}

fn sample_rentals(items: &[Item]) -> DomainResult<Vec<Rental>> {
    let sample = |id: u64, customer: u64, from: (i32, u32, u32), to: (i32, u32, u32), lines: &[(u64, u32)]| -> DomainResult<Rental> {
        let dates = DateRange::new(date(from)?, date(to)?)?;
        let reserved: Reservations = lines.iter().map(|&(i, q)| (ItemId::new(i), q)).collect();
        let total = quote(items, &reserved, &dates)?;
        Ok(Rental::new(
            RentalId::new(id),
            CustomerId::new(customer),
            "admin",
            dates,
            reserved,
            total,
            Utc::now(),
        ))
    };

    Ok(vec![
        sample(1, 1, (2025, 12, 31), (2026, 1, 2), &[(1, 1), (3, 2), (6, 4)][..])?,
        sample(2, 2, (2026, 1, 7), (2026, 1, 8), &[(2, 1), (4, 2), (5, 1)][..])?,
    ])
}

fn date((y, m, d): (i32, u32, u32)) -> DomainResult<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d)
        .ok_or_else(|| DomainError::validation(format!("invalid date {y}-{m}-{d}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryRecordStore;

    #[test]
    fn seeds_an_empty_store_once() {
        let store = InMemoryRecordStore::new();
        assert!(seed_sample_data(&store).unwrap());
        assert_eq!(store.load_customers().len(), 5);
        assert_eq!(store.load_items().len(), 8);
        assert_eq!(store.next_rental_id(), RentalId::new(3));

        assert!(!seed_sample_data(&store).unwrap());
        assert_eq!(store.load_customers().len(), 5);
    }

    #[test]
    fn sample_rentals_are_priced_consistently() {
        let store = InMemoryRecordStore::new();
        seed_sample_data(&store).unwrap();
        let rentals = store.load_rentals();

        // (100 + 2*20 + 4*35) per day over three days.
        assert_eq!(rentals[0].total_price(), Money::from_pounds(840));
        // (150 + 2*25 + 50) per day over two days.
        assert_eq!(rentals[1].total_price(), Money::from_pounds(500));
    }

    #[test]
    fn leaves_a_populated_store_alone() {
        let store = InMemoryRecordStore::new();
        let only = Item::new(
            ItemId::new(1),
            NewItem::new("Mixer", "Audio", 1, Money::from_pounds(60)).unwrap(),
        );
        store.save_items(&[only.clone()]).unwrap();

        assert!(!seed_sample_data(&store).unwrap());
        assert_eq!(store.load_items(), vec![only]);
        assert!(store.load_customers().is_empty());
    }
}
