use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

use spotlight_inventory::Item;
use spotlight_parties::Customer;
use spotlight_rentals::Rental;

use crate::config::StoreConfig;

use super::{Collection, RecordStore, StoreError};

/// Pretty-printed JSON file per collection.
///
/// Saves go through a sibling `.tmp` file and a rename, so a crash mid-write
/// leaves the previous file intact. A record that fails to parse or breaks its
/// type's invariants is skipped with a warning; the rest of the file loads.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    config: StoreConfig,
}

impl JsonFileStore {
    pub fn new(config: StoreConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    fn path_of(&self, collection: Collection) -> PathBuf {
        match collection {
            Collection::Customers => self.config.customers_path(),
            Collection::Items => self.config.items_path(),
            Collection::Rentals => self.config.rentals_path(),
        }
    }

    fn load<T: DeserializeOwned>(&self, collection: Collection) -> Vec<T> {
        let path = self.path_of(collection);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
            Err(err) => {
                tracing::warn!(%collection, path = %path.display(), error = %err, "unreadable record file; treating as empty");
                return Vec::new();
            }
        };

        let raw: Vec<serde_json::Value> = match serde_json::from_slice(&bytes) {
            Ok(raw) => raw,
            Err(err) => {
                tracing::warn!(%collection, path = %path.display(), error = %err, "corrupt record file; treating as empty");
                return Vec::new();
            }
        };

        raw.into_iter()
            .enumerate()
            .filter_map(|(index, value)| match serde_json::from_value(value) {
                Ok(record) => Some(record),
                Err(err) => {
                    tracing::warn!(%collection, path = %path.display(), index, error = %err, "invalid record skipped");
                    None
                }
            })
            .collect()
    }

    fn save<T: Serialize>(&self, collection: Collection, records: &[T]) -> Result<(), StoreError> {
        let path = self.path_of(collection);
        let json = serde_json::to_vec_pretty(records)
            .map_err(|source| StoreError::Serialize { collection, source })?;

        write_replacing(&path, &json).map_err(|source| StoreError::Io {
            collection,
            path: path.clone(),
            source,
        })?;

        tracing::debug!(%collection, records = records.len(), path = %path.display(), "saved collection");
        Ok(())
    }
}

fn write_replacing(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    {
        let mut file = fs::File::create(&tmp)?;
        file.write_all(bytes)?;
        file.sync_all()?;
    }
    fs::rename(&tmp, path)
}

impl RecordStore for JsonFileStore {
    fn load_customers(&self) -> Vec<Customer> {
        self.load(Collection::Customers)
    }

    fn load_items(&self) -> Vec<Item> {
        self.load(Collection::Items)
    }

    fn load_rentals(&self) -> Vec<Rental> {
        self.load(Collection::Rentals)
    }

    fn save_customers(&self, customers: &[Customer]) -> Result<(), StoreError> {
        self.save(Collection::Customers, customers)
    }

    fn save_items(&self, items: &[Item]) -> Result<(), StoreError> {
        self.save(Collection::Items, items)
    }

    fn save_rentals(&self, rentals: &[Rental]) -> Result<(), StoreError> {
        self.save(Collection::Rentals, rentals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use spotlight_core::{CustomerId, ItemId, Money, RentalId};
    use spotlight_inventory::{NewItem, Reservations};
    use spotlight_parties::CustomerDetails;
    use spotlight_rentals::DateRange;

    use crate::test_support::ScratchDir;

    fn store() -> (ScratchDir, JsonFileStore) {
        let dir = ScratchDir::new();
        let store = JsonFileStore::new(StoreConfig::in_dir(&dir));
        (dir, store)
    }

    fn sample_item(id: u64) -> Item {
        let draft = NewItem::new(format!("Speaker {id}"), "Audio", 6, Money::from_pence(4050)).unwrap();
        Item::new(ItemId::new(id), draft)
    }

    #[test]
    fn missing_files_load_as_empty() {
        let (_dir, store) = store();
        assert!(store.load_customers().is_empty());
        assert!(store.load_items().is_empty());
        assert!(store.load_rentals().is_empty());
        assert_eq!(store.next_rental_id(), RentalId::new(1));
    }

    #[test]
    fn corrupt_file_loads_as_empty() {
        let (_dir, store) = store();
        fs::create_dir_all(&store.config().data_dir).unwrap();
        fs::write(store.config().items_path(), b"[{\"item_id\": 1, \"na").unwrap();
        assert!(store.load_items().is_empty());
        assert_eq!(store.next_item_id(), ItemId::new(1));
    }

    #[test]
    fn rental_with_inverted_dates_is_skipped_on_load() {
        let (_dir, store) = store();
        fs::create_dir_all(&store.config().data_dir).unwrap();
        let records = serde_json::json!([
            {
                "rental_id": 1,
                "customer_id": 1,
                "employee": "admin",
                "start_date": "2026-01-10",
                "end_date": "2026-01-02",
                "items": {},
                "total_price": 0
            },
            {
                "rental_id": 2,
                "customer_id": 1,
                "employee": "admin",
                "start_date": "2026-01-02",
                "end_date": "2026-01-03",
                "items": { "1": 2 },
                "total_price": 4000
            }
        ]);
        fs::write(store.config().rentals_path(), records.to_string()).unwrap();

        let rentals = store.load_rentals();
        assert_eq!(rentals.len(), 1);
        assert_eq!(rentals[0].id_typed(), RentalId::new(2));
        assert_eq!(rentals[0].dates().duration_days(), 2);
    }

    #[test]
    fn items_round_trip_exactly() {
        let (_dir, store) = store();
        let items = vec![sample_item(1), sample_item(2)];
        store.save_items(&items).unwrap();
        store.save_items(&store.load_items()).unwrap();
        assert_eq!(store.load_items(), items);
        assert_eq!(store.next_item_id(), ItemId::new(3));
    }

    #[test]
    fn customers_and_rentals_round_trip_with_dates() {
        let (_dir, store) = store();
        let customers = vec![Customer::new(
            CustomerId::new(1),
            CustomerDetails::new("Sarah", "Wilson", "555-0105").unwrap(),
        )];
        let mut lines = Reservations::new();
        lines.insert(ItemId::new(2), 3);
        let rentals = vec![Rental::new(
            RentalId::new(1),
            CustomerId::new(1),
            "admin",
            DateRange::new(
                NaiveDate::from_ymd_opt(2025, 12, 31).unwrap(),
                NaiveDate::from_ymd_opt(2026, 1, 2).unwrap(),
            )
            .unwrap(),
            lines,
            Money::from_pence(36450),
            Utc.with_ymd_and_hms(2025, 12, 30, 9, 15, 0).unwrap(),
        )];

        store.save_customers(&customers).unwrap();
        store.save_rentals(&rentals).unwrap();

        assert_eq!(store.load_customers(), customers);
        assert_eq!(store.load_rentals(), rentals);
    }

    #[test]
    fn save_replaces_rather_than_merges() {
        let (_dir, store) = store();
        store.save_items(&[sample_item(1), sample_item(2), sample_item(3)]).unwrap();
        store.save_items(&[sample_item(1), sample_item(2)]).unwrap();
        assert_eq!(store.load_items().len(), 2);
        assert_eq!(store.next_item_id(), ItemId::new(3));
    }

    #[test]
    fn write_failure_is_reported() {
        let dir = ScratchDir::new();
        fs::create_dir_all(dir.path()).unwrap();
        // A plain file where the data directory should be.
        let blocker = dir.path().join("not-a-dir");
        fs::write(&blocker, b"x").unwrap();
        let store = JsonFileStore::new(StoreConfig::in_dir(&blocker));

        let err = store.save_items(&[sample_item(1)]).unwrap_err();
        assert_eq!(err.collection(), Collection::Items);
        assert!(matches!(err, StoreError::Io { .. }));
    }
}
