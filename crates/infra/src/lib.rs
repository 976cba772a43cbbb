//! Infrastructure layer: record files, configuration, and the services that
//! orchestrate domain rules over them.

pub mod catalog;
pub mod config;
pub mod error;
pub mod rental_manager;
pub mod seed;
pub mod store;


pub use catalog::CatalogService;
pub use config::StoreConfig;
pub use error::{ServiceError, ServiceResult};
pub use rental_manager::RentalManager;
pub use seed::seed_sample_data;
pub use store::{Collection, InMemoryRecordStore, JsonFileStore, RecordStore, StoreError};
