//! Configuration loading and representation.

use std::path::{Path, PathBuf};

/// Environment variable naming the directory that holds the record files.
pub const DATA_DIR_ENV: &str = "SPOTLIGHT_DATA_DIR";

/// Where the three record collections live on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub data_dir: PathBuf,
    pub customers_file: String,
    pub items_file: String,
    pub rentals_file: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            customers_file: "customers.json".to_string(),
            items_file: "items.json".to_string(),
            rentals_file: "rentals.json".to_string(),
        }
    }
}

impl StoreConfig {
    /// Defaults, with the data directory taken from `SPOTLIGHT_DATA_DIR` if set.
    pub fn from_env() -> Self {
        match std::env::var(DATA_DIR_ENV) {
            Ok(dir) if !dir.trim().is_empty() => Self::in_dir(dir.trim()),
            _ => Self::default(),
        }
    }

    /// Defaults rooted at `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            data_dir: dir.as_ref().to_path_buf(),
            ..Self::default()
        }
    }

    pub fn customers_path(&self) -> PathBuf {
        self.data_dir.join(&self.customers_file)
    }

    pub fn items_path(&self) -> PathBuf {
        self.data_dir.join(&self.items_file)
    }

    pub fn rentals_path(&self) -> PathBuf {
        self.data_dir.join(&self.rentals_file)
    }
}
