//! Inventory domain module.
//!
//! Stock items and the ledger that moves units between the shelf and rentals.
//! Pure domain logic (no IO, no storage).

pub mod item;
pub mod ledger;

pub use item::{Item, NewItem};
pub use ledger::{Reservations, StockLedger, release, reserve};
