//! Rentals domain module.
//!
//! Rental records, the inclusive date range they cover, and how they are priced.
//! Pure domain logic (no IO, no storage).

pub mod rental;

pub use rental::{DateRange, Rental, RentalRequest, quote, validate_reservations};
