//! Parties domain module: the rental business's customers.

pub mod customer;

pub use customer::{Customer, CustomerDetails, find_matching};
