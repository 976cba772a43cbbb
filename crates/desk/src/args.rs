use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use spotlight_core::{CustomerId, DomainResult, ItemId, Money, RentalId};
use spotlight_parties::CustomerDetails;
use spotlight_rentals::{DateRange, RentalRequest};

#[derive(Parser)]
#[clap(author, version, about = "Spotlight Agency front desk", long_about = None)]
pub struct Cli {
    /// Directory holding the record files (overrides SPOTLIGHT_DATA_DIR).
    #[clap(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write sample records into an empty data directory.
    Seed,

    /// List stock items.
    Items,
    /// Register a new stock item.
    AddItem {
        #[clap(long)]
        name: String,
        #[clap(long = "type", default_value = "")]
        item_type: String,
        #[clap(long, default_value_t = 0)]
        quantity: u32,
        /// Per-day price, e.g. 12.50
        #[clap(long)]
        price: Money,
    },
    /// Add units to a stock item.
    Restock { item_id: ItemId, amount: u32 },
    /// Delete a stock item no rental references.
    DeleteItem { item_id: ItemId },

    /// List customers.
    Customers,
    /// Change a customer's name or phone.
    UpdateCustomer {
        customer_id: CustomerId,
        #[clap(flatten)]
        details: CustomerArgs,
    },
    /// Delete a customer with no rentals on file.
    DeleteCustomer { customer_id: CustomerId },

    /// List rentals.
    Rentals,
    /// Create a rental.
    Rent {
        #[clap(flatten)]
        rental: RentalArgs,
        /// Acting employee recorded on the rental.
        #[clap(long, default_value = "admin")]
        employee: String,
    },
    /// Replace the customer, dates and items of a rental.
    Edit {
        rental_id: RentalId,
        #[clap(flatten)]
        rental: RentalArgs,
    },
    /// Delete a rental and return its items to stock.
    Cancel { rental_id: RentalId },
}

#[derive(Args)]
pub struct CustomerArgs {
    #[clap(long)]
    pub firstname: String,
    #[clap(long)]
    pub surname: String,
    #[clap(long)]
    pub phone: String,
}

impl CustomerArgs {
    pub fn to_details(&self) -> DomainResult<CustomerDetails> {
        CustomerDetails::new(&self.firstname, &self.surname, &self.phone)
    }
}

#[derive(Args)]
pub struct RentalArgs {
    #[clap(flatten)]
    pub customer: CustomerArgs,
    /// First day, YYYY-MM-DD.
    #[clap(long)]
    pub from: NaiveDate,
    /// Last day (inclusive), YYYY-MM-DD.
    #[clap(long)]
    pub to: NaiveDate,
    /// ITEM_ID=QUANTITY, repeatable.
    #[clap(long = "item", value_parser = parse_line, required = true)]
    pub items: Vec<(ItemId, u32)>,
}

impl RentalArgs {
    pub fn to_request(&self) -> DomainResult<RentalRequest> {
        let mut request = RentalRequest::new(self.customer.to_details()?, DateRange::new(self.from, self.to)?);
        for &(item_id, quantity) in &self.items {
            request.add_item(item_id, quantity)?;
        }
        Ok(request)
    }
}

fn parse_line(raw: &str) -> Result<(ItemId, u32), String> {
    let (id, qty) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected ITEM_ID=QUANTITY, got {raw:?}"))?;
    let item_id = id.parse::<ItemId>().map_err(|e| e.to_string())?;
    let quantity = qty
        .trim()
        .parse::<u32>()
        .map_err(|e| format!("quantity {qty:?}: {e}"))?;
    Ok((item_id, quantity))
}
