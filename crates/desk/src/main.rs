//! Command-line front desk over the record files.

mod args;

use clap::Parser;

use spotlight_inventory::{Item, NewItem};
use spotlight_infra::{
    CatalogService, JsonFileStore, RentalManager, ServiceError, StoreConfig, seed_sample_data,
};
use spotlight_parties::Customer;
use spotlight_rentals::Rental;

use args::{Cli, Commands};

fn main() -> anyhow::Result<()> {
    spotlight_observability::init();

    let cli = Cli::parse();
    let config = match &cli.data_dir {
        Some(dir) => StoreConfig::in_dir(dir),
        None => StoreConfig::from_env(),
    };
    tracing::debug!(data_dir = %config.data_dir.display(), "using record files");

    let store = JsonFileStore::new(config);
    run(cli.command, store).map_err(|err| match err {
        ServiceError::Persistence(_) => anyhow::Error::new(err).context("changes may not have been saved"),
        other => anyhow::Error::new(other),
    })
}

fn run(command: Commands, store: JsonFileStore) -> Result<(), ServiceError> {
    let catalog = CatalogService::new(store.clone());
    let rentals = RentalManager::new(store);

    match command {
        Commands::Seed => {
            if seed_sample_data(rentals.store())? {
                println!("Sample data written.");
            } else {
                println!("Data directory already has records; nothing seeded.");
            }
        }
        Commands::Items => catalog.items().iter().for_each(print_item),
        Commands::AddItem {
            name,
            item_type,
            quantity,
            price,
        } => {
            let item = catalog.register_item(NewItem::new(name, item_type, quantity, price)?)?;
            print_item(&item);
        }
        Commands::Restock { item_id, amount } => print_item(&catalog.restock(item_id, amount)?),
        Commands::DeleteItem { item_id } => {
            let item = catalog.delete_item(item_id)?;
            println!("Deleted {}.", item.name());
        }
        Commands::Customers => catalog.customers().iter().for_each(print_customer),
        Commands::UpdateCustomer {
            customer_id,
            details,
        } => print_customer(&catalog.update_customer(customer_id, details.to_details()?)?),
        Commands::DeleteCustomer { customer_id } => {
            let customer = catalog.delete_customer(customer_id)?;
            println!("Deleted {}.", customer.fullname());
        }
        Commands::Rentals => {
            let items = catalog.items();
            let customers = catalog.customers();
            for rental in rentals.rentals() {
                print_rental(&rental, &items, &customers);
            }
        }
        Commands::Rent { rental, employee } => {
            let created = rentals.create(&rental.to_request()?, &employee)?;
            print_rental(&created, &catalog.items(), &catalog.customers());
        }
        Commands::Edit { rental_id, rental } => {
            let edited = rentals.edit(rental_id, &rental.to_request()?)?;
            print_rental(&edited, &catalog.items(), &catalog.customers());
        }
        Commands::Cancel { rental_id } => {
            rentals.delete(rental_id)?;
            println!("Rental {rental_id} cancelled; items returned to stock.");
        }
    }
    Ok(())
}

fn print_item(item: &Item) {
    println!(
        "#{:<3} {:<24} {:<10} {:>9}/day  {} available",
        item.id_typed(),
        item.name(),
        item.item_type(),
        item.price().to_string(),
        item.quantity()
    );
}

fn print_customer(customer: &Customer) {
    println!(
        "#{:<3} {:<28} {}",
        customer.id_typed(),
        customer.fullname(),
        customer.phone()
    );
}

fn print_rental(rental: &Rental, items: &[Item], customers: &[Customer]) {
    let dates = rental.dates();
    let customer = spotlight_core::find_by_id(customers, rental.customer_id())
        .map(Customer::fullname)
        .unwrap_or_else(|| format!("customer {}", rental.customer_id()));
    println!(
        "Rental #{} for {} ({} to {}, {} day(s)) by {}: {}",
        rental.id_typed(),
        customer,
        dates.start_date(),
        dates.end_date(),
        dates.duration_days(),
        rental.employee(),
        rental.total_price()
    );
    for (&item_id, &qty) in rental.items() {
        match spotlight_core::find_by_id(items, item_id) {
            Some(item) => println!("  - {} x{} @ {}/day", item.name(), qty, item.price()),
            None => println!("  - item {item_id} x{qty}"),
        }
    }
}
