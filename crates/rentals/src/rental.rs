use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use spotlight_core::{
    CustomerId, DomainError, DomainResult, Entity, ItemId, Money, RentalId, ValueObject,
    find_by_id,
};
use spotlight_inventory::{Item, Reservations};
use spotlight_parties::CustomerDetails;

/// Inclusive rental period. `end_date >= start_date` always holds.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct DateRange {
    start_date: NaiveDate,
    end_date: NaiveDate,
}

impl ValueObject for DateRange {}

impl DateRange {
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> DomainResult<Self> {
        if end_date < start_date {
            return Err(DomainError::validation(format!(
                "end date {end_date} cannot be before start date {start_date}"
            )));
        }
        Ok(Self {
            start_date,
            end_date,
        })
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    /// Both endpoints counted: a same-day rental lasts one day.
    pub fn duration_days(&self) -> u64 {
        // end_date >= start_date, so the span is never negative.
        (self.end_date - self.start_date).num_days().unsigned_abs() + 1
    }
}

/// Customer, dates and items collected by the front desk to create or edit a rental.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RentalRequest {
    pub customer: CustomerDetails,
    pub dates: DateRange,
    pub items: Reservations,
}

impl RentalRequest {
    pub fn new(customer: CustomerDetails, dates: DateRange) -> Self {
        Self {
            customer,
            dates,
            items: Reservations::new(),
        }
    }

    /// Add units of an item; adding the same item again tallies the quantities.
    pub fn add_item(&mut self, item_id: ItemId, quantity: u32) -> DomainResult<()> {
        if quantity == 0 {
            return Err(DomainError::validation(format!(
                "quantity for item {item_id} must be positive"
            )));
        }
        let entry = self.items.entry(item_id).or_insert(0);
        *entry = entry.checked_add(quantity).ok_or_else(|| {
            DomainError::validation(format!("quantity for item {item_id} is too large"))
        })?;
        Ok(())
    }

    pub fn with_item(mut self, item_id: ItemId, quantity: u32) -> DomainResult<Self> {
        self.add_item(item_id, quantity)?;
        Ok(self)
    }

    /// Rules shared by create and edit.
    pub fn validate(&self) -> DomainResult<()> {
        validate_reservations(&self.items)
    }
}

/// A rental holds at least one line and every line reserves at least one unit.
pub fn validate_reservations(items: &Reservations) -> DomainResult<()> {
    if items.is_empty() {
        return Err(DomainError::validation("a rental needs at least one item"));
    }
    if let Some((item_id, _)) = items.iter().find(|(_, q)| **q == 0) {
        return Err(DomainError::validation(format!(
            "quantity for item {item_id} must be positive"
        )));
    }
    Ok(())
}

/// `duration_days * sum(price * quantity)` over the reserved lines.
///
/// A total that does not fit in [`Money`] is rejected rather than clamped.
pub fn quote(items: &[Item], reservations: &Reservations, dates: &DateRange) -> DomainResult<Money> {
    let too_large = || DomainError::validation("rental total too large");
    let lines = reservations
        .iter()
        .map(|(&item_id, &qty)| {
            let item = find_by_id(items, item_id)
                .ok_or_else(|| DomainError::not_found(format!("item {item_id}")))?;
            item.price().checked_times(u64::from(qty)).ok_or_else(too_large)
        })
        .collect::<DomainResult<Vec<Money>>>()?;
    Money::checked_sum(lines)
        .and_then(|per_day| per_day.checked_times(dates.duration_days()))
        .ok_or_else(too_large)
}

/// Rental record.
///
/// Deserialization goes through [`DateRange::new`] and
/// [`validate_reservations`], so a stored record with inverted dates or no
/// lines is refused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StoredRental")]
pub struct Rental {
    rental_id: RentalId,
    customer_id: CustomerId,
    employee: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
    items: Reservations,
    total_price: Money,
    creation_date: DateTime<Utc>,
}

impl Rental {
    pub fn new(
        rental_id: RentalId,
        customer_id: CustomerId,
        employee: impl Into<String>,
        dates: DateRange,
        items: Reservations,
        total_price: Money,
        creation_date: DateTime<Utc>,
    ) -> Self {
        Self {
            rental_id,
            customer_id,
            employee: employee.into(),
            start_date: dates.start_date(),
            end_date: dates.end_date(),
            items,
            total_price,
            creation_date,
        }
    }

    pub fn id_typed(&self) -> RentalId {
        self.rental_id
    }

    pub fn customer_id(&self) -> CustomerId {
        self.customer_id
    }

    pub fn employee(&self) -> &str {
        &self.employee
    }

    pub fn dates(&self) -> DateRange {
        DateRange {
            start_date: self.start_date,
            end_date: self.end_date,
        }
    }

    pub fn items(&self) -> &Reservations {
        &self.items
    }

    pub fn total_price(&self) -> Money {
        self.total_price
    }

    pub fn creation_date(&self) -> DateTime<Utc> {
        self.creation_date
    }

    pub fn references_item(&self, item_id: ItemId) -> bool {
        self.items.contains_key(&item_id)
    }

    pub fn is_for_customer(&self, customer_id: CustomerId) -> bool {
        self.customer_id == customer_id
    }

    /// Replace dates, items and price in place. Id, customer, employee and
    /// creation date are kept.
    pub fn revise(&mut self, dates: DateRange, items: Reservations, total_price: Money) {
        self.start_date = dates.start_date();
        self.end_date = dates.end_date();
        self.items = items;
        self.total_price = total_price;
    }
}

/// Rental as it appears on disk, before its invariants are checked.
#[derive(Deserialize)]
struct StoredRental {
    rental_id: RentalId,
    customer_id: CustomerId,
    employee: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
    items: Reservations,
    total_price: Money,
    #[serde(default = "Utc::now")]
    creation_date: DateTime<Utc>,
}

impl TryFrom<StoredRental> for Rental {
    type Error = DomainError;

    fn try_from(stored: StoredRental) -> DomainResult<Self> {
        let dates = DateRange::new(stored.start_date, stored.end_date)?;
        validate_reservations(&stored.items)?;
        Ok(Rental::new(
            stored.rental_id,
            stored.customer_id,
            stored.employee,
            dates,
            stored.items,
            stored.total_price,
            stored.creation_date,
        ))
    }
}

impl Entity for Rental {
    type Id = RentalId;

    fn id(&self) -> RentalId {
        self.rental_id
    }
}
