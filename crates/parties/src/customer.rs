use serde::{Deserialize, Serialize};

use spotlight_core::{CustomerId, DomainError, DomainResult, Entity, ValueObject};

/// Name and phone number identifying a customer at the front desk.
///
/// All three fields are trimmed and required. Two details are the same person
/// when every field matches ignoring case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerDetails {
    pub firstname: String,
    pub surname: String,
    pub phone: String,
}

impl ValueObject for CustomerDetails {}

impl CustomerDetails {
    pub fn new(
        firstname: impl Into<String>,
        surname: impl Into<String>,
        phone: impl Into<String>,
    ) -> DomainResult<Self> {
        let firstname = required("first name", firstname.into())?;
        let surname = required("surname", surname.into())?;
        let phone = required("phone", phone.into())?;
        Ok(Self {
            firstname,
            surname,
            phone,
        })
    }

    /// Case-insensitive identity match on (firstname, surname, phone).
    pub fn same_person(&self, other: &CustomerDetails) -> bool {
        eq_ignore_case(&self.firstname, &other.firstname)
            && eq_ignore_case(&self.surname, &other.surname)
            && eq_ignore_case(&self.phone, &other.phone)
    }

    pub fn fullname(&self) -> String {
        format!("{} {}", self.firstname, self.surname)
    }
}

fn required(field: &str, value: String) -> DomainResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation(format!("{field} is required")));
    }
    Ok(trimmed.to_string())
}

fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// Customer record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    customer_id: CustomerId,
    #[serde(flatten)]
    details: CustomerDetails,
}

impl Customer {
    pub fn new(customer_id: CustomerId, details: CustomerDetails) -> Self {
        Self {
            customer_id,
            details,
        }
    }

    pub fn id_typed(&self) -> CustomerId {
        self.customer_id
    }

    pub fn details(&self) -> &CustomerDetails {
        &self.details
    }

    pub fn firstname(&self) -> &str {
        &self.details.firstname
    }

    pub fn surname(&self) -> &str {
        &self.details.surname
    }

    pub fn phone(&self) -> &str {
        &self.details.phone
    }

    pub fn fullname(&self) -> String {
        self.details.fullname()
    }

    pub fn matches(&self, details: &CustomerDetails) -> bool {
        self.details.same_person(details)
    }

    /// Replace the stored details, keeping the id. Returns whether anything changed.
    pub fn update_details(&mut self, details: CustomerDetails) -> bool {
        if self.details == details {
            return false;
        }
        self.details = details;
        true
    }
}

impl Entity for Customer {
    type Id = CustomerId;

    fn id(&self) -> CustomerId {
        self.customer_id
    }
}

/// Find the customer matching `details`, if one is on file.
pub fn find_matching<'a>(customers: &'a [Customer], details: &CustomerDetails) -> Option<&'a Customer> {
    customers.iter().find(|c| c.matches(details))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn john() -> CustomerDetails {
        CustomerDetails::new("John", "Tucker", "555-0101").unwrap()
    }

    #[test]
    fn details_are_trimmed_and_required() {
        let d = CustomerDetails::new("  Jane ", "Smith ", " 555-0103").unwrap();
        assert_eq!(d.fullname(), "Jane Smith");
        assert_eq!(d.phone, "555-0103");

        for (f, s, p) in [("", "Smith", "1"), ("Jane", "  ", "1"), ("Jane", "Smith", "")] {
            assert!(matches!(
                CustomerDetails::new(f, s, p),
                Err(DomainError::Validation(_))
            ));
        }
    }

    #[test]
    fn identity_match_ignores_case_only() {
        let shouting = CustomerDetails::new("JOHN", "tucker", "555-0101").unwrap();
        assert!(john().same_person(&shouting));

        let other_phone = CustomerDetails::new("John", "Tucker", "555-0199").unwrap();
        assert!(!john().same_person(&other_phone));
    }

    #[test]
    fn find_matching_reuses_existing_record() {
        let customers = vec![
            Customer::new(CustomerId::new(1), john()),
            Customer::new(
                CustomerId::new(2),
                CustomerDetails::new("Mike", "Howell", "555-0102").unwrap(),
            ),
        ];
        let probe = CustomerDetails::new("mike", "HOWELL", "555-0102").unwrap();
        assert_eq!(
            find_matching(&customers, &probe).map(Customer::id_typed),
            Some(CustomerId::new(2))
        );
    }

    #[test]
    fn update_details_reports_changes() {
        let mut c = Customer::new(CustomerId::new(1), john());
        assert!(!c.update_details(john()));
        let moved = CustomerDetails::new("John", "Tucker", "555-0999").unwrap();
        assert!(c.update_details(moved));
        assert_eq!(c.phone(), "555-0999");
        assert_eq!(c.id_typed(), CustomerId::new(1));
    }

    #[test]
    fn serializes_as_flat_record() {
        let json = serde_json::to_value(Customer::new(CustomerId::new(1), john())).unwrap();
        assert_eq!(json["customer_id"], 1);
        assert_eq!(json["surname"], "Tucker");
    }
}
