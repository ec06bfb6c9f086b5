//! Fine domain entity

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::rental::Rental;
use super::validation;
use crate::shared::errors::DomainResult;

pub type FineId = i64;

/// A fine charged against a rental (damage, late return, infractions).
#[derive(Debug, Clone)]
pub struct Fine {
    /// Store-generated key, `None` until the row is inserted
    pub id: Option<FineId>,
    /// What happened, trimmed and never empty
    pub description: String,
    /// Strictly positive amount
    pub amount: Decimal,
    pub incident_date: NaiveDate,
    /// The rental this fine belongs to
    pub rental: Rental,
}

impl Fine {
    pub fn new(
        id: Option<FineId>,
        description: impl Into<String>,
        amount: Decimal,
        incident_date: NaiveDate,
        rental: Rental,
    ) -> DomainResult<Self> {
        let description = validation::required_text("description", &description.into())?;
        validation::positive("amount", amount)?;
        Ok(Self {
            id,
            description,
            amount,
            incident_date,
            rental,
        })
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::client::Client;
    use crate::domain::employee::Employee;
    use crate::domain::vehicle::{Availability, Vehicle};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_rental() -> Rental {
        let client = Client::new(
            Some(1),
            "Ana",
            "Gomez",
            "30123456",
            "addr",
            "1144556677",
            "ana@example.com",
        )
        .unwrap();
        let employee = Employee::new(Some(1), "Luis", "Perez", "27888999", "agent", None).unwrap();
        let vehicle = Vehicle::new(
            "ABC123",
            "Toyota",
            "Corolla",
            2021,
            Decimal::new(5000, 2),
            Availability::default(),
        )
        .unwrap();
        Rental::new(
            Some(1),
            date(2024, 5, 1),
            date(2024, 5, 5),
            Decimal::new(25000, 2),
            date(2024, 4, 30),
            client,
            employee,
            vehicle,
        )
        .unwrap()
    }

    #[test]
    fn description_is_trimmed() {
        let f = Fine::new(
            Some(1),
            "  scratched door  ",
            Decimal::new(10000, 2),
            date(2024, 5, 3),
            sample_rental(),
        )
        .unwrap();
        assert_eq!(f.description, "scratched door");
    }

    #[test]
    fn empty_description_is_rejected() {
        assert!(Fine::new(
            None,
            "   ",
            Decimal::new(10000, 2),
            date(2024, 5, 3),
            sample_rental()
        )
        .is_err());
    }

    #[test]
    fn zero_amount_is_rejected() {
        let err = Fine::new(
            None,
            "late return",
            Decimal::ZERO,
            date(2024, 5, 3),
            sample_rental(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("amount"));
    }
}
