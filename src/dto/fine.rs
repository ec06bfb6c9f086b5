//! Fine DTO

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{Fine, FineId, RentalId};

/// Fine view. The rental is referenced by key; callers who need the
/// whole rental graph fetch it separately.
#[derive(Debug, Serialize, Deserialize)]
pub struct FineDto {
    pub id: Option<FineId>,
    pub description: String,
    pub amount: Decimal,
    pub incident_date: NaiveDate,
    pub rental_id: Option<RentalId>,
}

impl FineDto {
    pub fn from_domain(fine: Fine) -> Self {
        Self {
            id: fine.id,
            description: fine.description,
            amount: fine.amount,
            incident_date: fine.incident_date,
            rental_id: fine.rental.id,
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Availability, Client, Employee, Rental, Vehicle};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_fine() -> Fine {
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
        let employee = Employee::new(Some(2), "Luis", "Perez", "27888999", "agent", None).unwrap();
        let vehicle = Vehicle::new(
            "ABC123",
            "Toyota",
            "Corolla",
            2021,
            Decimal::new(5000, 2),
            Availability::Unavailable,
        )
        .unwrap();
        let rental = Rental::new(
            Some(7),
            date(2024, 5, 1),
            date(2024, 5, 5),
            Decimal::new(25000, 2),
            date(2024, 4, 28),
            client,
            employee,
            vehicle,
        )
        .unwrap();
        Fine::new(
            Some(3),
            "Late return",
            Decimal::new(1500, 2),
            date(2024, 5, 6),
            rental,
        )
        .unwrap()
    }

    #[test]
    fn rental_travels_as_a_key_not_a_graph() {
        let json = serde_json::to_value(FineDto::from_domain(sample_fine())).unwrap();

        assert_eq!(json["id"], 3);
        assert_eq!(json["amount"], "15.00");
        assert_eq!(json["rental_id"], 7);
        assert!(json.get("rental").is_none());
    }
}
