//! Reservation domain entity

use chrono::NaiveDate;

use super::client::Client;
use super::validation;
use super::vehicle::Vehicle;
use crate::shared::errors::DomainResult;

pub type ReservationId = i64;

/// A reservation placed by a client, optionally for a specific vehicle.
#[derive(Debug, Clone)]
pub struct Reservation {
    /// Store-generated key, `None` until the row is inserted
    pub id: Option<ReservationId>,
    /// Date the reservation was placed
    pub reservation_date: NaiveDate,
    /// Requested first rental day, never before `reservation_date`
    pub desired_start: NaiveDate,
    /// Requested last rental day, never before `desired_start`
    pub desired_end: NaiveDate,
    pub client: Client,
    /// Requested vehicle, when the client asked for a specific one
    pub vehicle: Option<Vehicle>,
}

impl Reservation {
    pub fn new(
        id: Option<ReservationId>,
        reservation_date: NaiveDate,
        desired_start: NaiveDate,
        desired_end: NaiveDate,
        client: Client,
        vehicle: Option<Vehicle>,
    ) -> DomainResult<Self> {
        validation::ordered_dates(
            "reservation_date",
            "desired_start",
            reservation_date,
            desired_start,
        )?;
        validation::ordered_dates("desired_start", "desired_end", desired_start, desired_end)?;
        Ok(Self {
            id,
            reservation_date,
            desired_start,
            desired_end,
            client,
            vehicle,
        })
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::vehicle::Availability;
    use rust_decimal::Decimal;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_client() -> Client {
        Client::new(
            Some(1),
            "Ana",
            "Gomez",
            "30123456",
            "addr",
            "1144556677",
            "ana@example.com",
        )
        .unwrap()
    }

    #[test]
    fn reservation_without_vehicle_is_valid() {
        let r = Reservation::new(
            Some(1),
            date(2024, 5, 1),
            date(2024, 5, 10),
            date(2024, 5, 12),
            sample_client(),
            None,
        )
        .unwrap();
        assert!(r.vehicle.is_none());
    }

    #[test]
    fn same_day_reservation_is_valid() {
        assert!(Reservation::new(
            None,
            date(2024, 5, 1),
            date(2024, 5, 1),
            date(2024, 5, 1),
            sample_client(),
            None,
        )
        .is_ok());
    }

    #[test]
    fn desired_start_before_reservation_date_is_rejected() {
        let err = Reservation::new(
            None,
            date(2024, 5, 10),
            date(2024, 5, 1),
            date(2024, 5, 12),
            sample_client(),
            None,
        )
        .unwrap_err();
        assert!(err.to_string().contains("desired_start"));
    }

    #[test]
    fn desired_end_before_desired_start_is_rejected() {
        assert!(Reservation::new(
            None,
            date(2024, 5, 1),
            date(2024, 5, 10),
            date(2024, 5, 9),
            sample_client(),
            None,
        )
        .is_err());
    }

    #[test]
    fn reservation_can_target_a_vehicle() {
        let vehicle = Vehicle::new(
            "ABC123",
            "Toyota",
            "Corolla",
            2021,
            Decimal::new(5000, 2),
            Availability::default(),
        )
        .unwrap();
        let r = Reservation::new(
            Some(2),
            date(2024, 5, 1),
            date(2024, 5, 10),
            date(2024, 5, 12),
            sample_client(),
            Some(vehicle),
        )
        .unwrap();
        assert_eq!(r.vehicle.as_ref().map(|v| v.plate.as_str()), Some("ABC123"));
    }
}
