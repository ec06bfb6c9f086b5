//! Reservation DTO

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{Reservation, ReservationId};

use super::{ClientDto, VehicleDto};

#[derive(Debug, Serialize, Deserialize)]
pub struct ReservationDto {
    pub id: Option<ReservationId>,
    pub reservation_date: NaiveDate,
    pub desired_start: NaiveDate,
    pub desired_end: NaiveDate,
    pub client: ClientDto,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle: Option<VehicleDto>,
}

impl ReservationDto {
    pub fn from_domain(reservation: Reservation) -> Self {
        Self {
            id: reservation.id,
            reservation_date: reservation.reservation_date,
            desired_start: reservation.desired_start,
            desired_end: reservation.desired_end,
            client: ClientDto::from_domain(reservation.client),
            vehicle: reservation.vehicle.map(VehicleDto::from_domain),
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Client;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn open_choice_omits_the_vehicle_field() {
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
        let reservation = Reservation::new(
            Some(3),
            date(2024, 5, 1),
            date(2024, 5, 10),
            date(2024, 5, 12),
            client,
            None,
        )
        .unwrap();

        let json = serde_json::to_value(ReservationDto::from_domain(reservation)).unwrap();
        assert_eq!(json["desired_start"], "2024-05-10");
        assert!(json.get("vehicle").is_none());
    }
}
