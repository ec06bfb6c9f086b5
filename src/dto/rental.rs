//! Rental DTO

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{Rental, RentalId};

use super::{ClientDto, EmployeeDto, VehicleDto};

/// Rental view with its three partners nested in full.
#[derive(Debug, Serialize, Deserialize)]
pub struct RentalDto {
    pub id: Option<RentalId>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_cost: Decimal,
    pub created_date: NaiveDate,
    pub client: ClientDto,
    pub employee: EmployeeDto,
    pub vehicle: VehicleDto,
}

impl RentalDto {
    pub fn from_domain(rental: Rental) -> Self {
        Self {
            id: rental.id,
            start_date: rental.start_date,
            end_date: rental.end_date,
            total_cost: rental.total_cost,
            created_date: rental.created_date,
            client: ClientDto::from_domain(rental.client),
            employee: EmployeeDto::from_domain(rental.employee),
            vehicle: VehicleDto::from_domain(rental.vehicle),
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────
