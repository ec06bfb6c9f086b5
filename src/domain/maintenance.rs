//! Maintenance record domain entity

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::validation;
use super::vehicle::Vehicle;
use crate::shared::errors::DomainResult;

pub type MaintenanceId = i64;

/// A shop visit for a vehicle. Recording one never changes the vehicle's
/// availability; only rentals and reservations drive that state.
#[derive(Debug, Clone)]
pub struct MaintenanceRecord {
    /// Store-generated key, `None` until the row is inserted
    pub id: Option<MaintenanceId>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Kind of work done (oil change, brakes, bodywork)
    pub service_type: String,
    pub cost: Decimal,
    /// The vehicle that was serviced
    pub vehicle: Vehicle,
}

impl MaintenanceRecord {
    pub fn new(
        id: Option<MaintenanceId>,
        start_date: NaiveDate,
        end_date: NaiveDate,
        service_type: impl Into<String>,
        cost: Decimal,
        vehicle: Vehicle,
    ) -> DomainResult<Self> {
        validation::non_negative("cost", cost)?;
        Ok(Self {
            id,
            start_date,
            end_date,
            service_type: service_type.into(),
            cost,
            vehicle,
        })
    }
}

// ── Tests ──────────────────────────────────────────────────────
