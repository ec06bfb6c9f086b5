//! Rental domain entity

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::client::Client;
use super::employee::Employee;
use super::fine::FineId;
use super::validation;
use super::vehicle::Vehicle;
use crate::shared::errors::DomainResult;

pub type RentalId = i64;

/// A vehicle rental: the owning side of the client, employee and vehicle
/// relationships. The three references are owned by value, so a rental
/// cannot exist without them.
#[derive(Debug, Clone)]
pub struct Rental {
    /// Store-generated key, `None` until the row is inserted
    pub id: Option<RentalId>,
    pub start_date: NaiveDate,
    /// Last day of the rental, never before `start_date`
    pub end_date: NaiveDate,
    pub total_cost: Decimal,
    /// Date the rental was recorded
    pub created_date: NaiveDate,
    pub client: Client,
    /// Employee who processed the rental
    pub employee: Employee,
    pub vehicle: Vehicle,
    /// Keys of fines charged against this rental
    pub fines: Vec<FineId>,
}

impl Rental {
    pub fn new(
        id: Option<RentalId>,
        start_date: NaiveDate,
        end_date: NaiveDate,
        total_cost: Decimal,
        created_date: NaiveDate,
        client: Client,
        employee: Employee,
        vehicle: Vehicle,
    ) -> DomainResult<Self> {
        validation::ordered_dates("start_date", "end_date", start_date, end_date)?;
        validation::non_negative("total_cost", total_cost)?;
        Ok(Self {
            id,
            start_date,
            end_date,
            total_cost,
            created_date,
            client,
            employee,
            vehicle,
            fines: Vec::new(),
        })
    }
}

// ── Tests ──────────────────────────────────────────────────────
